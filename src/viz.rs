//! Renders the fitted probability tables to image files.
//!
//! Rendering consumes only the read-only table accessors and is never
//! called from the estimation path;
//! dropping this module does not change a single prediction.

use plotters::prelude::*;

use std::error::Error;
use std::path::Path;

use crate::{MultinomialNB, GaussianNB, NaiveBayes};


/// Render one grouped bar chart per discrete dimension of a fitted
/// [`MultinomialNB`], showing the smoothed conditional probability of
/// every category value under every class.
/// Images are written to `dir` as `d1.png`, `d2.png`, ...
pub fn plot_multinomial<P>(model: &MultinomialNB, dir: P)
    -> Result<(), Box<dyn Error>>
    where P: AsRef<Path>,
{
    let table = model.posterior_table()?;
    let codecs = model.feature_codecs()?;
    let labels = model.label_codec()?;
    let n_classes = labels.len();

    std::fs::create_dir_all(dir.as_ref())?;

    for dim in 0..table.n_dims() {
        let cardinality = table.cardinality(dim);
        let path = dir.as_ref().join(format!("d{}.png", dim + 1));

        let root = BitMapBackend::new(&path, (640, 480))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let codec = &codecs[dim];
        let title = format!("{} (S = {cardinality})", codec.name());
        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0f64..cardinality as f64, 0f64..1f64)?;

        chart.configure_mesh()
            .disable_x_mesh()
            .draw()?;

        let bar_width = 0.8 / n_classes as f64;
        for class in 0..n_classes {
            let color = Palette99::pick(class).mix(0.9);
            let row = table.row(dim, class);

            chart.draw_series(row.iter().enumerate().map(|(value, &p)| {
                    let x0 = value as f64
                        + 0.1
                        + bar_width * class as f64;
                    Rectangle::new([(x0, 0f64), (x0 + bar_width, p)],
                        color.filled())
                }))?
                .label(labels.decode(class).to_string())
                .legend(move |(x, y)| {
                    Rectangle::new(
                        [(x, y - 4), (x + 8, y + 4)],
                        Palette99::pick(class).filled(),
                    )
                });
        }

        chart.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(())
}


/// Render one line chart per continuous dimension of a fitted
/// [`GaussianNB`], showing every class-conditional density over the
/// span `mean ± 4σ` of the classes.
/// Images are written to `dir` as `d1.png`, `d2.png`, ...
pub fn plot_gaussian<P>(model: &GaussianNB, dir: P)
    -> Result<(), Box<dyn Error>>
    where P: AsRef<Path>,
{
    const RESOLUTION: usize = 200;

    let densities = model.densities()?;
    let labels = model.label_codec()?;

    std::fs::create_dir_all(dir.as_ref())?;

    for (dim, per_class) in densities.iter().enumerate() {
        let lo = per_class.iter()
            .map(|g| g.mean() - 4f64 * g.var().sqrt())
            .fold(f64::INFINITY, f64::min);
        let hi = per_class.iter()
            .map(|g| g.mean() + 4f64 * g.var().sqrt())
            .fold(f64::NEG_INFINITY, f64::max);
        // A dimension of zero-variance classes still needs a span.
        let (lo, hi) = if lo == hi { (lo - 1f64, hi + 1f64) } else { (lo, hi) };

        let peak = per_class.iter()
            .map(|g| g.density(g.mean()))
            .fold(1e-12, f64::max);

        let path = dir.as_ref().join(format!("d{}.png", dim + 1));
        let root = BitMapBackend::new(&path, (640, 480))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let title = format!("dimension {}", dim + 1);
        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(lo..hi, 0f64..peak * 1.1)?;

        chart.configure_mesh().draw()?;

        for (class, gaussian) in per_class.iter().enumerate() {
            let color = Palette99::pick(class);
            let step = (hi - lo) / RESOLUTION as f64;
            let curve = (0..=RESOLUTION).map(|i| {
                let x = lo + step * i as f64;
                (x, gaussian.density(x))
            });

            chart.draw_series(LineSeries::new(curve, &color))?
                .label(labels.decode(class).to_string())
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 8, y)],
                        Palette99::pick(class),
                    )
                });
        }

        chart.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(())
}
