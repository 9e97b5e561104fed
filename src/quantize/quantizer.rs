use fixedbitset::FixedBitSet;

use crate::Sample;
use crate::sample::Feature;
use crate::error::{MiniBayesError, Result};
use crate::common::checker;

use super::codec::{FeatureCodec, LabelCodec};


/// The class-membership structure of an encoded target vector.
/// Both sub-estimators of a merged model share one `ClassPartition`,
/// so their priors are built from identical counts.
#[derive(Debug, Clone)]
pub struct ClassPartition {
    pub(crate) labels: LabelCodec,
    pub(crate) y: Vec<usize>,
    pub(crate) rows: Vec<Vec<usize>>,
    pub(crate) counts: Vec<f64>,
    pub(crate) n_sample: usize,
}


impl ClassPartition {
    /// The label dictionary built from the target vector.
    pub fn labels(&self) -> &LabelCodec {
        &self.labels
    }


    /// The encoded target vector.
    pub fn encoded(&self) -> &[usize] {
        &self.y[..]
    }


    /// Row indices of each class.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows[..]
    }


    /// Number of training rows per class.
    pub fn counts(&self) -> &[f64] {
        &self.counts[..]
    }


    /// Total number of training rows.
    pub fn n_sample(&self) -> usize {
        self.n_sample
    }
}


/// The integer-coded categorical dimensions of a quantized sample,
/// stored column-major together with their coding dictionaries.
#[derive(Debug, Clone)]
pub struct DiscreteBlock {
    pub(crate) codes: Vec<Vec<usize>>,
    pub(crate) cardinalities: Vec<usize>,
    pub(crate) codecs: Vec<FeatureCodec>,
}


impl DiscreteBlock {
    /// Number of categorical dimensions.
    pub fn n_dims(&self) -> usize {
        self.codes.len()
    }


    /// The encoded column of dimension `dim`.
    pub fn codes(&self, dim: usize) -> &[usize] {
        &self.codes[dim][..]
    }


    /// Number of distinct symbols per dimension.
    pub fn cardinalities(&self) -> &[usize] {
        &self.cardinalities[..]
    }


    /// The coding dictionaries, one per dimension.
    pub fn codecs(&self) -> &[FeatureCodec] {
        &self.codecs[..]
    }
}


/// The continuous dimensions of a quantized sample,
/// cast to `f64` and stored column-major.
#[derive(Debug, Clone)]
pub struct ContinuousBlock {
    pub(crate) names: Vec<String>,
    pub(crate) reals: Vec<Vec<f64>>,
}


impl ContinuousBlock {
    /// Number of continuous dimensions.
    pub fn n_dims(&self) -> usize {
        self.reals.len()
    }


    /// The values of dimension `dim`.
    pub fn values(&self, dim: usize) -> &[f64] {
        &self.reals[dim][..]
    }


    /// Names of the continuous dimensions.
    pub fn names(&self) -> &[String] {
        &self.names[..]
    }
}


/// The output of [`Quantizer::quantize`]:
/// categorical and continuous sub-matrices are kept separate,
/// never interleaved.
#[derive(Debug, Clone)]
pub struct Quantized {
    pub(crate) discrete: DiscreteBlock,
    pub(crate) continuous: ContinuousBlock,
    pub(crate) mask: FixedBitSet,
    pub(crate) n_columns: usize,
    pub(crate) classes: ClassPartition,
}


impl Quantized {
    /// The categorical sub-matrix and its dictionaries.
    pub fn discrete(&self) -> &DiscreteBlock {
        &self.discrete
    }


    /// The continuous sub-matrix.
    pub fn continuous(&self) -> &ContinuousBlock {
        &self.continuous
    }


    /// The continuous-column mask over the original columns.
    pub fn mask(&self) -> &FixedBitSet {
        &self.mask
    }


    /// Number of columns of the original sample.
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }


    /// The class partition of the target vector.
    pub fn classes(&self) -> &ClassPartition {
        &self.classes
    }
}


/// Converts raw heterogeneous samples into integer-coded arrays
/// plus reversible coding dictionaries.
///
/// When no mask is given, the mask is inferred from the column types:
/// numeric columns are treated as continuous,
/// categorical columns as discrete.
/// # Example
/// ```
/// use minibayes::{Quantizer, Sample};
/// use minibayes::sample::Value;
///
/// let rows = vec![
///     vec![Value::from("a"), Value::from(1.0)],
///     vec![Value::from("b"), Value::from(2.0)],
/// ];
/// let sample = Sample::from_rows(rows, vec!["pos", "neg"]).unwrap();
/// let quantized = Quantizer::new().quantize(&sample).unwrap();
/// assert_eq!(quantized.discrete().n_dims(), 1);
/// assert_eq!(quantized.continuous().n_dims(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    mask: Option<FixedBitSet>,
}


impl Quantizer {
    /// Construct a quantizer that infers the continuous-column mask
    /// from the feature types.
    pub fn new() -> Self {
        Self { mask: None }
    }


    /// Mark each column as continuous (`true`) or discrete (`false`).
    pub fn whether_continuous(mut self, flags: &[bool]) -> Self {
        let mut mask = FixedBitSet::with_capacity(flags.len());
        for (i, &flag) in flags.iter().enumerate() {
            if flag {
                mask.insert(i);
            }
        }
        self.mask = Some(mask);
        self
    }


    /// Treat every column as discrete, whatever its type.
    pub(crate) fn all_discrete(n_columns: usize) -> Self {
        Self { mask: Some(FixedBitSet::with_capacity(n_columns)) }
    }


    /// Treat every column as continuous.
    pub(crate) fn all_continuous(n_columns: usize) -> Self {
        let mut mask = FixedBitSet::with_capacity(n_columns);
        mask.insert_range(..);
        Self { mask: Some(mask) }
    }


    /// Encode the given sample.
    ///
    /// # Errors
    /// Fails with [`MiniBayesError::FeatureCountMismatch`] when the mask
    /// does not cover every column,
    /// and with [`MiniBayesError::NonNumericValue`] when a column marked
    /// continuous holds a symbol that does not parse as a number.
    ///
    /// # Panics
    /// Panics when the sample is empty or its target column is not set.
    pub fn quantize(&self, sample: &Sample) -> Result<Quantized> {
        checker::check_sample(sample);
        checker::check_target(sample);

        let (n_sample, n_columns) = sample.shape();

        let mask = match &self.mask {
            Some(mask) => {
                if mask.len() != n_columns {
                    return Err(MiniBayesError::FeatureCountMismatch {
                        expected: n_columns,
                        got: mask.len(),
                    });
                }
                mask.clone()
            },
            None => infer_mask(sample),
        };

        let classes = partition_by_class(sample.target(), n_sample);

        let mut codes = Vec::new();
        let mut codecs = Vec::new();
        let mut names = Vec::new();
        let mut reals = Vec::new();

        for (d, feature) in sample.features().iter().enumerate() {
            if mask.contains(d) {
                reals.push(to_reals(feature)?);
                names.push(feature.name().to_string());
            } else {
                let (column, codec) = encode_feature(feature);
                codes.push(column);
                codecs.push(codec);
            }
        }

        let cardinalities = codecs.iter()
            .map(FeatureCodec::len)
            .collect::<Vec<_>>();

        let quantized = Quantized {
            discrete: DiscreteBlock { codes, cardinalities, codecs },
            continuous: ContinuousBlock { names, reals },
            mask,
            n_columns,
            classes,
        };
        Ok(quantized)
    }
}


/// Numeric columns become continuous dimensions.
fn infer_mask(sample: &Sample) -> FixedBitSet {
    let n_columns = sample.shape().1;
    let mut mask = FixedBitSet::with_capacity(n_columns);
    for (d, feature) in sample.features().iter().enumerate() {
        if feature.is_numeric() {
            mask.insert(d);
        }
    }
    mask
}


/// Encode the target labels and group the row indices by class.
fn partition_by_class(target: &[String], n_sample: usize) -> ClassPartition {
    let mut labels = LabelCodec::default();
    let y = target.iter()
        .map(|label| labels.code(label))
        .collect::<Vec<_>>();

    let mut rows = vec![Vec::new(); labels.len()];
    for (i, &class) in y.iter().enumerate() {
        rows[class].push(i);
    }

    let counts = rows.iter()
        .map(|class_rows| class_rows.len() as f64)
        .collect::<Vec<_>>();

    ClassPartition { labels, y, rows, counts, n_sample }
}


/// Code one column, assigning codes in first-encounter order.
/// A numeric column forced discrete is coded through
/// the display form of its values.
fn encode_feature(feature: &Feature) -> (Vec<usize>, FeatureCodec) {
    let mut codec = FeatureCodec::new(feature.name());
    let column = (0..feature.len())
        .map(|i| codec.code(&feature.at(i).to_string()))
        .collect::<Vec<_>>();
    (column, codec)
}


/// Cast one column to `f64`,
/// parsing symbols when the column is categorical.
fn to_reals(feature: &Feature) -> Result<Vec<f64>> {
    (0..feature.len())
        .map(|i| {
            let value = feature.at(i);
            value.as_number().ok_or_else(|| {
                MiniBayesError::NonNumericValue {
                    feature: feature.name().to_string(),
                    value: value.to_string(),
                }
            })
        })
        .collect()
}
