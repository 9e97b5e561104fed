use std::path::Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;

use crate::error::{MiniBayesError, Result};
use super::feature_struct::*;


/// Struct `Sample` holds a batch sample with heterogeneous columns.
/// Each column is either categorical or numeric;
/// the target column always holds raw label strings.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(crate) name_to_index: HashMap<String, usize>,
    pub(crate) features: Vec<Feature>,
    pub(crate) target: Vec<String>,
    pub(crate) n_sample: usize,
    pub(crate) n_feature: usize,
}


impl Sample {
    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    pub fn from_dataframe(data: DataFrame, target: Series)
        -> io::Result<Self>
    {
        let (n_sample, n_feature) = data.shape();
        let target = series_to_labels(&target);

        let features = data.get_columns()
            .iter()
            .map(Feature::from_series)
            .collect::<Vec<_>>();

        let name_to_index = index_by_name(&features);

        let sample = Self {
            name_to_index, features, target, n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Read a CSV format file to `Sample` type.
    /// Column types are inferred:
    /// a column whose every cell parses as a number becomes numeric,
    /// anything else stays categorical.
    pub fn from_csv<P>(file: P, has_header: bool) -> io::Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines();

        let mut names = Vec::new();
        if has_header {
            if let Some(line) = lines.next() {
                names = line?.split(',')
                    .map(|name| name.trim().to_string())
                    .collect::<Vec<_>>();
            }
        }

        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut n_sample = 0_usize;

        // For each line of the file
        for line in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>();

            if columns.is_empty() {
                columns = vec![Vec::new(); cells.len()];
            }

            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
            n_sample += 1;
        }

        // If the header does not exist, construct a dummy header.
        if names.is_empty() {
            names = (1..=columns.len())
                .map(|i| format!("Feat. [{i}]"))
                .collect();
        }

        let features = names.iter()
            .zip(&columns)
            .map(|(name, cells)| Feature::infer(name, cells))
            .collect::<Vec<_>>();

        let n_feature = features.len();
        let name_to_index = index_by_name(&features);

        let sample = Self {
            name_to_index,
            features,
            target: Vec::new(),
            n_sample,
            n_feature,
        };

        Ok(sample)
    }


    /// Build a sample from row-major heterogeneous cells.
    /// Feature names default to `Feat. [k]`.
    /// An empty `target` constructs an unlabeled sample
    /// that can only be used for prediction.
    ///
    /// # Errors
    /// Fails with [`MiniBayesError::RowCountMismatch`]
    /// when `target` is non-empty and its length differs from `rows`,
    /// and with [`MiniBayesError::FeatureCountMismatch`]
    /// when the rows have uneven widths.
    pub fn from_rows<T>(rows: Vec<Vec<Value>>, target: Vec<T>)
        -> Result<Self>
        where T: ToString,
    {
        let n_sample = rows.len();
        if !target.is_empty() && target.len() != n_sample {
            return Err(MiniBayesError::RowCountMismatch {
                data: n_sample,
                target: target.len(),
            });
        }

        let n_feature = rows.first().map(Vec::len).unwrap_or(0);
        for row in &rows {
            if row.len() != n_feature {
                return Err(MiniBayesError::FeatureCountMismatch {
                    expected: n_feature,
                    got: row.len(),
                });
            }
        }

        let features = (0..n_feature)
            .map(|d| {
                let cells = rows.iter()
                    .map(|row| row[d].clone())
                    .collect::<Vec<_>>();
                let name = format!("Feat. [{}]", d + 1);
                Feature::from_values(name, &cells)
            })
            .collect::<Vec<_>>();

        let target = target.iter()
            .map(|label| label.to_string())
            .collect();

        let name_to_index = index_by_name(&features);

        let sample = Self {
            name_to_index, features, target, n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Returns the raw target labels.
    /// Empty until a target column is set.
    pub fn target(&self) -> &[String] {
        &self.target[..]
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Self {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .expect("The target class does not exist");


        self.target = self.features.remove(pos).into_target();
        self.n_feature -= 1;


        self.name_to_index = index_by_name(&self.features);

        self
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `idx`-th row as heterogeneous cells.
    pub fn row(&self, idx: usize) -> Vec<Value> {
        self.features.iter()
            .map(|feat| feat.at(idx))
            .collect()
    }


    /// Returns the sample restricted to the given rows, in order.
    pub fn subsample(&self, rows: &[usize]) -> Self {
        let features = self.features.iter()
            .map(|feat| feat.take(rows))
            .collect::<Vec<_>>();

        let target = if self.target.is_empty() {
            Vec::new()
        } else {
            rows.iter().map(|&i| self.target[i].clone()).collect()
        };

        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target,
            n_sample: rows.len(),
            n_feature: self.n_feature,
        }
    }


    /// Split the rows `ix[start..end]` into a test sample
    /// and the remaining rows into a training sample.
    /// Mainly used by `CrossValidation`.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>,
    {
        let ix = ix.as_ref();
        let test = ix[start..end].to_vec();
        let train = ix[..start].iter()
            .chain(ix[end..].iter())
            .copied()
            .collect::<Vec<_>>();

        (self.subsample(&train), self.subsample(&test))
    }
}


/// Convert a target `Series` into raw label strings.
fn series_to_labels(target: &Series) -> Vec<String> {
    match target.dtype() {
        DataType::Utf8 => {
            target.utf8()
                .expect("The target is not a dtype utf8")
                .into_iter()
                .map(|label| {
                    label.expect("The target contains a missing value")
                        .to_string()
                })
                .collect()
        },
        _ => {
            let casted = target.cast(&DataType::Float64)
                .expect("The target cannot be cast to f64");
            casted.f64()
                .expect("The target is not a dtype f64")
                .into_iter()
                .map(|label| {
                    let label = label
                        .expect("The target contains a missing value");
                    label.to_string()
                })
                .collect()
        },
    }
}


fn index_by_name(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, feat)| (feat.name().to_string(), i))
        .collect()
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name).unwrap();
        &self.features[k]
    }
}
