use polars::prelude::*;

use std::fmt;


/// A single cell of a sample row.
/// Samples are heterogeneous,
/// so a cell is either a categorical symbol or a numeric scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A categorical symbol.
    Sym(String),
    /// A numeric scalar.
    Num(f64),
}


impl Value {
    /// Returns the numeric form of `self`, if one exists.
    /// A symbol is parsed; a symbol that does not look like a number
    /// yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Num(x) => Some(*x),
            Self::Sym(s) => s.trim().parse::<f64>().ok(),
        }
    }
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sym(s) => f.write_str(s),
            Self::Num(x) => write!(f, "{x}"),
        }
    }
}


impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Sym(s.to_string())
    }
}


impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Sym(s)
    }
}


impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Num(x)
    }
}


/// A categorical feature column.
#[derive(Debug, Clone)]
pub struct CategoricalFeature {
    /// Feature name
    pub(crate) name: String,
    /// Observed symbols, one per row.
    pub(crate) symbols: Vec<String>,
}


/// A numeric feature column.
#[derive(Debug, Clone)]
pub struct NumericFeature {
    /// Feature name
    pub(crate) name: String,
    /// Observed values, one per row.
    pub(crate) values: Vec<f64>,
}


/// An enumeration of categorical/numeric feature.
#[derive(Debug, Clone)]
pub enum Feature {
    /// A column of categorical symbols.
    Categorical(CategoricalFeature),
    /// A column of numeric scalars.
    Numeric(NumericFeature),
}


impl Feature {
    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Categorical(feat) => &feat.name,
            Self::Numeric(feat) => &feat.name,
        }
    }


    /// Returns the number of rows in this feature.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical(feat) => feat.symbols.len(),
            Self::Numeric(feat) => feat.values.len(),
        }
    }


    /// Returns `true` if this feature has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns `true` if this feature holds numeric scalars.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }


    /// Returns the cell at row `idx`.
    pub fn at(&self, idx: usize) -> Value {
        match self {
            Self::Categorical(feat) => Value::Sym(feat.symbols[idx].clone()),
            Self::Numeric(feat) => Value::Num(feat.values[idx]),
        }
    }


    /// Build a feature from raw text cells.
    /// A column whose every cell parses as `f64` becomes numeric;
    /// anything else stays categorical.
    pub(crate) fn infer<T, S>(name: T, cells: &[S]) -> Self
        where T: ToString,
              S: AsRef<str>,
    {
        let name = name.to_string();
        let parsed = cells.iter()
            .map(|c| c.as_ref().trim().parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>();

        match parsed {
            Ok(values) => Self::Numeric(NumericFeature { name, values }),
            Err(_) => {
                let symbols = cells.iter()
                    .map(|c| c.as_ref().trim().to_string())
                    .collect();
                Self::Categorical(CategoricalFeature { name, symbols })
            },
        }
    }


    /// Build a feature from heterogeneous cells.
    /// A column holding only `Value::Num` becomes numeric;
    /// a mixed column degrades to categorical
    /// through the display form of each cell.
    pub(crate) fn from_values<T: ToString>(name: T, cells: &[Value]) -> Self {
        let name = name.to_string();
        let all_numeric = cells.iter()
            .all(|v| matches!(v, Value::Num(_)));

        if all_numeric {
            let values = cells.iter()
                .map(|v| match v {
                    Value::Num(x) => *x,
                    Value::Sym(_) => unreachable!(),
                })
                .collect();
            Self::Numeric(NumericFeature { name, values })
        } else {
            let symbols = cells.iter().map(|v| v.to_string()).collect();
            Self::Categorical(CategoricalFeature { name, symbols })
        }
    }


    /// Convert a `polars::Series` into a feature.
    /// String columns stay categorical;
    /// every other dtype is cast to `f64`.
    pub(crate) fn from_series(series: &Series) -> Self {
        let name = series.name().to_string();
        match series.dtype() {
            DataType::Utf8 => {
                let symbols = series.utf8()
                    .expect("The feature is not a dtype utf8")
                    .into_iter()
                    .map(|s| {
                        s.expect("The feature contains a missing value")
                            .to_string()
                    })
                    .collect();
                Self::Categorical(CategoricalFeature { name, symbols })
            },
            _ => {
                let casted = series.cast(&DataType::Float64)
                    .unwrap_or_else(|_| panic!(
                        "The feature `{name}` cannot be cast to f64"
                    ));
                let values = casted.f64()
                    .expect("The feature is not a dtype f64")
                    .into_iter()
                    .map(|v| v.expect("The feature contains a missing value"))
                    .collect();
                Self::Numeric(NumericFeature { name, values })
            },
        }
    }


    /// Keep the given rows, in order.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Categorical(feat) => {
                let symbols = rows.iter()
                    .map(|&i| feat.symbols[i].clone())
                    .collect();
                Self::Categorical(CategoricalFeature {
                    name: feat.name.clone(),
                    symbols,
                })
            },
            Self::Numeric(feat) => {
                let values = rows.iter().map(|&i| feat.values[i]).collect();
                Self::Numeric(NumericFeature {
                    name: feat.name.clone(),
                    values,
                })
            },
        }
    }


    /// Turn this feature into a target column.
    pub(crate) fn into_target(self) -> Vec<String> {
        match self {
            Self::Categorical(feat) => feat.symbols,
            Self::Numeric(feat) => {
                feat.values.into_iter()
                    .map(|x| x.to_string())
                    .collect()
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_numeric_column() {
        let feature = Feature::infer("f", &["1.0", "2", "-3.5"]);
        assert!(feature.is_numeric());
        assert_eq!(feature.at(2), Value::Num(-3.5));
    }

    #[test]
    fn infer_categorical_column() {
        let feature = Feature::infer("f", &["1.0", "x", "-3.5"]);
        assert!(!feature.is_numeric());
        assert_eq!(feature.at(1), Value::Sym("x".to_string()));
    }

    #[test]
    fn mixed_values_degrade_to_symbols() {
        let cells = vec![Value::from("a"), Value::from(2.5)];
        let feature = Feature::from_values("f", &cells);
        assert!(!feature.is_numeric());
        assert_eq!(feature.at(1), Value::Sym("2.5".to_string()));
    }
}
