//! The files in `sample/` directory define the batch sample
//! used for training and prediction.

mod feature_struct;
mod sample_struct;
mod sample_reader;

pub use feature_struct::{
    Value,
    Feature,
    CategoricalFeature,
    NumericFeature,
};

pub use sample_struct::Sample;
pub use sample_reader::SampleReader;
