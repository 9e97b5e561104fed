//! The files in `quantize/` directory define the conversion from raw
//! heterogeneous samples into integer-coded arrays
//! plus reversible coding dictionaries.

mod codec;
mod quantizer;

pub use codec::{
    FeatureCodec,
    LabelCodec,
};

pub use quantizer::{
    Quantizer,
    Quantized,
    DiscreteBlock,
    ContinuousBlock,
    ClassPartition,
};
