use std::collections::HashMap;

use serde::{Serialize, Deserialize};


/// A bijective mapping between the raw symbols of one categorical
/// dimension and their integer codes.
/// Codes are assigned from `0` in first-encounter order,
/// so repeated quantization of the same column yields the same codes.
/// The codec is frozen once training ends;
/// an unseen symbol at predict time is a lookup failure,
/// never a fresh code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCodec {
    name: String,
    code_of: HashMap<String, usize>,
    symbols: Vec<String>,
}


impl FeatureCodec {
    /// Construct an empty codec for the feature named `name`.
    pub(crate) fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            code_of: HashMap::new(),
            symbols: Vec::new(),
        }
    }


    /// Name of the dimension this codec belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the code of `symbol`, assigning a fresh one
    /// when the symbol appears for the first time.
    pub(crate) fn code(&mut self, symbol: &str) -> usize {
        if let Some(&code) = self.code_of.get(symbol) {
            return code;
        }
        let code = self.symbols.len();
        self.code_of.insert(symbol.to_string(), code);
        self.symbols.push(symbol.to_string());
        code
    }


    /// Returns the code of `symbol`, or `None` if it was never observed.
    pub fn encode(&self, symbol: &str) -> Option<usize> {
        self.code_of.get(symbol).copied()
    }


    /// Returns the symbol assigned to `code`.
    pub fn decode(&self, code: usize) -> &str {
        &self.symbols[code]
    }


    /// The number of distinct symbols observed during training,
    /// i.e., the cardinality of the dimension.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }


    /// Returns `true` if no symbol was observed.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}


/// A bijective mapping between raw class labels
/// and the class indices `0..K`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelCodec {
    code_of: HashMap<String, usize>,
    labels: Vec<String>,
}


impl LabelCodec {
    /// Returns the class index of `label`, assigning a fresh one
    /// when the label appears for the first time.
    pub(crate) fn code(&mut self, label: &str) -> usize {
        if let Some(&code) = self.code_of.get(label) {
            return code;
        }
        let code = self.labels.len();
        self.code_of.insert(label.to_string(), code);
        self.labels.push(label.to_string());
        code
    }


    /// Returns the class index of `label`,
    /// or `None` if it was never observed.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.code_of.get(label).copied()
    }


    /// Returns the raw label of class `class`.
    pub fn decode(&self, class: usize) -> &str {
        &self.labels[class]
    }


    /// The number of classes `K`.
    pub fn len(&self) -> usize {
        self.labels.len()
    }


    /// Returns `true` if no label was observed.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_encounter_order() {
        let mut codec = FeatureCodec::new("f");
        assert_eq!(codec.code("b"), 0);
        assert_eq!(codec.code("a"), 1);
        assert_eq!(codec.code("b"), 0);
        assert_eq!(codec.len(), 2);
    }

    #[test]
    fn round_trip() {
        let mut codec = FeatureCodec::new("f");
        for symbol in ["x", "y", "z"] {
            codec.code(symbol);
        }
        for symbol in ["x", "y", "z"] {
            let code = codec.encode(symbol).unwrap();
            assert_eq!(codec.decode(code), symbol);
        }
    }

    #[test]
    fn unseen_symbol_has_no_code() {
        let mut codec = FeatureCodec::new("f");
        codec.code("x");
        assert_eq!(codec.encode("y"), None);
    }

    #[test]
    fn label_round_trip() {
        let mut codec = LabelCodec::default();
        for label in ["yes", "no"] {
            codec.code(label);
        }
        assert_eq!(codec.len(), 2);
        assert_eq!(codec.decode(codec.encode("yes").unwrap()), "yes");
        assert_eq!(codec.decode(codec.encode("no").unwrap()), "no");
    }
}
