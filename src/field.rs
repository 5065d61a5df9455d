//! Named bit fields within a word.

use crate::{slice::Slice, value::WordValue};

/// A single named field of a word, located by a [Slice].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name shown in the decoded breakdown; unique within its word.
    pub name: String,
    /// Bits the field occupies.
    pub slice: Slice,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, slice: Slice) -> Self {
        FieldSpec {
            name: name.into(),
            slice,
        }
    }

    /// Extracts this field from a word value: `(value >> lsb) & mask`.
    pub fn extract(&self, value: &WordValue) -> u64 {
        value.bits(self.slice.shift(), self.slice.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_range() {
        let field = FieldSpec::new("pt", Slice::range(18, 10));
        let value = WordValue::from(0b1_0110_0011u64 << 10);
        assert_eq!(field.extract(&value), 0b1_0110_0011);
    }

    #[test]
    fn test_extract_high_bit() {
        let field = FieldSpec::new("charge_sign", Slice::bit(34));
        assert_eq!(field.extract(&WordValue::from(1u64 << 34)), 1);
        assert_eq!(field.extract(&WordValue::from(!(1u64 << 34))), 0);
    }

    #[test]
    fn test_extract_ignores_neighbours() {
        let field = FieldSpec::new("iso", Slice::range(33, 32));
        let value = WordValue::from(0xffff_ffffu64 | (0b10 << 32) | (1 << 34));
        assert_eq!(field.extract(&value), 0b10);
    }
}
