//! Decoding a word token into its named fields.

use std::fmt;

use tracing::trace;

use crate::{
    errors::ParseError,
    field::FieldSpec,
    slice::Slice,
    value::WordValue,
    word::WordSpec,
};

/// One decoded field: its name, where it sits and the extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedField<'s> {
    pub name: &'s str,
    pub slice: Slice,
    pub value: u64,
}

impl DecodedField<'_> {
    /// Slice boundaries for display: `"msb:lsb"` or `"b"`.
    pub fn slice_description(&self) -> String {
        self.slice.to_string()
    }
}

/// A token decoded against its word: the full value and every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWord<'s> {
    pub word: &'s WordSpec,
    pub value: WordValue,
    /// Fields in the word's declaration order.
    pub fields: Vec<DecodedField<'s>>,
}

impl<'s> DecodedWord<'s> {
    /// The value as the word renders it (zero-padded hex, plain decimal, ...).
    pub fn formatted(&self) -> String {
        self.word.format(&self.value)
    }

    pub fn field(&self, name: &str) -> Option<&DecodedField<'s>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Parses `token` in the word's base and extracts each declared field.
///
/// Surrounding whitespace is ignored. Fails only when the token is not a
/// numeral in that base.
pub fn decode_word<'s>(word: &'s WordSpec, token: &str) -> Result<DecodedWord<'s>, ParseError> {
    let token = token.trim();
    let value = WordValue::parse(token, word.base)?;

    let fields = word
        .attributes
        .iter()
        .map(|field| decode_field(field, &value))
        .collect();

    trace!(word = %word.name, token, "decoded word");

    Ok(DecodedWord {
        word,
        value,
        fields,
    })
}

fn decode_field<'s>(field: &'s FieldSpec, value: &WordValue) -> DecodedField<'s> {
    DecodedField {
        name: &field.name,
        slice: field.slice,
        value: field.extract(value),
    }
}

impl DecodedWord<'_> {
    /// Writes the breakdown under `heading`: the formatted value, then one
    /// `name [slice]: dec (0xhex)` line per field.
    pub(crate) fn write_breakdown(&self, f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
        writeln!(f, "{heading}")?;
        write!(f, "{}", self.formatted())?;

        for field in &self.fields {
            write!(
                f,
                "\n{} [{}]: {} (0x{:x})",
                field.name, field.slice, field.value, field.value
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for DecodedWord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_breakdown(f, &self.word.name)
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Radix;

    use super::*;

    fn muon() -> WordSpec {
        WordSpec::new("muon", Radix::HEX)
            .width(64)
            .field("phi", Slice::range(9, 0))
            .field("charge_sign", Slice::bit(34))
    }

    #[test]
    fn test_decode_above_32_bits() {
        let word = muon();
        let decoded = decode_word(&word, "100000400").unwrap();

        assert_eq!(decoded.value.to_u64(), Some(0x1_0000_0400));
        assert_eq!(decoded.field("phi").unwrap().value, 0);
        assert_eq!(decoded.field("charge_sign").unwrap().value, 1);
    }

    #[test]
    fn test_fields_in_declared_order() {
        let word = muon();
        let decoded = decode_word(&word, "0").unwrap();
        let names: Vec<&str> = decoded.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["phi", "charge_sign"]);
    }

    #[test]
    fn test_slice_description() {
        let word = muon();
        let decoded = decode_word(&word, "3ff").unwrap();
        assert_eq!(decoded.fields[0].slice_description(), "9:0");
        assert_eq!(decoded.fields[0].value, 0x3ff);
        assert_eq!(decoded.fields[1].slice_description(), "34");
    }

    #[test]
    fn test_opaque_word_has_no_fields() {
        let word = WordSpec::new("bx", Radix::DECIMAL);
        let decoded = decode_word(&word, "3563").unwrap();
        assert!(decoded.fields.is_empty());
        assert_eq!(decoded.value.to_u64(), Some(3563));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let word = WordSpec::new("bx", Radix::DECIMAL);
        let decoded = decode_word(&word, " \t5 \r").unwrap();
        assert_eq!(decoded.value.to_u64(), Some(5));
        assert_eq!(decode_word(&word, "   ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let word = WordSpec::new("bx", Radix::DECIMAL);
        assert_eq!(
            decode_word(&word, "ff").unwrap_err(),
            ParseError::InvalidDigit {
                token: "ff".to_string(),
                radix: 10
            }
        );
    }

    #[test]
    fn test_display() {
        let word = muon();
        let decoded = decode_word(&word, "400000005").unwrap();
        assert_eq!(
            decoded.to_string(),
            "muon\n0000000400000005\nphi [9:0]: 5 (0x5)\ncharge_sign [34]: 1 (0x1)"
        );
    }
}
