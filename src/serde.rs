//! JSON-deserializable schema description.
//!
//! A schema document is an ordered array of words, left to right as they
//! appear in a record line:
//!
//! ```json
//! [
//!   { "name": "bx", "base": 10 },
//!   { "name": "muon", "size": 8, "base": 16,
//!     "attributes": [
//!       { "name": "phi", "slice": [9, 0] },
//!       { "name": "charge_sign", "slice": [34] }
//!     ] }
//! ]
//! ```
//!
//! A word without a `width` gets [fitted_width] of its fields: 64 bits, or
//! more when a field reaches past bit 63. Definitions are compiled into a
//! [FormatSchema] with the same validation as [FormatSchema::new].

use ::serde::{Deserialize, Serialize};

use crate::{
    errors::SchemaError,
    field::FieldSpec,
    schema::FormatSchema,
    slice::Slice,
    value::Radix,
    word::{WordSpec, fitted_width},
};

/// Top-level schema definition: the words of a record line in order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SchemaDef {
    pub words: Vec<WordDef>,
}

/// Description of one word type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WordDef {
    pub name: String,
    /// Repeat count; defaults to 1.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Numeric base of the tokens; defaults to 16.
    #[serde(default = "default_base")]
    pub base: u32,
    /// Bit width; fitted to the fields when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<FieldDef>,
}

/// Description of one field: a name and `[msb, lsb]` or `[bit]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub slice: Vec<u32>,
}

fn default_size() -> usize {
    1
}

fn default_base() -> u32 {
    Radix::default().get()
}

impl TryFrom<FieldDef> for FieldSpec {
    type Error = SchemaError;

    fn try_from(value: FieldDef) -> Result<Self, Self::Error> {
        let slice = Slice::from_indices(&value.slice)?;
        Ok(FieldSpec::new(value.name, slice))
    }
}

impl TryFrom<WordDef> for WordSpec {
    type Error = SchemaError;

    fn try_from(value: WordDef) -> Result<Self, Self::Error> {
        let attributes = value
            .attributes
            .into_iter()
            .map(FieldSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WordSpec {
            name: value.name,
            size: value.size,
            base: Radix::new(value.base)?,
            width: value.width.unwrap_or_else(|| fitted_width(&attributes)),
            attributes,
        })
    }
}

impl TryFrom<SchemaDef> for FormatSchema {
    type Error = SchemaError;

    fn try_from(value: SchemaDef) -> Result<Self, Self::Error> {
        let words = value
            .words
            .into_iter()
            .map(WordSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        FormatSchema::new(words)
    }
}

impl From<&FormatSchema> for SchemaDef {
    fn from(schema: &FormatSchema) -> Self {
        SchemaDef {
            words: schema
                .words()
                .iter()
                .map(|word| WordDef {
                    name: word.name.clone(),
                    size: word.size,
                    base: word.base.get(),
                    width: Some(word.width),
                    attributes: word
                        .attributes
                        .iter()
                        .map(|field| FieldDef {
                            name: field.name.clone(),
                            slice: field.slice.indices(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl FormatSchema {
    /// Reads and validates a schema from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let def: SchemaDef =
            serde_json::from_str(json).map_err(|e| SchemaError::Json(e.to_string()))?;
        FormatSchema::try_from(def)
    }

    /// Writes the schema as a JSON description.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(&SchemaDef::from(self))
            .map_err(|e| SchemaError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{canonical::canonical, interpreter::Interpreter, word::DEFAULT_WIDTH};

    use super::*;

    const SCENARIO: &str = r#"[
        { "name": "bx", "size": 1, "base": 10 },
        { "name": "muon", "size": 1, "base": 16,
          "attributes": [
            { "name": "phi", "slice": [9, 0] },
            { "name": "charge_sign", "slice": [34] }
          ] }
    ]"#;

    #[test]
    fn test_from_json_defaults() {
        let schema = FormatSchema::from_json(r#"[{ "name": "eg" }]"#).unwrap();
        let eg = schema.lookup("eg").unwrap();
        assert_eq!(eg.size, 1);
        assert_eq!(eg.base, Radix::HEX);
        assert_eq!(eg.width, DEFAULT_WIDTH);
        assert!(eg.is_opaque());
    }

    #[test]
    fn test_from_json_fits_width_to_fields() {
        let schema = FormatSchema::from_json(SCENARIO).unwrap();
        assert_eq!(schema.lookup("muon").unwrap().width, 64);

        let interpreter = Interpreter::new(&schema);
        let row = interpreter.parse_line("5 100000400");
        assert!(row.is_complete());

        let bx = interpreter.decode_cell(&row.cells[0]).unwrap();
        assert_eq!(bx.value.to_u64(), Some(5));

        let muon = interpreter.decode_cell(&row.cells[1]).unwrap();
        assert_eq!(muon.field("phi").unwrap().value, 0);
        assert_eq!(muon.field("charge_sign").unwrap().value, 1);
    }

    #[test]
    fn test_from_json_width_past_bit_63() {
        let schema = FormatSchema::from_json(
            r#"[{ "name": "external", "attributes": [{ "name": "top", "slice": [255, 192] }] }]"#,
        )
        .unwrap();
        assert_eq!(schema.lookup("external").unwrap().width, 256);
    }

    #[test]
    fn test_from_json_explicit_width_is_checked() {
        let json = SCENARIO.replace(r#""base": 16,"#, r#""base": 16, "width": 32,"#);
        assert!(matches!(
            FormatSchema::from_json(&json),
            Err(SchemaError::SliceOutOfRange { msb: 34, width: 32, .. })
        ));
    }

    #[test]
    fn test_from_json_too_many_columns() {
        let json = format!(
            r#"[{{ "name": "a", "size": {max} }}, {{ "name": "b", "size": {max} }}]"#,
            max = usize::MAX
        );
        assert_eq!(
            FormatSchema::from_json(&json).unwrap_err(),
            SchemaError::TooManyColumns
        );
    }

    #[test]
    fn test_from_json_bad_slice() {
        assert_eq!(
            FormatSchema::from_json(r#"[{ "name": "eg", "attributes": [{ "name": "x", "slice": [] }] }]"#)
                .unwrap_err(),
            SchemaError::InvalidSliceArity(0)
        );
    }

    #[test]
    fn test_from_json_bad_radix() {
        assert_eq!(
            FormatSchema::from_json(r#"[{ "name": "eg", "base": 40 }]"#).unwrap_err(),
            SchemaError::InvalidRadix(40)
        );
    }

    #[test]
    fn test_from_json_syntax_error() {
        assert!(matches!(
            FormatSchema::from_json("[{"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_canonical_round_trip() {
        let json = canonical().to_json().unwrap();
        let schema = FormatSchema::from_json(&json).unwrap();
        assert_eq!(&schema, canonical());
    }
}
