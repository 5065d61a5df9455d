//! Error types for schema construction, column lookup and token parsing.

use thiserror::Error;

/// Errors produced when building a [crate::schema::FormatSchema] from word definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A word or field name is empty.
    #[error("word and field names must not be empty")]
    EmptyName,
    /// A word repeats zero times.
    #[error("word `{0}` has a repeat count of zero")]
    InvalidSize(String),
    /// A word is declared zero bits wide.
    #[error("word `{0}` has a bit width of zero")]
    InvalidWidth(String),
    /// The numeric base is outside `2..=36`.
    #[error("radix {0} is outside 2..=36")]
    InvalidRadix(u32),
    /// Two words share a name.
    #[error("word `{0}` is declared more than once")]
    DuplicateWord(String),
    /// Two fields of one word share a name.
    #[error("word `{word}` declares field `{field}` more than once")]
    DuplicateField { word: String, field: String },
    /// Range slice with `msb < lsb`.
    #[error("field `{word}.{field}` has msb {msb} below lsb {lsb}")]
    InvalidSlice {
        word: String,
        field: String,
        msb: u32,
        lsb: u32,
    },
    /// Slice reaches past the declared word width.
    #[error("field `{word}.{field}` reaches bit {msb} of a {width}-bit word")]
    SliceOutOfRange {
        word: String,
        field: String,
        msb: u32,
        width: u32,
    },
    /// Slice spans more bits than a field value can hold.
    #[error("field `{word}.{field}` spans {width} bits, more than 64")]
    FieldTooWide {
        word: String,
        field: String,
        width: u32,
    },
    /// A slice definition lists neither one nor two bit indices.
    #[error("a slice takes one or two bit indices, got {0}")]
    InvalidSliceArity(usize),
    /// The repeat counts add up to more columns than can be indexed.
    #[error("record line has more columns than can be indexed")]
    TooManyColumns,
    /// A JSON schema document could not be read.
    #[error("invalid schema definition: {0}")]
    Json(String),
}

/// Errors produced when locating a column or word in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Column index is at or past the end of a record line.
    #[error("column {index} is outside a {total}-column record")]
    IndexOutOfRange { index: usize, total: usize },
    /// No word carries the requested name.
    #[error("no word named `{0}`")]
    NotFound(String),
    /// Repeat offset is at or past the word's repeat count.
    #[error("word `{word}` repeats {size} times, offset {offset} is out of range")]
    OffsetOutOfRange {
        word: String,
        offset: usize,
        size: usize,
    },
}

/// Errors produced when reading a token as a number in its word's base.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token has no digits.
    #[error("empty token")]
    Empty,
    /// The token contains a character that is not a digit in `radix`.
    #[error("`{token}` is not a base-{radix} numeral")]
    InvalidDigit { token: String, radix: u32 },
}

/// Any failure of a decode query: either the word lookup or the token parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
