//! The query surface a view drives: header layout, row parsing and decoding
//! of a selected cell.

use std::fmt;

use tracing::debug;

use crate::{
    canonical::canonical,
    decoder::{DecodedWord, decode_word},
    errors::{Error, LookupError, ParseError},
    parser::{Cell, Row, parse_dump, parse_line},
    schema::FormatSchema,
};

/// Stateless front end over one schema.
///
/// Holds nothing but a shared reference, so it is `Copy` and can be used
/// from several threads at once. Which cell is selected is the caller's
/// business; every call here stands alone.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'s> {
    schema: &'s FormatSchema,
}

/// A decoded selection: the column label and the word breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'s> {
    pub label: String,
    pub offset: usize,
    pub decoded: DecodedWord<'s>,
}

/// The detail-panel breakdown, headed by the column label.
impl fmt::Display for Selection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.decoded.write_breakdown(f, &self.label)
    }
}

impl Interpreter<'static> {
    /// Interpreter over the canonical schema.
    pub fn canonical() -> Self {
        Self::new(canonical())
    }
}

impl<'s> Interpreter<'s> {
    pub fn new(schema: &'s FormatSchema) -> Self {
        Self { schema }
    }

    /// The schema, for header layout.
    pub fn schema(&self) -> &'s FormatSchema {
        self.schema
    }

    pub fn parse_line<'l>(&self, line: &'l str) -> Row<'s, 'l> {
        parse_line(self.schema, line)
    }

    pub fn parse_dump<'l>(self, text: &'l str) -> impl Iterator<Item = (usize, Row<'s, 'l>)> {
        parse_dump(self.schema, text)
    }

    /// Looks up the word called `name` and decodes `token` with it.
    /// Whitespace around `token` is ignored.
    pub fn decode_word(&self, name: &str, token: &str) -> Result<DecodedWord<'s>, Error> {
        let word = self.schema.lookup(name)?;
        Ok(decode_word(word, token)?)
    }

    /// Decodes a cell produced by [Interpreter::parse_line].
    pub fn decode_cell(&self, cell: &Cell<'s, '_>) -> Result<DecodedWord<'s>, ParseError> {
        decode_word(cell.column.word, cell.token)
    }

    /// Handles a cell selection given as word name, repeat offset and the
    /// text shown in the cell. Whitespace around `text` is ignored, as in
    /// [Interpreter::decode_word].
    pub fn select(&self, name: &str, offset: usize, text: &str) -> Result<Selection<'s>, Error> {
        let word = self.schema.lookup(name)?;

        if offset >= word.size {
            return Err(LookupError::OffsetOutOfRange {
                word: word.name.clone(),
                offset,
                size: word.size,
            }
            .into());
        }

        let decoded = decode_word(word, text).inspect_err(|e| {
            debug!(word = name, offset, error = %e, "selection did not decode");
        })?;

        Ok(Selection {
            label: word.label(offset),
            offset,
            decoded,
        })
    }
}
