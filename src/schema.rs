//! Schema: the ordered word types that make up one record line.

use std::collections::HashSet;

use crate::{
    errors::{LookupError, SchemaError},
    word::WordSpec,
};

/// A validated, immutable record layout. Use [FormatSchema::new] to build one
/// from [WordSpec]s, then [FormatSchema::resolve] to map columns to words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSchema {
    words: Vec<WordSpec>,
    /// First column of each word, parallel to `words`.
    starts: Vec<usize>,
    total_columns: usize,
}

/// One column of a record line: the word that owns it and the repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'s> {
    /// Zero-based position in the record line.
    pub index: usize,
    pub word: &'s WordSpec,
    /// Repetition within the word, `0..word.size`.
    pub offset: usize,
}

impl Column<'_> {
    pub fn label(&self) -> String {
        self.word.label(self.offset)
    }
}

impl FormatSchema {
    /// Validates `words` and builds a schema. Fails on empty or duplicate
    /// names, zero sizes or widths, fields that fall outside their word and
    /// repeat counts whose sum overflows `usize`.
    pub fn new(words: Vec<WordSpec>) -> Result<Self, SchemaError> {
        let mut names = HashSet::with_capacity(words.len());

        for word in &words {
            validate_word(word)?;

            if !names.insert(word.name.as_str()) {
                return Err(SchemaError::DuplicateWord(word.name.clone()));
            }
        }

        words
            .iter()
            .try_fold(0usize, |total, word| total.checked_add(word.size))
            .ok_or(SchemaError::TooManyColumns)?;

        Ok(Self::assemble(words))
    }

    /// Builds the column index without validation.
    pub(crate) fn assemble(words: Vec<WordSpec>) -> Self {
        let mut starts = Vec::with_capacity(words.len());
        let mut total_columns = 0;

        for word in &words {
            starts.push(total_columns);
            total_columns += word.size;
        }

        Self {
            words,
            starts,
            total_columns,
        }
    }

    /// Word types in record order.
    pub fn words(&self) -> &[WordSpec] {
        &self.words
    }

    /// Number of word types.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokens a well-formed record line carries: the sum of all word sizes.
    pub fn total_columns(&self) -> usize {
        self.total_columns
    }

    /// Maps a zero-based column index to its owning word and repeat offset.
    pub fn resolve(&self, index: usize) -> Result<Column<'_>, LookupError> {
        if index >= self.total_columns {
            return Err(LookupError::IndexOutOfRange {
                index,
                total: self.total_columns,
            });
        }

        // starts[0] == 0 <= index, so at least one start qualifies
        let position = self.starts.partition_point(|&start| start <= index) - 1;

        Ok(Column {
            index,
            word: &self.words[position],
            offset: index - self.starts[position],
        })
    }

    /// Returns the first word named `name`.
    pub fn lookup(&self, name: &str) -> Result<&WordSpec, LookupError> {
        self.words
            .iter()
            .find(|word| word.name == name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    /// Every column of a record line, in order. This is the header layout.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> + '_ {
        self.words
            .iter()
            .zip(&self.starts)
            .flat_map(|(word, &start)| {
                (0..word.size).map(move |offset| Column {
                    index: start + offset,
                    word,
                    offset,
                })
            })
    }

    /// Header labels for every column.
    pub fn labels(&self) -> Vec<String> {
        self.columns().map(|column| column.label()).collect()
    }
}

fn validate_word(word: &WordSpec) -> Result<(), SchemaError> {
    if word.name.is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if word.size == 0 {
        return Err(SchemaError::InvalidSize(word.name.clone()));
    }
    if word.width == 0 {
        return Err(SchemaError::InvalidWidth(word.name.clone()));
    }

    let mut fields = HashSet::with_capacity(word.attributes.len());

    for field in &word.attributes {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if !fields.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                word: word.name.clone(),
                field: field.name.clone(),
            });
        }

        let (msb, lsb) = (field.slice.msb(), field.slice.lsb());
        if msb < lsb {
            return Err(SchemaError::InvalidSlice {
                word: word.name.clone(),
                field: field.name.clone(),
                msb,
                lsb,
            });
        }
        if msb >= word.width {
            return Err(SchemaError::SliceOutOfRange {
                word: word.name.clone(),
                field: field.name.clone(),
                msb,
                width: word.width,
            });
        }
        if field.slice.width() > 64 {
            return Err(SchemaError::FieldTooWide {
                word: word.name.clone(),
                field: field.name.clone(),
                width: field.slice.width(),
            });
        }
    }

    Ok(())
}
