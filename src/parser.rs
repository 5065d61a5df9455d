//! Splitting record lines into tokens and pairing them with schema columns.

use tracing::debug;

use crate::schema::{Column, FormatSchema};

/// One token of a record line together with the column it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'s, 'l> {
    pub column: Column<'s>,
    /// Token text as it appears in the line.
    pub token: &'l str,
}

/// The cells of one record line.
///
/// A line with more or fewer tokens than the schema has columns is kept:
/// surplus tokens are dropped and missing columns are left out. The counts
/// are recorded so a caller can flag the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row<'s, 'l> {
    pub cells: Vec<Cell<'s, 'l>>,
    /// Columns with no token in this line.
    pub missing: usize,
    /// Tokens past the last column.
    pub surplus: usize,
}

impl Row<'_, '_> {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when every column received exactly one token.
    pub fn is_complete(&self) -> bool {
        self.missing == 0 && self.surplus == 0
    }
}

/// Splits `line` on whitespace runs and pairs the i-th token with column i.
pub fn parse_line<'s, 'l>(schema: &'s FormatSchema, line: &'l str) -> Row<'s, 'l> {
    let total = schema.total_columns();

    let mut tokens = line.split_whitespace();
    let cells: Vec<Cell<'s, 'l>> = schema
        .columns()
        .zip(tokens.by_ref())
        .map(|(column, token)| Cell { column, token })
        .collect();

    let surplus = tokens.count();
    let missing = if cells.is_empty() { 0 } else { total - cells.len() };

    if !cells.is_empty() && (missing > 0 || surplus > 0) {
        debug!(
            tokens = cells.len() + surplus,
            columns = total,
            "record length differs from schema"
        );
    }

    Row {
        cells,
        missing,
        surplus,
    }
}

/// Parses every non-blank line of a dump.
///
/// Yields `(line_number, row)` with 1-based line numbers. Both `\n` and
/// `\r\n` endings are accepted and blank lines produce no row.
pub fn parse_dump<'s, 'l>(
    schema: &'s FormatSchema,
    text: &'l str,
) -> impl Iterator<Item = (usize, Row<'s, 'l>)> {
    text.lines()
        .enumerate()
        .map(move |(i, line)| (i + 1, parse_line(schema, line)))
        .filter(|(_, row)| !row.is_empty())
}
