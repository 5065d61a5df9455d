//! Word types: one column type of a record line.

use crate::{
    field::FieldSpec,
    slice::Slice,
    value::{Radix, WordValue},
};

/// Bit width assumed when a word does not declare one.
pub const DEFAULT_WIDTH: u32 = 64;

/// Width for a word that declares none: [DEFAULT_WIDTH], or one past the
/// highest field bit when that is larger.
pub fn fitted_width(attributes: &[FieldSpec]) -> u32 {
    attributes
        .iter()
        .map(|f| f.slice.msb().saturating_add(1))
        .fold(DEFAULT_WIDTH, u32::max)
}

/// One word type of a dump: name, repeat count, base, width and fields.
///
/// A word with `size > 1` occupies `size` consecutive columns. All of them
/// share this one `WordSpec`, so every repetition decodes with the same layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpec {
    /// Name used for lookup and column labels; unique within a schema.
    pub name: String,
    /// Number of consecutive columns this word occupies.
    pub size: usize,
    /// Base tokens are written in.
    pub base: Radix,
    /// Declared bit width, used for validation and zero-padded rendering.
    pub width: u32,
    /// Fields in declaration order. Empty for opaque words.
    pub attributes: Vec<FieldSpec>,
}

impl WordSpec {
    /// A single-column, 64-bit word with no fields.
    pub fn new(name: impl Into<String>, base: Radix) -> Self {
        WordSpec {
            name: name.into(),
            size: 1,
            base,
            width: DEFAULT_WIDTH,
            attributes: Vec::new(),
        }
    }

    pub fn repeated(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, slice: Slice) -> Self {
        self.attributes.push(FieldSpec::new(name, slice));
        self
    }

    pub fn is_opaque(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Column header for repetition `offset`: `name` or `name#offset`.
    pub fn label(&self, offset: usize) -> String {
        if self.size > 1 {
            format!("{}#{}", self.name, offset)
        } else {
            self.name.clone()
        }
    }

    /// Digits needed to show the full width in this word's base.
    pub fn char_width(&self) -> usize {
        if self.base == Radix::HEX {
            self.width.div_ceil(4) as usize
        } else {
            0
        }
    }

    /// Renders a value the way the word is displayed: hex words are padded to
    /// their full width, other bases are written without padding.
    pub fn format(&self, value: &WordValue) -> String {
        let digits = value.to_string_radix(self.base);
        format!("{digits:0>width$}", width = self.char_width())
    }

    /// Looks up one of this word's fields by name.
    pub fn attribute(&self, name: &str) -> Option<&FieldSpec> {
        self.attributes.iter().find(|f| f.name == name)
    }
}
