//! Bit slices: the position of a field inside a word.
//!
//! Bits are numbered from the least significant end: bit 0 is the lowest bit
//! of the word's numeric value.

use std::fmt;

use crate::errors::SchemaError;

/// A single bit or an inclusive `msb..=lsb` range of bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// One bit at the given position, written `[b]`.
    Bit(u32),
    /// Inclusive bit range, written `[msb, lsb]`.
    Range { msb: u32, lsb: u32 },
}

impl Slice {
    pub fn bit(b: u32) -> Self {
        Slice::Bit(b)
    }

    pub fn range(msb: u32, lsb: u32) -> Self {
        Slice::Range { msb, lsb }
    }

    /// Builds a slice from its list form: `[b]` or `[msb, lsb]`.
    pub fn from_indices(indices: &[u32]) -> Result<Self, SchemaError> {
        match *indices {
            [b] => Ok(Slice::Bit(b)),
            [msb, lsb] => Ok(Slice::Range { msb, lsb }),
            _ => Err(SchemaError::InvalidSliceArity(indices.len())),
        }
    }

    /// The list form of this slice.
    pub fn indices(&self) -> Vec<u32> {
        match *self {
            Slice::Bit(b) => vec![b],
            Slice::Range { msb, lsb } => vec![msb, lsb],
        }
    }

    /// Highest bit covered. A single bit is its own msb.
    pub fn msb(&self) -> u32 {
        match *self {
            Slice::Bit(b) => b,
            Slice::Range { msb, .. } => msb,
        }
    }

    /// Lowest bit covered, also the right-shift applied before masking.
    pub fn lsb(&self) -> u32 {
        match *self {
            Slice::Bit(b) => b,
            Slice::Range { lsb, .. } => lsb,
        }
    }

    pub fn shift(&self) -> u32 {
        self.lsb()
    }

    /// Number of bits covered. Only meaningful when `msb >= lsb`; saturates
    /// at `u32::MAX` for a slice spanning every bit index.
    pub fn width(&self) -> u32 {
        self.msb().saturating_sub(self.lsb()).saturating_add(1)
    }

    /// `(1 << width) - 1`, saturating to all ones at 64 bits and above.
    pub fn mask(&self) -> u64 {
        mask(self.width())
    }

    /// Hex digits needed to show any value of this slice.
    pub fn char_width(&self) -> usize {
        self.width().div_ceil(4) as usize
    }
}

/// Low `width` bits set.
pub(crate) fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Bit(b) => write!(f, "{b}"),
            Slice::Range { msb, lsb } => write!(f, "{msb}:{lsb}"),
        }
    }
}
