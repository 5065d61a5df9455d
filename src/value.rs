//! Width-safe unsigned values for dump tokens, and bit extraction over them.
//!
//! Words in a dump range from a single bit up to 512 bits, so token values
//! are kept as little-endian 64-bit limbs instead of a fixed machine integer.
//! All shifts are logical: no sign is ever carried into extracted bits.

use std::fmt;

use crate::{
    errors::{ParseError, SchemaError},
    slice::mask,
};

/// Numeric base a word's tokens are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radix(u32);

impl Radix {
    pub const DECIMAL: Radix = Radix(10);
    pub const HEX: Radix = Radix(16);

    pub fn new(radix: u32) -> Result<Self, SchemaError> {
        if (2..=36).contains(&radix) {
            Ok(Radix(radix))
        } else {
            Err(SchemaError::InvalidRadix(radix))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Radix {
    fn default() -> Self {
        Radix::HEX
    }
}

impl TryFrom<u32> for Radix {
    type Error = SchemaError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Radix::new(value)
    }
}

/// Arbitrary-width unsigned integer parsed from one token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WordValue {
    /// Little-endian limbs with no zero limb at the top; zero is empty.
    limbs: Vec<u64>,
}

impl From<u64> for WordValue {
    fn from(value: u64) -> Self {
        if value == 0 {
            WordValue::default()
        } else {
            WordValue { limbs: vec![value] }
        }
    }
}

impl From<u128> for WordValue {
    fn from(value: u128) -> Self {
        let mut out = WordValue {
            limbs: vec![value as u64, (value >> 64) as u64],
        };
        out.normalize();
        out
    }
}

impl WordValue {
    /// Parses `token` as a numeral in `radix`.
    ///
    /// Base-16 tokens may carry a `0x`/`0X` prefix. Anything else that is not
    /// a digit of the base fails; nothing is coerced to zero.
    pub fn parse(token: &str, radix: Radix) -> Result<Self, ParseError> {
        if token.is_empty() {
            return Err(ParseError::Empty);
        }

        let digits = if radix == Radix::HEX {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        } else {
            token
        };

        let invalid = || ParseError::InvalidDigit {
            token: token.to_string(),
            radix: radix.get(),
        };

        if digits.is_empty() {
            return Err(invalid());
        }

        let mut value = WordValue::default();
        for c in digits.chars() {
            let digit = c.to_digit(radix.get()).ok_or_else(invalid)?;
            value.mul_add(radix.get() as u64, digit as u64);
        }

        Ok(value)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Position of the highest set bit plus one; zero for zero.
    pub fn bit_len(&self) -> u32 {
        match self.limbs.last() {
            Some(top) => (self.limbs.len() as u32 - 1) * 64 + (64 - top.leading_zeros()),
            None => 0,
        }
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.as_slice() {
            [] => Some(0),
            [v] => Some(*v),
            _ => None,
        }
    }

    /// Reads `width` bits (at most 64) starting at bit `lsb`:
    /// `(value >> lsb) & ((1 << width) - 1)`.
    pub fn bits(&self, lsb: u32, width: u32) -> u64 {
        debug_assert!(width <= 64);

        let index = (lsb / 64) as usize;
        let offset = lsb % 64;

        let low = self.limb(index) >> offset;
        let high = if offset == 0 {
            0
        } else {
            self.limb(index + 1) << (64 - offset)
        };

        (low | high) & mask(width)
    }

    /// Whether bit `b` is set.
    pub fn bit(&self, b: u32) -> bool {
        self.bits(b, 1) == 1
    }

    /// Renders the value in `radix` with lowercase digits.
    pub fn to_string_radix(&self, radix: Radix) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let mut digits = Vec::new();
        let mut rest = self.clone();
        while !rest.is_zero() {
            let digit = rest.div_rem_small(radix.get() as u64);
            // digit < radix <= 36
            digits.push(char::from_digit(digit as u32, radix.get()).unwrap_or('?'));
        }

        digits.iter().rev().collect()
    }

    fn limb(&self, index: usize) -> u64 {
        self.limbs.get(index).copied().unwrap_or(0)
    }

    fn mul_add(&mut self, multiplier: u64, addend: u64) {
        let mut carry = addend as u128;
        for limb in self.limbs.iter_mut() {
            let t = (*limb as u128) * (multiplier as u128) + carry;
            *limb = t as u64;
            carry = t >> 64;
        }

        if carry != 0 {
            self.limbs.push(carry as u64);
        }
    }

    /// Divides in place and returns the remainder.
    fn div_rem_small(&mut self, divisor: u64) -> u64 {
        let mut rem = 0u128;
        for limb in self.limbs.iter_mut().rev() {
            let cur = (rem << 64) | (*limb as u128);
            *limb = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }

        self.normalize();
        rem as u64
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}

impl fmt::Display for WordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_string_radix(Radix::DECIMAL))
    }
}

impl fmt::LowerHex for WordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_string_radix(Radix::HEX))
    }
}
