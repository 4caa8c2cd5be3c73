//! Fixed-width unsigned values used for symbols, outputs and state codes

use crate::structmap::Identity;
use crate::FsmError;

use std::fmt;
use std::str::FromStr;

/// Largest supported width, the magnitude is stored in a single machine word
pub const MAX_WIDTH: u32 = 64;

/// An immutable unsigned integer with an explicit width.
///
/// Two bit-vectors are equal only if they have the same magnitude *and* the same width:
/// the value 1 on one bit is not the same key as the value 1 on two bits.
/// Bit position 0 is the least significant bit.
///
/// Bit-vectors are displayed (and parsed) as zero-padded binary strings, most significant bit first.
///
/// ```
/// use fsmkit::BitVector;
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let code = BitVector::new(1, 2)?;
/// let symbol: BitVector = "1".parse()?;
///
/// // The first operand takes the high-order bits
/// let minterm = BitVector::concat([&code, &symbol])?;
/// assert_eq!(minterm.to_string(), "011");
/// assert!(minterm.bit_at(0));
/// assert!(!minterm.bit_at(2));
/// # Ok(())
/// # }
/// ```
// The field order gives an ordering by width first, then by magnitude
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct BitVector {
    width: u32,
    magnitude: u64,
}

impl BitVector {
    /// Create a bit-vector, rejecting magnitudes which do not fit in the width
    pub fn new(magnitude: u64, width: u32) -> Result<Self, FsmError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(FsmError::InvalidWidth(width));
        }
        if width < MAX_WIDTH && magnitude >> width != 0 {
            return Err(FsmError::MagnitudeOverflow { magnitude, width });
        }
        Ok(Self { width, magnitude })
    }

    /// The null value on the given width
    pub fn zero(width: u32) -> Result<Self, FsmError> {
        Self::new(0, width)
    }

    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Test a single bit, position 0 being the least significant one.
    ///
    /// Positions beyond the width are always false.
    pub fn bit_at(&self, position: u32) -> bool {
        position < self.width && (self.magnitude >> position) & 1 == 1
    }

    /// Iterate over the bits, starting with the most significant one
    pub fn iter_msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).rev().map(move |p| self.bit_at(p))
    }

    /// Concatenate bit-vectors, the first operand ending up in the most significant position.
    ///
    /// The width of the result is the sum of all widths.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a BitVector>) -> Result<Self, FsmError> {
        let mut magnitude = 0u64;
        let mut width = 0u32;
        let mut empty = true;
        for part in parts {
            empty = false;
            width += part.width;
            if width > MAX_WIDTH {
                return Err(FsmError::InvalidWidth(width));
            }
            // A full-width shift of a zero accumulator is still zero
            magnitude = magnitude.checked_shl(part.width).unwrap_or(0) | part.magnitude;
        }
        if empty {
            return Err(FsmError::EmptyConcat);
        }
        Self::new(magnitude, width)
    }

    /// Number of bits needed to write a value, at least one
    pub fn minimal_width(value: u64) -> u32 {
        (MAX_WIDTH - value.leading_zeros()).max(1)
    }
}

impl Identity for BitVector {
    type Id = (u32, u64);

    fn identity(&self) -> Self::Id {
        (self.width, self.magnitude)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:0w$b}", self.magnitude, w = self.width as usize)
    }
}

impl FromStr for BitVector {
    type Err = FsmError;

    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let mut magnitude = 0u64;
        let mut width = 0u32;
        for c in descr.chars() {
            let bit = match c {
                ' ' | '\t' | '\'' => continue, // skip spacing and ' for formatting
                '0' => 0,
                '1' => 1,
                _ => return Err(FsmError::InvalidBinaryString(descr.into())),
            };
            width += 1;
            if width > MAX_WIDTH {
                return Err(FsmError::InvalidWidth(width));
            }
            magnitude = (magnitude << 1) | bit;
        }
        if width == 0 {
            return Err(FsmError::InvalidBinaryString(descr.into()));
        }
        Self::new(magnitude, width)
    }
}
