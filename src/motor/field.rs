// Fixed-width field encoding for RLINK command payloads
//
// Every physical quantity is mapped onto an unsigned integer code of a
// given bit width, then the codes are concatenated MSB-first into bytes.

use super::rlink::{Result, RlinkError};

/// Bit width and physical range of one payload field.
///
/// Only constructible through `new`, so `bits` is always 1..=32 and
/// `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    bits: u32,
    min: f64,
    max: f64,
}

impl FieldSpec {
    pub const fn new(bits: u32, min: f64, max: f64) -> Self {
        assert!(bits > 0 && bits <= 32, "field width must be 1..=32 bits");
        assert!(min < max, "field range must be non-empty");
        Self { bits, min, max }
    }

    pub const fn bits(&self) -> u32 {
        self.bits
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Largest code representable in this field
    pub const fn max_code(&self) -> u32 {
        if self.bits == 32 {
            u32::MAX
        } else {
            (1 << self.bits) - 1
        }
    }

    /// Map a physical value onto `0..=max_code()`.
    ///
    /// Out-of-range input is clamped. The scaled value is truncated, not
    /// rounded: the motor firmware expects exactly this mapping.
    pub fn quantize(&self, value: f64) -> u32 {
        // NaN clamps to the bottom of the range
        let clamped = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        let ratio = self.max_code() as f64 / (self.max - self.min);
        ((clamped - self.min) * ratio) as u32
    }
}

/// Concatenate `(code, bits)` pairs MSB-first into a byte buffer.
///
/// The total width must be a whole number of bytes; the buffer is never
/// padded.
pub fn pack(fields: &[(u32, u32)]) -> Result<Vec<u8>> {
    let total_bits: u32 = fields.iter().map(|&(_, bits)| bits).sum();
    if total_bits % 8 != 0 {
        return Err(RlinkError::FieldWidth { total_bits });
    }

    let mut out = Vec::with_capacity((total_bits / 8) as usize);
    // Pending bits, right-aligned in `acc`
    let mut acc: u64 = 0;
    let mut pending: u32 = 0;

    for &(value, bits) in fields {
        if bits == 0 || bits > 32 || (bits < 32 && value >> bits != 0) {
            return Err(RlinkError::FieldOverflow { value, bits });
        }

        acc = (acc << bits) | value as u64;
        pending += bits;

        while pending >= 8 {
            pending -= 8;
            out.push((acc >> pending) as u8);
        }
        acc &= (1u64 << pending) - 1;
    }

    Ok(out)
}
