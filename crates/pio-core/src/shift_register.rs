//! Output/input shift register model.
//!
//! A shift register is a 32-bit value plus a bit counter in `0..=32`. The
//! counter tracks bits already consumed when shifting out, and bits already
//! filled when shifting in. Every operation returns a new register; the
//! counter saturates at 32, matching the fixed-width hardware registers.

/// Width of a shift register in bits.
pub const SHIFT_REGISTER_WIDTH: u8 = 32;

/// Direction used when moving bits through a shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ShiftDirection {
    /// Most-significant bits move first.
    Left,
    /// Least-significant bits move first.
    #[default]
    Right,
}

/// Immutable 32-bit shift register with a consumed/filled bit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ShiftRegister {
    value: u32,
    count: u8,
}

/// Maps a 5-bit opcode bit-count field onto the number of bits to move.
///
/// Zero encodes a full 32-bit word (hardware convention); values above the
/// register width clamp to it.
#[must_use]
pub const fn effective_bit_count(bit_count: u8) -> u8 {
    if bit_count == 0 || bit_count > SHIFT_REGISTER_WIDTH {
        SHIFT_REGISTER_WIDTH
    } else {
        bit_count
    }
}

/// Mask covering the low `bits` bits of a 32-bit word.
#[must_use]
pub const fn low_bit_mask(bits: u8) -> u32 {
    if bits >= SHIFT_REGISTER_WIDTH {
        u32::MAX
    } else {
        (1_u32 << bits) - 1
    }
}

impl ShiftRegister {
    /// Creates a shift register, clamping the bit counter into `0..=32`.
    #[must_use]
    pub const fn new(value: u32, count: u8) -> Self {
        let count = if count > SHIFT_REGISTER_WIDTH {
            SHIFT_REGISTER_WIDTH
        } else {
            count
        };
        Self { value, count }
    }

    /// Returns the 32-bit register contents.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Returns the consumed/filled bit counter.
    #[must_use]
    pub const fn count(self) -> u8 {
        self.count
    }

    /// Returns `true` when the register holds a full unconsumed word.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.count == 0
    }

    /// Returns `true` when every bit has been consumed or filled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.count >= SHIFT_REGISTER_WIDTH
    }

    /// Returns `true` once the bit counter has reached `threshold`.
    #[must_use]
    pub const fn reaches_threshold(self, threshold: u8) -> bool {
        self.count >= threshold
    }

    /// Extracts `bit_count` bits (0 encodes 32) from the direction-dependent
    /// end of the register.
    ///
    /// Returns the extracted value together with the shifted residue; the bit
    /// counter advances by the number of bits moved, saturating at 32.
    #[must_use]
    pub const fn shift_out(self, bit_count: u8, direction: ShiftDirection) -> (u32, Self) {
        let bits = effective_bit_count(bit_count);

        let (extracted, residue) = if bits == SHIFT_REGISTER_WIDTH {
            (self.value, 0)
        } else {
            match direction {
                ShiftDirection::Left => (
                    self.value >> (SHIFT_REGISTER_WIDTH - bits),
                    self.value << bits,
                ),
                ShiftDirection::Right => (self.value & low_bit_mask(bits), self.value >> bits),
            }
        };

        (
            extracted,
            Self {
                value: residue,
                count: saturating_count(self.count, bits),
            },
        )
    }

    /// Merges `bit_count` bits (0 encodes 32) of `source` into the register
    /// at the direction-dictated end.
    ///
    /// The fill counter advances by the number of bits merged, saturating at
    /// 32; excess `source` bits are discarded.
    #[must_use]
    pub const fn shift_in(self, source: u32, bit_count: u8, direction: ShiftDirection) -> Self {
        let bits = effective_bit_count(bit_count);
        let masked = source & low_bit_mask(bits);

        let value = if bits == SHIFT_REGISTER_WIDTH {
            masked
        } else {
            match direction {
                ShiftDirection::Left => (self.value << bits) | masked,
                ShiftDirection::Right => {
                    (self.value >> bits) | (masked << (SHIFT_REGISTER_WIDTH - bits))
                }
            }
        };

        Self {
            value,
            count: saturating_count(self.count, bits),
        }
    }
}

const fn saturating_count(count: u8, bits: u8) -> u8 {
    let total = count.saturating_add(bits);
    if total > SHIFT_REGISTER_WIDTH {
        SHIFT_REGISTER_WIDTH
    } else {
        total
    }
}
