//! Simulation configuration threaded through decode, evaluate, and execute.

use crate::error::ConfigError;
use crate::shift_register::ShiftDirection;

/// Explicit, validated configuration for one emulated state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct EmulatorConfig {
    /// GPIO index tested by PIN-class jump conditions.
    pub jmp_pin: Option<u8>,
    /// Direction used by OUT-family shifts out of the OSR.
    pub osr_shift_direction: ShiftDirection,
    /// Direction used by IN-family shifts into the ISR.
    pub isr_shift_direction: ShiftDirection,
    /// First pin of the input mapping, used by `wait pin` relative indexes.
    pub in_pin_base: u8,
    /// First pin driven by the side-set field.
    pub side_set_base: u8,
    /// Number of consecutive pins driven by the side-set field (0 disables
    /// side-set; at most 5).
    pub side_set_count: u8,
}

impl EmulatorConfig {
    /// Checks that every configured pin index and window fits the modeled
    /// 32-bit pin word.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: a pin index at or above 32, a
    /// side-set width above 5, or a side-set window running past pin 31.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.jmp_pin {
            if index >= 32 {
                return Err(ConfigError::PinIndexOutOfRange { index });
            }
        }

        if self.in_pin_base >= 32 {
            return Err(ConfigError::PinIndexOutOfRange {
                index: self.in_pin_base,
            });
        }

        if self.side_set_count > 5 {
            return Err(ConfigError::SideSetTooWide {
                count: self.side_set_count,
            });
        }

        if self.side_set_count > 0 {
            if self.side_set_base >= 32 {
                return Err(ConfigError::PinIndexOutOfRange {
                    index: self.side_set_base,
                });
            }

            if self.side_set_base as u16 + self.side_set_count as u16 > 32 {
                return Err(ConfigError::SideSetWindowOutOfRange {
                    base: self.side_set_base,
                    count: self.side_set_count,
                });
            }
        }

        Ok(())
    }
}
