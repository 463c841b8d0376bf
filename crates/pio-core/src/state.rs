//! Machine-state snapshot for a single PIO state machine.

use crate::shift_register::ShiftRegister;

/// Immutable snapshot of the architectural state between clock cycles.
///
/// All fields default to zero. Execution never mutates a snapshot in place;
/// each cycle produces a wholly new value, so two snapshots compare equal
/// exactly when every architectural field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct State {
    /// Index of the next opcode to fetch.
    pub program_counter: u32,
    /// X scratch register.
    pub x_register: u32,
    /// Y scratch register.
    pub y_register: u32,
    /// Pin value bitmask; bit `n` holds the level of GPIO `n`.
    pub pin_values: u32,
    /// Pin direction bitmask; bit `n` set means GPIO `n` is driven as output.
    pub pin_directions: u32,
    /// Output shift register (OSR).
    pub output_shift_register: ShiftRegister,
    /// Input shift register (ISR).
    pub input_shift_register: ShiftRegister,
}
