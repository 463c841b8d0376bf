//! Cycle-accurate emulator core for the RP2040 PIO state machine.
//!
//! Executes a PIO program (a sequence of 16-bit opcodes) one clock cycle at
//! a time against an immutable [`State`] snapshot, yielding the
//! `(previous_state, new_state)` pair for every cycle as a lazy, pull-driven
//! sequence. Everything is a pure function over value types: no I/O, no
//! shared mutable state, no wall-clock coupling.
//!
//! ```
//! use pio_core::{clock_cycles_reached, emulate, EmulatorConfig, State};
//!
//! let program = [0xE023, 0xA042]; // set x, 3 ; nop
//! let config = EmulatorConfig::default();
//!
//! let mut cycles =
//!     emulate(&program, State::default(), clock_cycles_reached(1), &config).unwrap();
//! let (_, after) = cycles.next().unwrap().unwrap();
//!
//! assert_eq!(after.x_register, 3);
//! assert_eq!(after.program_counter, 1);
//! ```

/// Shift register model primitives.
pub mod shift_register;
pub use shift_register::{
    effective_bit_count, low_bit_mask, ShiftDirection, ShiftRegister, SHIFT_REGISTER_WIDTH,
};

/// Machine-state snapshot.
pub mod state;
pub use state::State;

/// Opcode-word field layout.
pub mod encoding;
pub use encoding::{
    class_bits, index_bits, selector_bits, split_delay_side_set, InstructionClass,
};

/// Error taxonomy for decode, configuration, and emulation failures.
pub mod error;
pub use error::{ConfigError, DecodeError, EmulatorError};

/// Opcode decoder producing typed instruction variants.
pub mod decoder;
pub use decoder::{
    decode, InSource, Instruction, JmpCondition, MovDestination, MovOperation, MovSource,
    OutDestination, SetDestination, WaitSource,
};

/// Simulation configuration.
pub mod config;
pub use config::EmulatorConfig;

/// Jump-condition evaluation.
pub mod condition;
pub use condition::evaluate_condition;

/// Instruction executor.
pub mod execute;
pub use execute::execute_instruction;

/// Cycle-stepping emulation driver.
pub mod emulation;
pub use emulation::{clock_cycles_reached, emulate, step_once, Emulation, InputSource};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
