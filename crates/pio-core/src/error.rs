//! Error taxonomy for decode, configuration, and emulation failures.
//!
//! Every operation in the core is a pure, deterministic function, so no
//! retry path exists: each error propagates immediately out of the lazy
//! sequence at the step it occurs, with no partial state emitted.

use thiserror::Error;

/// Errors produced while decoding opcodes or fetching them from a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    /// The opcode bit pattern has no defined instruction or operand mapping.
    #[error("opcode {opcode:#06x} has no defined instruction mapping")]
    UnknownOpcode {
        /// Raw 16-bit opcode word.
        opcode: u16,
    },
    /// The program counter indexes past the end of the supplied program.
    #[error("program counter {program_counter} is outside program of {program_length} opcodes")]
    ProgramCounterOutOfRange {
        /// Program counter at the failing fetch.
        program_counter: u32,
        /// Number of opcodes in the program.
        program_length: usize,
    },
}

/// Errors produced by configuration validation or configuration-dependent
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// A PIN-class jump condition was evaluated without a configured jmp pin.
    #[error("jmp pin condition evaluated without a configured pin")]
    MissingPin,
    /// A configured pin index does not fit the 32-bit pin word.
    #[error("pin index {index} is outside the 32-bit pin word")]
    PinIndexOutOfRange {
        /// Offending pin index.
        index: u8,
    },
    /// The side-set width exceeds the 5-bit delay/side-set field.
    #[error("side-set count {count} exceeds the 5-bit delay/side-set field")]
    SideSetTooWide {
        /// Configured side-set width.
        count: u8,
    },
    /// The side-set pin window extends past the last pin.
    #[error("side-set window [{base}, {base}+{count}) extends past pin 31")]
    SideSetWindowOutOfRange {
        /// First side-set pin.
        base: u8,
        /// Configured side-set width.
        count: u8,
    },
}

/// Any failure surfaced by the emulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum EmulatorError {
    /// Opcode decode or fetch failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DecodeError, EmulatorError};

    #[test]
    fn decode_errors_render_the_failing_opcode_and_fetch() {
        let unknown = DecodeError::UnknownOpcode { opcode: 0x4085 };
        assert_eq!(
            unknown.to_string(),
            "opcode 0x4085 has no defined instruction mapping"
        );

        let out_of_range = DecodeError::ProgramCounterOutOfRange {
            program_counter: 2,
            program_length: 2,
        };
        assert_eq!(
            out_of_range.to_string(),
            "program counter 2 is outside program of 2 opcodes"
        );
    }

    #[test]
    fn emulator_error_wraps_both_taxonomies_transparently() {
        let decode: EmulatorError = DecodeError::UnknownOpcode { opcode: 0 }.into();
        assert!(matches!(decode, EmulatorError::Decode(_)));

        let config: EmulatorError = ConfigError::MissingPin.into();
        assert!(matches!(config, EmulatorError::Config(_)));
        assert_eq!(
            config.to_string(),
            ConfigError::MissingPin.to_string(),
            "transparent wrapper must not add message text"
        );
    }
}
