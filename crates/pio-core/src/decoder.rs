//! Opcode decoder for the PIO instruction set.
//!
//! Maps each 16-bit opcode word onto a typed [`Instruction`] variant with its
//! operand fields extracted, rejecting reserved bit patterns with
//! [`DecodeError::UnknownOpcode`]. Decoding is a pure function with no side
//! effects; all execution semantics live in [`crate::execute`].

use crate::encoding::{class_bits, index_bits, selector_bits, InstructionClass};
use crate::error::DecodeError;

/// Jump conditions, bits [7:5] of a JMP opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JmpCondition {
    /// Branch unconditionally.
    Always,
    /// Branch when the X register is zero (`!x`).
    XZero,
    /// Branch when X is non-zero, then decrement it (`x--`).
    XDecNonZero,
    /// Branch when the Y register is zero (`!y`).
    YZero,
    /// Branch when Y is non-zero, then decrement it (`y--`).
    YDecNonZero,
    /// Branch when X and Y differ (`x!=y`).
    XNotEqualY,
    /// Branch on the configured jmp pin being high (`pin`).
    Pin,
    /// Branch while the OSR still holds unshifted data (`!osre`).
    OsrNotEmpty,
}

impl JmpCondition {
    /// Converts a 3-bit condition code into a jump condition.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Always),
            0b001 => Some(Self::XZero),
            0b010 => Some(Self::XDecNonZero),
            0b011 => Some(Self::YZero),
            0b100 => Some(Self::YDecNonZero),
            0b101 => Some(Self::XNotEqualY),
            0b110 => Some(Self::Pin),
            0b111 => Some(Self::OsrNotEmpty),
            _ => None,
        }
    }
}

/// OUT destinations, bits [7:5] of an OUT opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OutDestination {
    Pins,
    X,
    Y,
    Null,
    PinDirs,
    Pc,
    Isr,
    Exec,
}

impl OutDestination {
    /// Converts a 3-bit destination selector into an OUT destination.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Pins),
            0b001 => Some(Self::X),
            0b010 => Some(Self::Y),
            0b011 => Some(Self::Null),
            0b100 => Some(Self::PinDirs),
            0b101 => Some(Self::Pc),
            0b110 => Some(Self::Isr),
            0b111 => Some(Self::Exec),
            _ => None,
        }
    }
}

/// IN sources, bits [7:5] of an IN opcode. Selectors `0b100` and `0b101` are
/// reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum InSource {
    Pins,
    X,
    Y,
    Null,
    Isr,
    Osr,
}

impl InSource {
    /// Converts a 3-bit source selector into an IN source.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Pins),
            0b001 => Some(Self::X),
            0b010 => Some(Self::Y),
            0b011 => Some(Self::Null),
            0b110 => Some(Self::Isr),
            0b111 => Some(Self::Osr),
            _ => None,
        }
    }
}

/// MOV destinations, bits [7:5] of a MOV opcode. Selector `0b011` is
/// reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MovDestination {
    Pins,
    X,
    Y,
    Exec,
    Pc,
    Isr,
    Osr,
}

impl MovDestination {
    /// Converts a 3-bit destination selector into a MOV destination.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Pins),
            0b001 => Some(Self::X),
            0b010 => Some(Self::Y),
            0b100 => Some(Self::Exec),
            0b101 => Some(Self::Pc),
            0b110 => Some(Self::Isr),
            0b111 => Some(Self::Osr),
            _ => None,
        }
    }
}

/// MOV sources, bits [2:0] of a MOV opcode. Selectors `0b100` (reserved) and
/// `0b101` (STATUS, which depends on unmodeled FIFO levels) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MovSource {
    Pins,
    X,
    Y,
    Null,
    Isr,
    Osr,
}

impl MovSource {
    /// Converts a 3-bit source selector into a MOV source.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Pins),
            0b001 => Some(Self::X),
            0b010 => Some(Self::Y),
            0b011 => Some(Self::Null),
            0b110 => Some(Self::Isr),
            0b111 => Some(Self::Osr),
            _ => None,
        }
    }
}

/// MOV source transformations, bits [4:3] of a MOV opcode. Selector `0b11`
/// is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovOperation {
    /// Copy the source value unchanged.
    Copy,
    /// Bitwise complement of the source value.
    Invert,
    /// Reverse the 32 source bits end to end.
    BitReverse,
}

impl MovOperation {
    /// Converts a 2-bit operation selector into a MOV operation.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Copy),
            0b01 => Some(Self::Invert),
            0b10 => Some(Self::BitReverse),
            _ => None,
        }
    }
}

/// WAIT sources, bits [6:5] of a WAIT opcode. Selector `0b11` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitSource {
    /// Absolute GPIO index into the pin value word.
    Gpio,
    /// Pin index relative to the configured input pin base.
    Pin,
    /// State-machine IRQ flag (no IRQ flag state is modeled).
    Irq,
}

impl WaitSource {
    /// Converts a 2-bit source selector into a WAIT source.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Gpio),
            0b01 => Some(Self::Pin),
            0b10 => Some(Self::Irq),
            _ => None,
        }
    }
}

/// SET destinations, bits [7:5] of a SET opcode. All other selectors are
/// reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SetDestination {
    Pins,
    X,
    Y,
    PinDirs,
}

impl SetDestination {
    /// Converts a 3-bit destination selector into a SET destination.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Pins),
            0b001 => Some(Self::X),
            0b010 => Some(Self::Y),
            0b100 => Some(Self::PinDirs),
            _ => None,
        }
    }
}

/// A decoded PIO instruction with its operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Conditional branch to a 5-bit program address.
    Jmp {
        /// Condition deciding whether the branch is taken.
        condition: JmpCondition,
        /// Branch target, an index into the program.
        address: u8,
    },
    /// Stall until a pin or IRQ condition is met.
    Wait {
        /// Level the polled bit must reach.
        polarity: bool,
        /// What the instruction polls.
        source: WaitSource,
        /// 5-bit pin or IRQ index.
        index: u8,
    },
    /// Shift bits from a source into the input shift register.
    In {
        /// Where the shifted-in bits come from.
        source: InSource,
        /// Number of bits to shift (0 encodes 32).
        bit_count: u8,
    },
    /// Shift bits out of the output shift register into a destination.
    Out {
        /// Where the shifted-out bits go.
        destination: OutDestination,
        /// Number of bits to shift (0 encodes 32).
        bit_count: u8,
    },
    /// Empty the input shift register (the FIFO hand-off is not modeled).
    Push {
        /// Only push once the ISR threshold is reached.
        if_full: bool,
        /// Stall rather than drop when the FIFO is full (unmodeled).
        block: bool,
    },
    /// Refill the output shift register (the FIFO itself is not modeled).
    Pull {
        /// Only pull once the OSR threshold is reached.
        if_empty: bool,
        /// Stall rather than copy X when the FIFO is empty (unmodeled).
        block: bool,
    },
    /// Route a transformed 32-bit value from a source to a destination.
    Mov {
        /// Where the value is written.
        destination: MovDestination,
        /// Transformation applied while moving.
        operation: MovOperation,
        /// Where the value is read from.
        source: MovSource,
    },
    /// Raise or clear a state-machine IRQ flag (no flag state is modeled).
    Irq {
        /// Clear the flag instead of raising it.
        clear: bool,
        /// Wait for the raised flag to be acknowledged.
        wait: bool,
        /// 5-bit IRQ index field.
        index: u8,
    },
    /// Write a 5-bit immediate to a destination.
    Set {
        /// Where the immediate is written.
        destination: SetDestination,
        /// 5-bit immediate value.
        data: u8,
    },
    /// No operation, encoded as `mov y, y`.
    Nop,
}

/// Decodes a 16-bit opcode word into a typed instruction.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownOpcode`] when the class or selector bits do
/// not map onto a defined instruction, destination, source, or operation.
pub fn decode(opcode: u16) -> Result<Instruction, DecodeError> {
    let unknown = DecodeError::UnknownOpcode { opcode };

    let Some(class) = InstructionClass::from_u3(class_bits(opcode)) else {
        return Err(unknown);
    };

    match class {
        InstructionClass::Jmp => {
            let condition = JmpCondition::from_u3(selector_bits(opcode)).ok_or(unknown)?;
            Ok(Instruction::Jmp {
                condition,
                address: index_bits(opcode),
            })
        }
        InstructionClass::Wait => {
            let source = WaitSource::from_u2(((opcode >> 5) & 0x3) as u8).ok_or(unknown)?;
            Ok(Instruction::Wait {
                polarity: (opcode & 0x0080) != 0,
                source,
                index: index_bits(opcode),
            })
        }
        InstructionClass::In => {
            let source = InSource::from_u3(selector_bits(opcode)).ok_or(unknown)?;
            Ok(Instruction::In {
                source,
                bit_count: index_bits(opcode),
            })
        }
        InstructionClass::Out => {
            let destination = OutDestination::from_u3(selector_bits(opcode)).ok_or(unknown)?;
            Ok(Instruction::Out {
                destination,
                bit_count: index_bits(opcode),
            })
        }
        InstructionClass::PushPull => {
            if index_bits(opcode) != 0 {
                return Err(unknown);
            }

            let if_threshold = (opcode & 0x0040) != 0;
            let block = (opcode & 0x0020) != 0;
            if (opcode & 0x0080) == 0 {
                Ok(Instruction::Push {
                    if_full: if_threshold,
                    block,
                })
            } else {
                Ok(Instruction::Pull {
                    if_empty: if_threshold,
                    block,
                })
            }
        }
        InstructionClass::Mov => {
            let destination = MovDestination::from_u3(selector_bits(opcode)).ok_or(unknown)?;
            let operation = MovOperation::from_u2(((opcode >> 3) & 0x3) as u8).ok_or(unknown)?;
            let source = MovSource::from_u3((opcode & 0x7) as u8).ok_or(unknown)?;

            if matches!(
                (destination, operation, source),
                (MovDestination::Y, MovOperation::Copy, MovSource::Y)
            ) {
                return Ok(Instruction::Nop);
            }

            Ok(Instruction::Mov {
                destination,
                operation,
                source,
            })
        }
        InstructionClass::Irq => {
            if (opcode & 0x0080) != 0 {
                return Err(unknown);
            }

            Ok(Instruction::Irq {
                clear: (opcode & 0x0040) != 0,
                wait: (opcode & 0x0020) != 0,
                index: index_bits(opcode),
            })
        }
        InstructionClass::Set => {
            let destination = SetDestination::from_u3(selector_bits(opcode)).ok_or(unknown)?;
            Ok(Instruction::Set {
                destination,
                data: index_bits(opcode),
            })
        }
    }
}
