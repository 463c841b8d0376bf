//! Opcode-word field layout for the PIO instruction set.
//!
//! Every instruction is one 16-bit word. Bits [15:13] select the instruction
//! class, bits [12:8] hold the shared delay/side-set field, and the remaining
//! bits are class-specific operand fields extracted by the decoder.

/// Instruction classes selected by bits [15:13] of an opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum InstructionClass {
    Jmp = 0b000,
    Wait = 0b001,
    In = 0b010,
    Out = 0b011,
    PushPull = 0b100,
    Mov = 0b101,
    Irq = 0b110,
    Set = 0b111,
}

impl InstructionClass {
    /// Converts a 3-bit class selector into an instruction class.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Jmp),
            0b001 => Some(Self::Wait),
            0b010 => Some(Self::In),
            0b011 => Some(Self::Out),
            0b100 => Some(Self::PushPull),
            0b101 => Some(Self::Mov),
            0b110 => Some(Self::Irq),
            0b111 => Some(Self::Set),
            _ => None,
        }
    }
}

/// Extracts the class selector, bits [15:13].
#[must_use]
pub const fn class_bits(opcode: u16) -> u8 {
    ((opcode >> 13) & 0x7) as u8
}

/// Extracts the shared 3-bit selector field, bits [7:5].
///
/// Carries the jump condition, the OUT/IN/MOV/SET source or destination
/// selector, and the WAIT polarity/source pair depending on the class.
#[must_use]
pub const fn selector_bits(opcode: u16) -> u8 {
    ((opcode >> 5) & 0x7) as u8
}

/// Extracts the 5-bit operand field, bits [4:0].
///
/// Holds the jump target address, a bit count, a WAIT/IRQ index, or SET data
/// depending on the class.
#[must_use]
pub const fn index_bits(opcode: u16) -> u8 {
    (opcode & 0x1F) as u8
}

/// Splits the shared delay/side-set field, bits [12:8], into
/// `(side_set_value, delay_value)` for a configured side-set width.
///
/// `side_set_count` must be at most 5; the side-set value occupies the top
/// `side_set_count` bits of the field and the delay the remainder.
#[must_use]
pub const fn split_delay_side_set(opcode: u16, side_set_count: u8) -> (u8, u8) {
    let combined = ((opcode >> 8) & 0x1F) as u8;
    let width = if side_set_count > 5 {
        5
    } else {
        side_set_count
    };
    let delay_bits = 5 - width;
    let delay_mask = low_field_mask(delay_bits);

    (combined >> delay_bits, combined & delay_mask)
}

const fn low_field_mask(bits: u8) -> u8 {
    if bits >= 8 {
        u8::MAX
    } else {
        (1_u8 << bits) - 1
    }
}
