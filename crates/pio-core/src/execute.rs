//! Instruction executor.
//!
//! One pure function per instruction family, fanned out from a single
//! exhaustive match. Every side effect is confined to the returned [`State`]
//! snapshot; no instruction touches anything the snapshot does not model.

use crate::condition::evaluate_condition;
use crate::config::EmulatorConfig;
use crate::decoder::{
    InSource, Instruction, JmpCondition, MovDestination, MovOperation, MovSource, OutDestination,
    SetDestination, WaitSource,
};
use crate::error::ConfigError;
use crate::shift_register::{effective_bit_count, low_bit_mask, ShiftRegister};
use crate::state::State;

/// Executes one decoded instruction against a state snapshot.
///
/// Total over the decoded instruction set: unknown bit patterns never reach
/// here because the decoder rejects them. The program counter advances by
/// one except where the instruction branches (`jmp`, `out pc`, `mov pc`) or
/// stalls (`wait` with an unmet condition).
///
/// # Errors
///
/// Returns [`ConfigError::MissingPin`] when a `jmp pin` is executed without
/// a configured jmp pin.
pub fn execute_instruction(
    state: &State,
    instruction: Instruction,
    config: &EmulatorConfig,
) -> Result<State, ConfigError> {
    match instruction {
        Instruction::Jmp { condition, address } => execute_jmp(state, condition, address, config),
        Instruction::Wait {
            polarity,
            source,
            index,
        } => Ok(execute_wait(state, polarity, source, index, config)),
        Instruction::In { source, bit_count } => Ok(execute_in(state, source, bit_count, config)),
        Instruction::Out {
            destination,
            bit_count,
        } => Ok(execute_out(state, destination, bit_count, config)),
        Instruction::Push { .. } => Ok(State {
            input_shift_register: ShiftRegister::new(0, 0),
            program_counter: advanced(state),
            ..*state
        }),
        Instruction::Pull { .. } => Ok(State {
            output_shift_register: ShiftRegister::new(state.x_register, 0),
            program_counter: advanced(state),
            ..*state
        }),
        Instruction::Mov {
            destination,
            operation,
            source,
        } => Ok(execute_mov(state, destination, operation, source)),
        Instruction::Irq { .. } | Instruction::Nop => Ok(State {
            program_counter: advanced(state),
            ..*state
        }),
        Instruction::Set { destination, data } => Ok(execute_set(state, destination, data)),
    }
}

const fn advanced(state: &State) -> u32 {
    state.program_counter.wrapping_add(1)
}

fn execute_jmp(
    state: &State,
    condition: JmpCondition,
    address: u8,
    config: &EmulatorConfig,
) -> Result<State, ConfigError> {
    let (taken, updated) = evaluate_condition(condition, state, config)?;
    let program_counter = if taken {
        u32::from(address)
    } else {
        advanced(&updated)
    };

    Ok(State {
        program_counter,
        ..updated
    })
}

const fn execute_out(
    state: &State,
    destination: OutDestination,
    bit_count: u8,
    config: &EmulatorConfig,
) -> State {
    let bits = effective_bit_count(bit_count);
    let (value, residue) = state
        .output_shift_register
        .shift_out(bit_count, config.osr_shift_direction);

    let mut next = State {
        output_shift_register: residue,
        program_counter: advanced(state),
        ..*state
    };

    match destination {
        OutDestination::Pins => {
            next.pin_values = merge_low_bits(state.pin_values, value, bits);
        }
        OutDestination::X => next.x_register = value,
        OutDestination::Y => next.y_register = value,
        OutDestination::Null => {}
        OutDestination::PinDirs => {
            next.pin_directions = merge_low_bits(state.pin_directions, value, bits);
        }
        OutDestination::Pc => next.program_counter = value,
        OutDestination::Isr => {
            next.input_shift_register = ShiftRegister::new(value, bits);
        }
        // Executing an injected instruction is out of scope; the shift
        // counter still advances.
        OutDestination::Exec => {}
    }

    next
}

const fn execute_in(
    state: &State,
    source: InSource,
    bit_count: u8,
    config: &EmulatorConfig,
) -> State {
    let value = match source {
        InSource::Pins => state.pin_values,
        InSource::X => state.x_register,
        InSource::Y => state.y_register,
        InSource::Null => 0,
        InSource::Isr => state.input_shift_register.value(),
        InSource::Osr => state.output_shift_register.value(),
    };

    State {
        input_shift_register: state.input_shift_register.shift_in(
            value,
            bit_count,
            config.isr_shift_direction,
        ),
        program_counter: advanced(state),
        ..*state
    }
}

const fn execute_mov(
    state: &State,
    destination: MovDestination,
    operation: MovOperation,
    source: MovSource,
) -> State {
    let raw = match source {
        MovSource::Pins => state.pin_values,
        MovSource::X => state.x_register,
        MovSource::Y => state.y_register,
        MovSource::Null => 0,
        MovSource::Isr => state.input_shift_register.value(),
        MovSource::Osr => state.output_shift_register.value(),
    };
    let value = match operation {
        MovOperation::Copy => raw,
        MovOperation::Invert => !raw,
        MovOperation::BitReverse => raw.reverse_bits(),
    };

    let mut next = State {
        program_counter: advanced(state),
        ..*state
    };

    match destination {
        MovDestination::Pins => next.pin_values = value,
        MovDestination::X => next.x_register = value,
        MovDestination::Y => next.y_register = value,
        // Executing an injected instruction is out of scope.
        MovDestination::Exec => {}
        MovDestination::Pc => next.program_counter = value,
        MovDestination::Isr => next.input_shift_register = ShiftRegister::new(value, 0),
        MovDestination::Osr => next.output_shift_register = ShiftRegister::new(value, 0),
    }

    next
}

fn execute_set(state: &State, destination: SetDestination, data: u8) -> State {
    let value = u32::from(data);
    let mut next = State {
        program_counter: advanced(state),
        ..*state
    };

    match destination {
        SetDestination::Pins => next.pin_values = value,
        SetDestination::X => next.x_register = value,
        SetDestination::Y => next.y_register = value,
        SetDestination::PinDirs => next.pin_directions = value,
    }

    next
}

const fn execute_wait(
    state: &State,
    polarity: bool,
    source: WaitSource,
    index: u8,
    config: &EmulatorConfig,
) -> State {
    let satisfied = match source {
        WaitSource::Gpio => pin_level(state.pin_values, index) == polarity,
        WaitSource::Pin => {
            pin_level(state.pin_values, config.in_pin_base.wrapping_add(index)) == polarity
        }
        // No IRQ flag state is modeled, so IRQ waits never stall.
        WaitSource::Irq => true,
    };

    if satisfied {
        State {
            program_counter: advanced(state),
            ..*state
        }
    } else {
        *state
    }
}

const fn pin_level(pin_values: u32, index: u8) -> bool {
    (pin_values >> (index & 0x1F)) & 1 == 1
}

const fn merge_low_bits(word: u32, value: u32, bits: u8) -> u32 {
    let mask = low_bit_mask(bits);
    (word & !mask) | (value & mask)
}
