//! Cycle-stepping emulation driver.
//!
//! The driver is a pull-driven lazy sequence: each clock cycle is computed
//! only when the consumer asks for it, and ceasing iteration is the only
//! cancellation mechanism needed. One step fetches the opcode at the program
//! counter, decodes it, executes it, applies the side-set field, and yields
//! the `(previous, new)` state pair.

use crate::config::EmulatorConfig;
use crate::decoder::decode;
use crate::encoding::split_delay_side_set;
use crate::error::{DecodeError, EmulatorError};
use crate::execute::execute_instruction;
use crate::shift_register::low_bit_mask;
use crate::state::State;

/// Samples the pin levels driven from outside the state machine.
///
/// Called once per clock cycle with the zero-based cycle number; bits of the
/// returned word overwrite `pin_values` wherever the pin direction marks an
/// input.
pub type InputSource<'a> = Box<dyn FnMut(u64) -> u32 + 'a>;

/// Lazy sequence of `(previous_state, new_state)` pairs, one per clock
/// cycle.
///
/// Produced by [`emulate`]. The sequence ends after yielding the pair for
/// which the stop predicate returns `true`, or with the error that ended a
/// step; without either it is infinite and the consumer bounds consumption.
pub struct Emulation<'a, F> {
    program: &'a [u16],
    config: EmulatorConfig,
    state: State,
    stop_when: F,
    input_source: Option<InputSource<'a>>,
    cycle: u64,
    finished: bool,
}

/// Creates a lazy emulation of `program` starting from `initial_state`.
///
/// The sequence stops after yielding the pair for which
/// `stop_when(&previous, &new)` returns `true`. Restarting means calling
/// `emulate` again; an in-progress sequence cannot be rewound.
///
/// # Errors
///
/// Returns a [`crate::ConfigError`] when `config` fails validation. Errors
/// arising per cycle (unknown opcodes, out-of-range fetches, a `jmp pin`
/// without a configured pin) surface as the failing element of the sequence
/// instead.
pub fn emulate<'a, F>(
    program: &'a [u16],
    initial_state: State,
    stop_when: F,
    config: &EmulatorConfig,
) -> Result<Emulation<'a, F>, crate::error::ConfigError>
where
    F: FnMut(&State, &State) -> bool,
{
    config.validate()?;

    Ok(Emulation {
        program,
        config: *config,
        state: initial_state,
        stop_when,
        input_source: None,
        cycle: 0,
        finished: false,
    })
}

impl<'a, F> Emulation<'a, F> {
    /// Attaches an input source sampled at the start of every cycle.
    #[must_use]
    pub fn with_input_source(mut self, source: InputSource<'a>) -> Self {
        self.input_source = Some(source);
        self
    }

    fn step(&mut self) -> Result<(State, State), EmulatorError> {
        let previous = self.state;

        let mut current = previous;
        if let Some(source) = self.input_source.as_mut() {
            let sampled = source(self.cycle);
            current.pin_values = (current.pin_values & current.pin_directions)
                | (sampled & !current.pin_directions);
        }

        let opcode = usize::try_from(current.program_counter)
            .ok()
            .and_then(|index| self.program.get(index).copied())
            .ok_or(DecodeError::ProgramCounterOutOfRange {
                program_counter: current.program_counter,
                program_length: self.program.len(),
            })?;

        let instruction = decode(opcode)?;
        let mut new_state = execute_instruction(&current, instruction, &self.config)?;

        if self.config.side_set_count > 0 {
            let (side_set, _delay) = split_delay_side_set(opcode, self.config.side_set_count);
            new_state.pin_values = apply_side_set(
                new_state.pin_values,
                self.config.side_set_base,
                self.config.side_set_count,
                side_set,
            );
        }

        self.cycle += 1;
        self.state = new_state;

        Ok((previous, new_state))
    }
}

impl<F> Iterator for Emulation<'_, F>
where
    F: FnMut(&State, &State) -> bool,
{
    type Item = Result<(State, State), EmulatorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.step();
        match &result {
            Ok((previous, new_state)) => {
                if (self.stop_when)(previous, new_state) {
                    self.finished = true;
                }
            }
            Err(_) => self.finished = true,
        }

        Some(result)
    }
}

/// Builds a stop predicate that is true once `cycles` pairs have been
/// yielded.
///
/// The cycle count lives in the returned closure, not in [`State`].
pub fn clock_cycles_reached(cycles: u64) -> impl FnMut(&State, &State) -> bool {
    let mut elapsed = 0_u64;
    move |_, _| {
        elapsed += 1;
        elapsed >= cycles
    }
}

/// Runs exactly one clock cycle and returns its state pair.
///
/// # Errors
///
/// Returns any configuration, fetch, or decode failure for that single
/// cycle.
pub fn step_once(
    program: &[u16],
    initial_state: State,
    config: &EmulatorConfig,
) -> Result<(State, State), EmulatorError> {
    let mut emulation = emulate(program, initial_state, clock_cycles_reached(1), config)?;
    emulation.step()
}

const fn apply_side_set(pin_values: u32, base: u8, count: u8, value: u8) -> u32 {
    let mask = low_bit_mask(count) << base;
    (pin_values & !mask) | (((value as u32) << base) & mask)
}
