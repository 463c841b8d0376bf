//! Jump-condition evaluation.
//!
//! The post-decrement conditions mutate a scratch register as a side effect
//! of being evaluated, so evaluation and state update are coupled: the
//! evaluator returns the branch decision together with the state the
//! executor must continue from.

use crate::config::EmulatorConfig;
use crate::decoder::JmpCondition;
use crate::error::ConfigError;
use crate::state::State;

/// Evaluates a jump condition against a state snapshot.
///
/// Returns whether the branch is taken and the state after any coupled
/// register mutation. For `x--`/`y--` the branch decision reads the old
/// value and the register decrements only when that value was non-zero; at
/// zero the register is left unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::MissingPin`] when the `pin` condition is evaluated
/// without a configured jmp pin.
pub const fn evaluate_condition(
    condition: JmpCondition,
    state: &State,
    config: &EmulatorConfig,
) -> Result<(bool, State), ConfigError> {
    match condition {
        JmpCondition::Always => Ok((true, *state)),
        JmpCondition::XZero => Ok((state.x_register == 0, *state)),
        JmpCondition::XDecNonZero => {
            let taken = state.x_register != 0;
            let updated = if taken {
                State {
                    x_register: state.x_register - 1,
                    ..*state
                }
            } else {
                *state
            };
            Ok((taken, updated))
        }
        JmpCondition::YZero => Ok((state.y_register == 0, *state)),
        JmpCondition::YDecNonZero => {
            let taken = state.y_register != 0;
            let updated = if taken {
                State {
                    y_register: state.y_register - 1,
                    ..*state
                }
            } else {
                *state
            };
            Ok((taken, updated))
        }
        JmpCondition::XNotEqualY => Ok((state.x_register != state.y_register, *state)),
        JmpCondition::Pin => {
            let Some(pin) = config.jmp_pin else {
                return Err(ConfigError::MissingPin);
            };
            let taken = (state.pin_values >> (pin & 0x1F)) & 1 == 1;
            Ok((taken, *state))
        }
        JmpCondition::OsrNotEmpty => Ok((!state.output_shift_register.is_empty(), *state)),
    }
}
