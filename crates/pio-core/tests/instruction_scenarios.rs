//! Single-instruction conformance scenarios for the jmp and out families.

use proptest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use rstest::rstest;

use pio_core::{
    clock_cycles_reached, emulate, step_once, EmulatorConfig, ShiftDirection, ShiftRegister,
    State,
};

const NOP: u16 = 0xA042;

fn single_cycle(opcode: u16, initial_state: State, config: &EmulatorConfig) -> State {
    let (_, new_state) =
        step_once(&[opcode, NOP], initial_state, config).expect("scenario opcode must execute");
    new_state
}

#[test]
fn jmp_always_branches_forward() {
    let new_state = single_cycle(0x0007, State::default(), &EmulatorConfig::default());
    assert_eq!(new_state.program_counter, 7);
}

#[rstest]
#[case::not_x_when_x_is_0(0x0020, State { x_register: 0, ..State::default() }, 0)]
#[case::not_x_when_x_is_1(0x0020, State { x_register: 1, ..State::default() }, 1)]
#[case::not_y_when_y_is_0(0x0062, State { y_register: 0, ..State::default() }, 2)]
#[case::not_y_when_y_is_1(0x0062, State { y_register: 1, ..State::default() }, 1)]
#[case::x_ne_y_when_equal(0x00BF, State { x_register: 1, y_register: 1, ..State::default() }, 1)]
#[case::x_ne_y_when_different(0x00BF, State { x_register: 1, y_register: 2, ..State::default() }, 31)]
fn jmp_scratch_register_conditions(
    #[case] opcode: u16,
    #[case] initial_state: State,
    #[case] expected_program_counter: u32,
) {
    let new_state = single_cycle(opcode, initial_state, &EmulatorConfig::default());
    assert_eq!(new_state.program_counter, expected_program_counter);
}

#[test]
fn jmp_x_post_decrement_counts_down_and_stops_at_zero() {
    let program = [0xE023, 0x0041, NOP]; // set x, 3 ; jmp x-- 1 ; nop

    let x_series: Vec<u32> = emulate(
        &program,
        State::default(),
        |_, new_state| new_state.program_counter == 2,
        &EmulatorConfig::default(),
    )
    .unwrap()
    .map(|pair| pair.unwrap().0.x_register)
    .collect();

    assert_eq!(x_series, [0, 3, 2, 1, 0]);
}

#[test]
fn jmp_y_post_decrement_counts_down_and_stops_at_zero() {
    let program = [0xE043, 0x0081, NOP]; // set y, 3 ; jmp y-- 1 ; nop

    let y_series: Vec<u32> = emulate(
        &program,
        State::default(),
        |_, new_state| new_state.program_counter == 2,
        &EmulatorConfig::default(),
    )
    .unwrap()
    .map(|pair| pair.unwrap().0.y_register)
    .collect();

    assert_eq!(y_series, [0, 3, 2, 1, 0]);
}

#[rstest]
#[case::pin_low(6, State::default(), 1)]
#[case::pin_high(7, State { pin_values: 1 << 7, ..State::default() }, 0)]
fn jmp_on_external_control_pin(
    #[case] jmp_pin: u8,
    #[case] initial_state: State,
    #[case] expected_program_counter: u32,
) {
    let config = EmulatorConfig {
        jmp_pin: Some(jmp_pin),
        ..EmulatorConfig::default()
    };

    // jmp pin 0
    let new_state = single_cycle(0x00C0, initial_state, &config);
    assert_eq!(new_state.program_counter, expected_program_counter);
}

#[rstest]
#[case::osr_empty(ShiftRegister::new(0, 32), 1)]
#[case::osr_full(ShiftRegister::new(0, 0), 2)]
fn jmp_on_output_shift_register_state(
    #[case] output_shift_register: ShiftRegister,
    #[case] expected_program_counter: u32,
) {
    let initial_state = State {
        output_shift_register,
        ..State::default()
    };

    // jmp !osre, 2
    let new_state = single_cycle(0x00E2, initial_state, &EmulatorConfig::default());
    assert_eq!(new_state.program_counter, expected_program_counter);
}

#[rstest]
#[case::out_pindirs_3(
    0x6083,
    State {
        output_shift_register: ShiftRegister::new(0x8000_0000, 5),
        ..State::default()
    },
    State {
        program_counter: 1,
        pin_directions: 0x0000_0004,
        output_shift_register: ShiftRegister::new(0x0000_0000, 8),
        ..State::default()
    }
)]
#[case::out_pins_8(
    0x6008,
    State {
        output_shift_register: ShiftRegister::new(0xFFFF_FFFF, 0),
        ..State::default()
    },
    State {
        program_counter: 1,
        pin_values: 0x0000_00FF,
        output_shift_register: ShiftRegister::new(0xFFFF_FF00, 8),
        ..State::default()
    }
)]
#[case::out_null_3(
    0x6063,
    State {
        output_shift_register: ShiftRegister::new(0xFFFF_FFFF, 0),
        ..State::default()
    },
    State {
        program_counter: 1,
        output_shift_register: ShiftRegister::new(0xFFFF_FFF8, 3),
        ..State::default()
    }
)]
fn out_instruction_when_shifting_left(
    #[case] opcode: u16,
    #[case] initial_state: State,
    #[case] expected_state: State,
) {
    let config = EmulatorConfig {
        osr_shift_direction: ShiftDirection::Left,
        ..EmulatorConfig::default()
    };

    let new_state = single_cycle(opcode, initial_state, &config);
    assert_eq!(new_state, expected_state);
}

#[rstest]
#[case::out_pindirs_3(
    0x6083,
    State {
        output_shift_register: ShiftRegister::new(0x0000_0004, 5),
        ..State::default()
    },
    State {
        program_counter: 1,
        pin_directions: 0x4,
        output_shift_register: ShiftRegister::new(0x0000_0000, 8),
        ..State::default()
    }
)]
#[case::out_pins_8(
    0x6008,
    State {
        output_shift_register: ShiftRegister::new(0x1FF, 0),
        ..State::default()
    },
    State {
        program_counter: 1,
        pin_values: 0xFF,
        output_shift_register: ShiftRegister::new(0x001, 8),
        ..State::default()
    }
)]
#[case::out_x_3(
    0x6023,
    State {
        output_shift_register: ShiftRegister::new(0xFFFF_FFFF, 0),
        ..State::default()
    },
    State {
        program_counter: 1,
        x_register: 0x7,
        output_shift_register: ShiftRegister::new(0x1FFF_FFFF, 3),
        ..State::default()
    }
)]
#[case::out_y_32(
    0x6040,
    State {
        output_shift_register: ShiftRegister::new(0xFFFF_FFFF, 0),
        ..State::default()
    },
    State {
        program_counter: 1,
        y_register: 0xFFFF_FFFF,
        output_shift_register: ShiftRegister::new(0x0000_0000, 32),
        ..State::default()
    }
)]
fn out_instruction_when_shifting_right(
    #[case] opcode: u16,
    #[case] initial_state: State,
    #[case] expected_state: State,
) {
    let config = EmulatorConfig {
        osr_shift_direction: ShiftDirection::Right,
        ..EmulatorConfig::default()
    };

    let new_state = single_cycle(opcode, initial_state, &config);
    assert_eq!(new_state, expected_state);
}

#[rstest]
#[case::out_pc_2(
    0x60A2,
    State {
        output_shift_register: ShiftRegister::new(0x0000_001F, 0),
        ..State::default()
    },
    State {
        program_counter: 3,
        output_shift_register: ShiftRegister::new(0x0000_0007, 2),
        ..State::default()
    }
)]
#[case::out_isr_5(
    0x60C5,
    State {
        output_shift_register: ShiftRegister::new(0xDEAD_BEEF, 0),
        input_shift_register: ShiftRegister::new(0x1234_4567, 32),
        ..State::default()
    },
    State {
        program_counter: 1,
        output_shift_register: ShiftRegister::new(0x06F5_6DF7, 5),
        input_shift_register: ShiftRegister::new(0x0000_000F, 5),
        ..State::default()
    }
)]
fn out_instruction_with_default_shift_direction(
    #[case] opcode: u16,
    #[case] initial_state: State,
    #[case] expected_state: State,
) {
    let new_state = single_cycle(opcode, initial_state, &EmulatorConfig::default());
    assert_eq!(new_state, expected_state);
}

#[test]
fn emulate_and_step_once_agree_on_a_single_cycle() {
    let program = [0x6023, NOP]; // out x, 3 ; nop
    let initial_state = State {
        output_shift_register: ShiftRegister::new(0xFFFF_FFFF, 0),
        ..State::default()
    };
    let config = EmulatorConfig::default();

    let from_step = step_once(&program, initial_state, &config).unwrap();
    let from_emulate = emulate(&program, initial_state, clock_cycles_reached(1), &config)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(from_step, from_emulate);
}
