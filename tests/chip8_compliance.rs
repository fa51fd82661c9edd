use chip8_vm::{
    create_state, execute_cycle, execute_opcode, tick_timers, Chip8Error, EmulatorState, Flow,
    HeadlessBackend, PROGRAM_START,
};

fn setup() -> (EmulatorState, HeadlessBackend) {
    (create_state(None).unwrap(), HeadlessBackend::default())
}

fn run(state: &mut EmulatorState, backend: &mut HeadlessBackend, opcode: u16) -> Flow {
    execute_opcode(state, opcode, backend).unwrap()
}

#[test]
fn font_is_loaded_at_address_zero() {
    let (state, _) = setup();

    assert_eq!(state.memory.as_slice()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    assert_eq!(state.memory.as_slice()[75..80], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    assert_eq!(state.registers.pc, PROGRAM_START as u16);
}

#[test]
fn add_sets_carry_iff_sum_overflows() {
    for (a, b) in [(0u8, 0u8), (200, 55), (200, 56), (255, 255), (1, 254), (128, 128)] {
        let (mut state, mut backend) = setup();
        state.registers.v[1] = a;
        state.registers.v[2] = b;

        run(&mut state, &mut backend, 0x8124);

        let sum = a as u16 + b as u16;
        assert_eq!(state.registers.v[1], (sum % 256) as u8);
        assert_eq!(state.registers.v[0xF], u8::from(sum > 255));
    }
}

#[test]
fn sub_sets_not_borrow_including_equal_operands() {
    for (a, b) in [(10u8, 3u8), (3, 10), (7, 7), (0, 255)] {
        let (mut state, mut backend) = setup();
        state.registers.v[3] = a;
        state.registers.v[4] = b;

        run(&mut state, &mut backend, 0x8345);

        assert_eq!(state.registers.v[3], a.wrapping_sub(b));
        assert_eq!(state.registers.v[0xF], u8::from(a >= b));
    }
}

#[test]
fn subn_subtracts_vx_from_vy() {
    let (mut state, mut backend) = setup();
    state.registers.v[1] = 3;
    state.registers.v[2] = 10;

    run(&mut state, &mut backend, 0x8127);

    assert_eq!(state.registers.v[1], 7);
    assert_eq!(state.registers.v[0xF], 1);

    state.registers.v[1] = 10;
    state.registers.v[2] = 3;
    run(&mut state, &mut backend, 0x8127);

    assert_eq!(state.registers.v[1], 3u8.wrapping_sub(10));
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn shr_moves_low_bit_into_flag() {
    let (mut state, mut backend) = setup();
    state.registers.v[5] = 0b0000_0111;
    state.registers.v[6] = 0xFF;

    run(&mut state, &mut backend, 0x8566);

    assert_eq!(state.registers.v[5], 0b0000_0011);
    assert_eq!(state.registers.v[6], 0xFF);
    assert_eq!(state.registers.v[0xF], 1);

    run(&mut state, &mut backend, 0x8566);
    assert_eq!(state.registers.v[5], 0b0000_0001);
    assert_eq!(state.registers.v[0xF], 1);

    state.registers.v[5] = 0b0000_0110;
    run(&mut state, &mut backend, 0x8566);
    assert_eq!(state.registers.v[5], 0b0000_0011);
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn shl_moves_high_bit_into_flag() {
    let (mut state, mut backend) = setup();
    state.registers.v[5] = 0b1000_1000;

    run(&mut state, &mut backend, 0x856E);

    assert_eq!(state.registers.v[5], 0b0001_0000);
    assert_eq!(state.registers.v[0xF], 1);

    run(&mut state, &mut backend, 0x856E);
    assert_eq!(state.registers.v[5], 0b0010_0000);
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn flag_wins_when_vf_is_the_destination() {
    let (mut state, mut backend) = setup();
    state.registers.v[0xF] = 0xFF;
    state.registers.v[1] = 0x01;

    run(&mut state, &mut backend, 0x8F14);
    assert_eq!(state.registers.v[0xF], 1);

    state.registers.v[0xF] = 0x10;
    state.registers.v[1] = 0x01;
    run(&mut state, &mut backend, 0x8F15);
    assert_eq!(state.registers.v[0xF], 1);

    state.registers.v[0xF] = 0x02;
    run(&mut state, &mut backend, 0x8F06);
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn flag_is_cleared_when_no_carry() {
    let (mut state, mut backend) = setup();
    state.registers.v[0xF] = 1;
    state.registers.v[0] = 1;
    state.registers.v[1] = 1;

    run(&mut state, &mut backend, 0x8014);

    assert_eq!(state.registers.v[0], 2);
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn bitwise_ops_and_move() {
    let (mut state, mut backend) = setup();
    state.registers.v[1] = 0b1100;
    state.registers.v[2] = 0b1010;

    run(&mut state, &mut backend, 0x8121);
    assert_eq!(state.registers.v[1], 0b1110);

    state.registers.v[1] = 0b1100;
    run(&mut state, &mut backend, 0x8122);
    assert_eq!(state.registers.v[1], 0b1000);

    state.registers.v[1] = 0b1100;
    run(&mut state, &mut backend, 0x8123);
    assert_eq!(state.registers.v[1], 0b0110);

    run(&mut state, &mut backend, 0x8120);
    assert_eq!(state.registers.v[1], 0b1010);
    assert_eq!(state.registers.pc, PROGRAM_START as u16 + 8);
}

#[test]
fn skip_instructions_advance_by_four_or_two() {
    let cases = [
        (0x3142u16, 0x42u8, 0x00u8, true),
        (0x3142, 0x41, 0x00, false),
        (0x4142, 0x41, 0x00, true),
        (0x4142, 0x42, 0x00, false),
        (0x5120, 0x07, 0x07, true),
        (0x5120, 0x07, 0x08, false),
        (0x9120, 0x07, 0x08, true),
        (0x9120, 0x07, 0x07, false),
    ];

    for (opcode, v1, v2, skips) in cases {
        let (mut state, mut backend) = setup();
        state.registers.v[1] = v1;
        state.registers.v[2] = v2;
        let start_pc = state.registers.pc;

        run(&mut state, &mut backend, opcode);

        let expected = if skips { start_pc + 4 } else { start_pc + 2 };
        assert_eq!(state.registers.pc, expected, "opcode 0x{opcode:04x}");
    }
}

#[test]
fn ld_and_add_byte() {
    let (mut state, mut backend) = setup();

    run(&mut state, &mut backend, 0x6AFF);
    run(&mut state, &mut backend, 0x7A02);

    assert_eq!(state.registers.v[0xA], 0x01);
    assert_eq!(state.registers.v[0xF], 0);
    assert_eq!(state.registers.pc, PROGRAM_START as u16 + 4);
}

#[test]
fn jump_sets_pc_directly() {
    let (mut state, mut backend) = setup();

    run(&mut state, &mut backend, 0x1321);
    assert_eq!(state.registers.pc, 0x321);

    state.registers.v[0] = 0x05;
    run(&mut state, &mut backend, 0xB123);
    assert_eq!(state.registers.pc, 0x128);
}

#[test]
fn call_then_ret_resumes_after_call() {
    let (mut state, mut backend) = setup();
    state.memory.write(0x200, 0x23);
    state.memory.write(0x201, 0x00);
    state.memory.write(0x300, 0x00);
    state.memory.write(0x301, 0xEE);
    let sp_before = state.registers.sp;

    execute_cycle(&mut state, &mut backend).unwrap();
    assert_eq!(state.registers.pc, 0x300);
    assert_eq!(state.registers.sp, sp_before + 1);

    execute_cycle(&mut state, &mut backend).unwrap();
    assert_eq!(state.registers.pc, 0x202);
    assert_eq!(state.registers.sp, sp_before);
}

#[test]
fn call_stores_return_address_at_incremented_sp() {
    let (mut state, mut backend) = setup();
    state.registers.pc = 0x20E;
    state.registers.sp = 3;

    run(&mut state, &mut backend, 0x2321);

    assert_eq!(state.registers.pc, 0x321);
    assert_eq!(state.registers.sp, 4);
    assert_eq!(state.registers.stack[4], 0x210);
}

#[test]
fn ret_on_empty_stack_is_an_error() {
    let (mut state, mut backend) = setup();

    let result = execute_opcode(&mut state, 0x00EE, &mut backend);

    assert!(matches!(result, Err(Chip8Error::StackUnderflow { pc: 0x200 })));
}

#[test]
fn call_beyond_stack_depth_is_an_error() {
    let (mut state, mut backend) = setup();
    for _ in 0..15 {
        run(&mut state, &mut backend, 0x2200);
    }

    let result = execute_opcode(&mut state, 0x2200, &mut backend);

    assert!(matches!(result, Err(Chip8Error::StackOverflow { .. })));
}

#[test]
fn ld_i_and_add_i() {
    let (mut state, mut backend) = setup();
    state.registers.v[3] = 0x10;

    run(&mut state, &mut backend, 0xAFF8);
    run(&mut state, &mut backend, 0xF31E);

    assert_eq!(state.registers.i, 0x1008);
    assert_eq!(state.registers.v[0xF], 0);
}

#[test]
fn rnd_is_masked_by_kk() {
    let (mut state, mut backend) = setup();

    for _ in 0..32 {
        run(&mut state, &mut backend, 0xC10F);
        assert_eq!(state.registers.v[1] & 0xF0, 0);
    }

    run(&mut state, &mut backend, 0xC100);
    assert_eq!(state.registers.v[1], 0);
}

#[test]
fn cls_clears_framebuffer_and_backend() {
    let (mut state, mut backend) = setup();
    state.registers.i = 0;
    run(&mut state, &mut backend, 0xD005);
    assert!(state.framebuffer.lit_pixels() > 0);

    run(&mut state, &mut backend, 0x00E0);

    assert_eq!(state.framebuffer.lit_pixels(), 0);
    assert_eq!(backend.clears, 1);
}

#[test]
fn drw_twice_restores_screen_and_reports_collision_second_time() {
    let (mut state, mut backend) = setup();
    state.registers.v[0] = 10;
    state.registers.v[1] = 4;
    state.registers.i = 5 * 0xA;

    let first = run(&mut state, &mut backend, 0xD015);
    let drawn = state.framebuffer.clone();
    assert_eq!(first, Flow::Continue);
    assert_eq!(state.registers.v[0xF], 0);
    assert_eq!(backend.draws, 0);
    assert!(drawn.lit_pixels() > 0);

    let second = run(&mut state, &mut backend, 0xD015);
    assert_eq!(second, Flow::Collided);
    assert_eq!(state.registers.v[0xF], 1);
    assert_eq!(state.framebuffer.lit_pixels(), 0);
    assert_eq!(backend.draws, 1);
}

#[test]
fn drw_reads_sprite_rows_from_i() {
    let (mut state, mut backend) = setup();
    state.registers.i = 0x300;
    state.memory.write(0x300, 0b1000_0001);
    state.memory.write(0x301, 0b0100_0000);

    run(&mut state, &mut backend, 0xD012);

    assert!(state.framebuffer.pixel(0, 0));
    assert!(state.framebuffer.pixel(7, 0));
    assert!(state.framebuffer.pixel(1, 1));
    assert_eq!(state.framebuffer.lit_pixels(), 3);
}

#[test]
fn drw_wraps_columns_and_rows() {
    let (mut state, mut backend) = setup();
    state.registers.v[0] = 62;
    state.registers.v[1] = 31;
    state.registers.i = 0x300;
    state.memory.write(0x300, 0xF0);
    state.memory.write(0x301, 0xF0);

    run(&mut state, &mut backend, 0xD012);

    for (x, y) in [(62, 31), (63, 31), (0, 31), (1, 31), (62, 0), (63, 0), (0, 0), (1, 0)] {
        assert!(state.framebuffer.pixel(x, y), "pixel ({x}, {y})");
    }
    assert_eq!(state.framebuffer.lit_pixels(), 8);
}

#[test]
fn drw_wraps_start_coordinates() {
    let (mut state, mut backend) = setup();
    state.registers.v[0] = 66;
    state.registers.v[1] = 33;
    state.registers.i = 0x300;
    state.memory.write(0x300, 0x80);

    run(&mut state, &mut backend, 0xD011);

    assert!(state.framebuffer.pixel(2, 1));
}

#[test]
fn skp_and_sknp_follow_backend_keys() {
    let (mut state, mut backend) = setup();
    state.registers.v[1] = 0xA;
    backend.set_key_state(0xA, true);
    let start_pc = state.registers.pc;

    run(&mut state, &mut backend, 0xE19E);
    assert_eq!(state.registers.pc, start_pc + 4);

    run(&mut state, &mut backend, 0xE1A1);
    assert_eq!(state.registers.pc, start_pc + 6);

    backend.set_key_state(0xA, false);
    run(&mut state, &mut backend, 0xE1A1);
    assert_eq!(state.registers.pc, start_pc + 10);
}

#[test]
fn key_wait_stores_pressed_key() {
    let (mut state, mut backend) = setup();
    backend.queue_key_press(0x7);

    let flow = run(&mut state, &mut backend, 0xF40A);

    assert_eq!(flow, Flow::KeyWaited);
    assert_eq!(state.registers.v[4], 0x7);
    assert_eq!(state.registers.pc, PROGRAM_START as u16 + 2);
}

#[test]
fn key_wait_aborts_on_close_without_retiring() {
    let (mut state, mut backend) = setup();

    let flow = run(&mut state, &mut backend, 0xF40A);

    assert_eq!(flow, Flow::CloseRequested);
    assert_eq!(state.registers.pc, PROGRAM_START as u16);
}

#[test]
fn timer_loads_and_reads() {
    let (mut state, mut backend) = setup();
    state.registers.v[2] = 9;

    run(&mut state, &mut backend, 0xF215);
    run(&mut state, &mut backend, 0xF218);
    tick_timers(&mut state);
    run(&mut state, &mut backend, 0xF307);

    assert_eq!(state.registers.delay_timer, 8);
    assert_eq!(state.registers.sound_timer, 8);
    assert_eq!(state.registers.v[3], 8);
}

#[test]
fn tick_timers_stops_at_zero() {
    let (mut state, _) = setup();
    state.registers.delay_timer = 1;
    state.registers.sound_timer = 2;

    tick_timers(&mut state);
    tick_timers(&mut state);
    tick_timers(&mut state);

    assert_eq!(state.registers.delay_timer, 0);
    assert_eq!(state.registers.sound_timer, 0);
}

#[test]
fn ld_f_points_at_font_glyph() {
    let (mut state, mut backend) = setup();
    state.registers.v[1] = 0xC;

    run(&mut state, &mut backend, 0xF129);

    assert_eq!(state.registers.i, 60);
    assert_eq!(state.memory.read(60), 0xF0);
    assert_eq!(state.memory.read(61), 0x80);
}

#[test]
fn bcd_of_123_at_100() {
    let (mut state, mut backend) = setup();
    state.registers.v[2] = 123;
    state.registers.i = 100;

    run(&mut state, &mut backend, 0xF233);

    assert_eq!(state.memory.as_slice()[100..103], [1, 2, 3]);
}

#[test]
fn store_then_load_registers_round_trips() {
    let (mut state, mut backend) = setup();
    let values = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
    state.registers.v[0..6].copy_from_slice(&values);
    state.registers.i = 0x300;

    run(&mut state, &mut backend, 0xF555);
    assert_eq!(state.memory.as_slice()[0x300..0x306], values);
    assert_eq!(state.registers.i, 0x300);

    state.registers.v = [0; 16];
    run(&mut state, &mut backend, 0xF565);

    assert_eq!(state.registers.v[0..6], values);
    assert_eq!(state.registers.v[6], 0);
    assert_eq!(state.registers.i, 0x300);
}

#[test]
fn execute_cycle_does_not_tick_timers() {
    let (mut state, mut backend) = setup();
    state.registers.delay_timer = 5;
    state.registers.sound_timer = 5;
    state.memory.write(0x200, 0x00);
    state.memory.write(0x201, 0xE0);

    execute_cycle(&mut state, &mut backend).unwrap();

    assert_eq!(state.registers.delay_timer, 5);
    assert_eq!(state.registers.sound_timer, 5);
    assert_eq!(state.op, 0x00E0);
}

#[test]
fn unrecognized_opcode_reports_opcode_and_pc() {
    let (mut state, mut backend) = setup();
    state.registers.pc = 0x204;
    state.memory.write(0x204, 0x8A);
    state.memory.write(0x205, 0x1F);

    let result = execute_cycle(&mut state, &mut backend);

    assert!(matches!(
        result,
        Err(Chip8Error::UnrecognizedOpcode {
            opcode: 0x8A1F,
            pc: 0x204
        })
    ));
    assert_eq!(state.registers.pc, 0x204);
}
