pub mod chip8_emulator;

pub use chip8_emulator::backend::{Backend, PresentPolicy, ReleaseGuard};
pub use chip8_emulator::config::{
    FONT_BYTES, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SCREEN_HEIGHT, SCREEN_WIDTH,
    TICK_INTERVAL,
};
pub use chip8_emulator::cpu::{
    execute_cycle, execute_instruction, execute_opcode, tick_timers, Flow,
};
pub use chip8_emulator::decode::{decode, Instruction};
pub use chip8_emulator::display::Framebuffer;
pub use chip8_emulator::driver::{
    run_emulator_app, run_emulator_headless, run_headless_with, Driver, DriverStatus,
};
pub use chip8_emulator::error::Chip8Error;
pub use chip8_emulator::headless::HeadlessBackend;
pub use chip8_emulator::memory::Memory;
pub use chip8_emulator::registers::RegisterFile;
pub use chip8_emulator::state::{
    create_state, create_state_from_bytes, load_rom, reset_state, EmulatorState,
};
