use std::path::{Path, PathBuf};

use log::info;

use crate::chip8_emulator::display::Framebuffer;
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::memory::Memory;
use crate::chip8_emulator::registers::RegisterFile;

#[derive(Debug, Clone, Default)]
pub struct EmulatorState {
    pub registers: RegisterFile,
    pub memory: Memory,
    pub framebuffer: Framebuffer,
    pub op: u16,
    pub rom_path: Option<PathBuf>,
}

pub fn create_state(rom_path: Option<&Path>) -> Result<EmulatorState, Chip8Error> {
    let mut state = EmulatorState::default();
    reset_state(&mut state, rom_path)?;
    Ok(state)
}

pub fn create_state_from_bytes(rom_bytes: &[u8]) -> Result<EmulatorState, Chip8Error> {
    let mut state = EmulatorState::default();
    state.memory.load_rom_bytes(rom_bytes)?;
    Ok(state)
}

pub fn reset_state(state: &mut EmulatorState, rom_path: Option<&Path>) -> Result<(), Chip8Error> {
    state.registers = RegisterFile::default();
    state.memory = Memory::default();
    state.framebuffer.clear();
    state.op = 0;

    if let Some(path) = rom_path {
        state.rom_path = Some(path.to_path_buf());
    }

    if let Some(path) = state.rom_path.clone() {
        load_rom(state, &path)?;
    }

    Ok(())
}

pub fn load_rom(state: &mut EmulatorState, path: &Path) -> Result<(), Chip8Error> {
    let size = state.memory.load_rom(path)?;
    state.rom_path = Some(path.to_path_buf());
    info!("loaded ROM {} ({size} bytes)", path.display());
    Ok(())
}
