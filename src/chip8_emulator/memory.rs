use std::fs;
use std::path::Path;

use crate::chip8_emulator::config::{FONT_BYTES, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::chip8_emulator::error::Chip8Error;

const ADDRESS_MASK: usize = MEMORY_SIZE - 1;

/// Every access wraps modulo the memory size, so no address computed from
/// `i` or `pc` can index outside the array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
        Self { bytes }
    }
}

impl Memory {
    pub fn read(&self, address: usize) -> u8 {
        self.bytes[address & ADDRESS_MASK]
    }

    pub fn write(&mut self, address: usize, value: u8) {
        self.bytes[address & ADDRESS_MASK] = value;
    }

    pub fn read_opcode(&self, pc: u16) -> u16 {
        let pc = pc as usize;
        u16::from_be_bytes([self.read(pc), self.read(pc + 1)])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn load_rom_bytes(&mut self, rom_bytes: &[u8]) -> Result<(), Chip8Error> {
        if rom_bytes.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom_bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let end = PROGRAM_START + rom_bytes.len();
        self.bytes[PROGRAM_START..end].copy_from_slice(rom_bytes);
        Ok(())
    }

    pub fn load_rom(&mut self, path: &Path) -> Result<usize, Chip8Error> {
        let rom_bytes = fs::read(path)?;
        self.load_rom_bytes(&rom_bytes)?;
        Ok(rom_bytes.len())
    }
}
