use crate::chip8_emulator::config::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT, STACK_SIZE};
use crate::chip8_emulator::error::Chip8Error;

/// `sp` indexes the slot holding the most recent return address; slot 0 is
/// never written, so `sp == 0` means the stack is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub pc: u16,
    pub sp: u8,
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            pc: PROGRAM_START as u16,
            sp: 0,
            v: [0; REGISTER_COUNT],
            i: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
        }
    }
}

impl RegisterFile {
    pub fn set_flag(&mut self, value: bool) {
        self.v[FLAG_REGISTER] = u8::from(value);
    }

    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 4 } else { 2 };
        self.pc = self.pc.wrapping_add(step);
    }

    pub fn push_return(&mut self, address: u16) -> Result<(), Chip8Error> {
        let sp = self.sp as usize + 1;
        if sp >= STACK_SIZE {
            return Err(Chip8Error::StackOverflow { pc: self.pc });
        }
        self.sp = sp as u8;
        self.stack[sp] = address;
        Ok(())
    }

    pub fn pop_return(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        let address = self.stack[self.sp as usize];
        self.sp -= 1;
        Ok(address)
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}
