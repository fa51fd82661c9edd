use log::{debug, trace};
use rand::random;

use crate::chip8_emulator::backend::Backend;
use crate::chip8_emulator::config::FONT_GLYPH_SIZE;
use crate::chip8_emulator::decode::{decode, Instruction};
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::state::EmulatorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Collided,
    KeyWaited,
    CloseRequested,
}

pub fn execute_cycle<B: Backend + ?Sized>(
    state: &mut EmulatorState,
    backend: &mut B,
) -> Result<Flow, Chip8Error> {
    let opcode = state.memory.read_opcode(state.registers.pc);
    execute_opcode(state, opcode, backend)
}

pub fn execute_opcode<B: Backend + ?Sized>(
    state: &mut EmulatorState,
    opcode: u16,
    backend: &mut B,
) -> Result<Flow, Chip8Error> {
    let instruction = decode(opcode, state.registers.pc)?;
    state.op = opcode;
    trace!(
        "0x{:03x}: {opcode:04x} {instruction}",
        state.registers.pc
    );
    execute_instruction(state, instruction, backend)
}

pub fn tick_timers(state: &mut EmulatorState) {
    state.registers.tick_timers();
}

pub fn execute_instruction<B: Backend + ?Sized>(
    state: &mut EmulatorState,
    instruction: Instruction,
    backend: &mut B,
) -> Result<Flow, Chip8Error> {
    let regs = &mut state.registers;

    match instruction {
        Instruction::Cls => {
            state.framebuffer.clear();
            backend.clear();
            regs.advance();
        }
        Instruction::Ret => {
            regs.pc = regs.pop_return()?;
        }
        Instruction::Jp { nnn } => regs.pc = nnn,
        Instruction::Call { nnn } => {
            regs.push_return(regs.pc.wrapping_add(2))?;
            regs.pc = nnn;
        }
        Instruction::SeByte { x, kk } => regs.skip_if(regs.v[x] == kk),
        Instruction::SneByte { x, kk } => regs.skip_if(regs.v[x] != kk),
        Instruction::SeReg { x, y } => regs.skip_if(regs.v[x] == regs.v[y]),
        Instruction::SneReg { x, y } => regs.skip_if(regs.v[x] != regs.v[y]),
        Instruction::LdByte { x, kk } => {
            regs.v[x] = kk;
            regs.advance();
        }
        Instruction::AddByte { x, kk } => {
            regs.v[x] = regs.v[x].wrapping_add(kk);
            regs.advance();
        }
        Instruction::Mov { x, y } => {
            regs.v[x] = regs.v[y];
            regs.advance();
        }
        Instruction::Or { x, y } => {
            regs.v[x] |= regs.v[y];
            regs.advance();
        }
        Instruction::And { x, y } => {
            regs.v[x] &= regs.v[y];
            regs.advance();
        }
        Instruction::Xor { x, y } => {
            regs.v[x] ^= regs.v[y];
            regs.advance();
        }
        // Flag-producing ALU ops write VF last so it survives x == 0xF.
        Instruction::Add { x, y } => {
            let (result, carry) = regs.v[x].overflowing_add(regs.v[y]);
            regs.v[x] = result;
            regs.set_flag(carry);
            regs.advance();
        }
        Instruction::Sub { x, y } => {
            let not_borrow = regs.v[x] >= regs.v[y];
            regs.v[x] = regs.v[x].wrapping_sub(regs.v[y]);
            regs.set_flag(not_borrow);
            regs.advance();
        }
        Instruction::Shr { x } => {
            let value = regs.v[x];
            regs.v[x] = value >> 1;
            regs.set_flag(value & 0x1 == 0x1);
            regs.advance();
        }
        Instruction::Subn { x, y } => {
            let not_borrow = regs.v[y] >= regs.v[x];
            regs.v[x] = regs.v[y].wrapping_sub(regs.v[x]);
            regs.set_flag(not_borrow);
            regs.advance();
        }
        Instruction::Shl { x } => {
            let value = regs.v[x];
            regs.v[x] = value.wrapping_shl(1);
            regs.set_flag(value & 0x80 == 0x80);
            regs.advance();
        }
        Instruction::LdI { nnn } => {
            regs.i = nnn;
            regs.advance();
        }
        Instruction::JpV0 { nnn } => regs.pc = nnn.wrapping_add(regs.v[0] as u16),
        Instruction::Rnd { x, kk } => {
            regs.v[x] = random::<u8>() & kk;
            regs.advance();
        }
        Instruction::Drw { x, y, n } => return draw_sprite(state, x, y, n, backend),
        Instruction::Skp { x } => {
            let pressed = backend.is_key_pressed(regs.v[x] & 0x0F);
            regs.skip_if(pressed);
        }
        Instruction::Sknp { x } => {
            let pressed = backend.is_key_pressed(regs.v[x] & 0x0F);
            regs.skip_if(!pressed);
        }
        Instruction::LdVxDt { x } => {
            regs.v[x] = regs.delay_timer;
            regs.advance();
        }
        Instruction::LdVxK { x } => {
            debug!("waiting for key press into V{x:X}");
            let Some(key) = backend.wait_for_key_press() else {
                return Ok(Flow::CloseRequested);
            };
            regs.v[x] = key & 0x0F;
            regs.advance();
            return Ok(Flow::KeyWaited);
        }
        Instruction::LdDtVx { x } => {
            regs.delay_timer = regs.v[x];
            regs.advance();
        }
        Instruction::LdStVx { x } => {
            regs.sound_timer = regs.v[x];
            regs.advance();
        }
        Instruction::AddIVx { x } => {
            regs.i = regs.i.wrapping_add(regs.v[x] as u16);
            regs.advance();
        }
        Instruction::LdFVx { x } => {
            regs.i = FONT_GLYPH_SIZE as u16 * regs.v[x] as u16;
            regs.advance();
        }
        Instruction::LdBVx { x } => {
            let value = regs.v[x];
            let base = regs.i as usize;
            state.memory.write(base, value / 100);
            state.memory.write(base + 1, (value % 100) / 10);
            state.memory.write(base + 2, value % 10);
            regs.advance();
        }
        Instruction::StoreRegisters { x } => {
            let base = regs.i as usize;
            for index in 0..=x {
                state.memory.write(base + index, regs.v[index]);
            }
            regs.advance();
        }
        Instruction::LoadRegisters { x } => {
            let base = regs.i as usize;
            for index in 0..=x {
                regs.v[index] = state.memory.read(base + index);
            }
            regs.advance();
        }
    }

    Ok(Flow::Continue)
}

fn draw_sprite<B: Backend + ?Sized>(
    state: &mut EmulatorState,
    x: usize,
    y: usize,
    n: u8,
    backend: &mut B,
) -> Result<Flow, Chip8Error> {
    let x_start = state.registers.v[x] as usize;
    let y_start = state.registers.v[y] as usize;
    let base = state.registers.i as usize;

    let mut collision = false;
    for row in 0..n as usize {
        let sprite_row = state.memory.read(base + row);
        collision |= state
            .framebuffer
            .blit_row(x_start, y_start + row, sprite_row);
    }

    state.registers.set_flag(collision);
    state.registers.advance();

    if collision {
        backend.draw(&state.framebuffer);
        return Ok(Flow::Collided);
    }
    Ok(Flow::Continue)
}
