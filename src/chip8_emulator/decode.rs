use std::fmt::{Display, Formatter};

use crate::chip8_emulator::error::Chip8Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Cls,
    Ret,
    Jp { nnn: u16 },
    Call { nnn: u16 },
    SeByte { x: usize, kk: u8 },
    SneByte { x: usize, kk: u8 },
    SeReg { x: usize, y: usize },
    LdByte { x: usize, kk: u8 },
    AddByte { x: usize, kk: u8 },
    Mov { x: usize, y: usize },
    Or { x: usize, y: usize },
    And { x: usize, y: usize },
    Xor { x: usize, y: usize },
    Add { x: usize, y: usize },
    Sub { x: usize, y: usize },
    Shr { x: usize },
    Subn { x: usize, y: usize },
    Shl { x: usize },
    SneReg { x: usize, y: usize },
    LdI { nnn: u16 },
    JpV0 { nnn: u16 },
    Rnd { x: usize, kk: u8 },
    Drw { x: usize, y: usize, n: u8 },
    Skp { x: usize },
    Sknp { x: usize },
    LdVxDt { x: usize },
    LdVxK { x: usize },
    LdDtVx { x: usize },
    LdStVx { x: usize },
    AddIVx { x: usize },
    LdFVx { x: usize },
    LdBVx { x: usize },
    StoreRegisters { x: usize },
    LoadRegisters { x: usize },
}

fn x_register_index(opcode: u16) -> usize {
    ((opcode & 0x0F00) >> 8) as usize
}

fn y_register_index(opcode: u16) -> usize {
    ((opcode & 0x00F0) >> 4) as usize
}

fn address_nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

fn byte_kk(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

fn nibble_n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

pub fn decode(opcode: u16, pc: u16) -> Result<Instruction, Chip8Error> {
    let x = x_register_index(opcode);
    let y = y_register_index(opcode);
    let nnn = address_nnn(opcode);
    let kk = byte_kk(opcode);
    let n = nibble_n(opcode);
    let unrecognized = Chip8Error::UnrecognizedOpcode { opcode, pc };

    let instruction = match opcode >> 12 {
        0x0 => match opcode {
            0x00E0 => Instruction::Cls,
            0x00EE => Instruction::Ret,
            _ => return Err(unrecognized),
        },
        0x1 => Instruction::Jp { nnn },
        0x2 => Instruction::Call { nnn },
        0x3 => Instruction::SeByte { x, kk },
        0x4 => Instruction::SneByte { x, kk },
        0x5 if n == 0 => Instruction::SeReg { x, y },
        0x6 => Instruction::LdByte { x, kk },
        0x7 => Instruction::AddByte { x, kk },
        0x8 => match n {
            0x0 => Instruction::Mov { x, y },
            0x1 => Instruction::Or { x, y },
            0x2 => Instruction::And { x, y },
            0x3 => Instruction::Xor { x, y },
            0x4 => Instruction::Add { x, y },
            0x5 => Instruction::Sub { x, y },
            0x6 => Instruction::Shr { x },
            0x7 => Instruction::Subn { x, y },
            0xE => Instruction::Shl { x },
            _ => return Err(unrecognized),
        },
        0x9 if n == 0 => Instruction::SneReg { x, y },
        0xA => Instruction::LdI { nnn },
        0xB => Instruction::JpV0 { nnn },
        0xC => Instruction::Rnd { x, kk },
        0xD => Instruction::Drw { x, y, n },
        0xE => match kk {
            0x9E => Instruction::Skp { x },
            0xA1 => Instruction::Sknp { x },
            _ => return Err(unrecognized),
        },
        0xF => match kk {
            0x07 => Instruction::LdVxDt { x },
            0x0A => Instruction::LdVxK { x },
            0x15 => Instruction::LdDtVx { x },
            0x18 => Instruction::LdStVx { x },
            0x1E => Instruction::AddIVx { x },
            0x29 => Instruction::LdFVx { x },
            0x33 => Instruction::LdBVx { x },
            0x55 => Instruction::StoreRegisters { x },
            0x65 => Instruction::LoadRegisters { x },
            _ => return Err(unrecognized),
        },
        _ => return Err(unrecognized),
    };

    Ok(instruction)
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Cls => write!(f, "CLS"),
            Self::Ret => write!(f, "RET"),
            Self::Jp { nnn } => write!(f, "JP 0x{nnn:03X}"),
            Self::Call { nnn } => write!(f, "CALL 0x{nnn:03X}"),
            Self::SeByte { x, kk } => write!(f, "SE V{x:X}, 0x{kk:02X}"),
            Self::SneByte { x, kk } => write!(f, "SNE V{x:X}, 0x{kk:02X}"),
            Self::SeReg { x, y } => write!(f, "SE V{x:X}, V{y:X}"),
            Self::LdByte { x, kk } => write!(f, "LD V{x:X}, 0x{kk:02X}"),
            Self::AddByte { x, kk } => write!(f, "ADD V{x:X}, 0x{kk:02X}"),
            Self::Mov { x, y } => write!(f, "LD V{x:X}, V{y:X}"),
            Self::Or { x, y } => write!(f, "OR V{x:X}, V{y:X}"),
            Self::And { x, y } => write!(f, "AND V{x:X}, V{y:X}"),
            Self::Xor { x, y } => write!(f, "XOR V{x:X}, V{y:X}"),
            Self::Add { x, y } => write!(f, "ADD V{x:X}, V{y:X}"),
            Self::Sub { x, y } => write!(f, "SUB V{x:X}, V{y:X}"),
            Self::Shr { x } => write!(f, "SHR V{x:X}"),
            Self::Subn { x, y } => write!(f, "SUBN V{x:X}, V{y:X}"),
            Self::Shl { x } => write!(f, "SHL V{x:X}"),
            Self::SneReg { x, y } => write!(f, "SNE V{x:X}, V{y:X}"),
            Self::LdI { nnn } => write!(f, "LD I, 0x{nnn:03X}"),
            Self::JpV0 { nnn } => write!(f, "JP V0, 0x{nnn:03X}"),
            Self::Rnd { x, kk } => write!(f, "RND V{x:X}, 0x{kk:02X}"),
            Self::Drw { x, y, n } => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            Self::Skp { x } => write!(f, "SKP V{x:X}"),
            Self::Sknp { x } => write!(f, "SKNP V{x:X}"),
            Self::LdVxDt { x } => write!(f, "LD V{x:X}, DT"),
            Self::LdVxK { x } => write!(f, "LD V{x:X}, K"),
            Self::LdDtVx { x } => write!(f, "LD DT, V{x:X}"),
            Self::LdStVx { x } => write!(f, "LD ST, V{x:X}"),
            Self::AddIVx { x } => write!(f, "ADD I, V{x:X}"),
            Self::LdFVx { x } => write!(f, "LD F, V{x:X}"),
            Self::LdBVx { x } => write!(f, "LD B, V{x:X}"),
            Self::StoreRegisters { x } => write!(f, "LD [I], V{x:X}"),
            Self::LoadRegisters { x } => write!(f, "LD V{x:X}, [I]"),
        }
    }
}
