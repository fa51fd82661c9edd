use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Chip8Error {
    Io(std::io::Error),
    RomTooLarge { size: usize, max: usize },
    UnrecognizedOpcode { opcode: u16, pc: u16 },
    StackOverflow { pc: u16 },
    StackUnderflow { pc: u16 },
    Backend(String),
    InvalidArgument(&'static str),
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {size} bytes (max {max})")
            }
            Self::UnrecognizedOpcode { opcode, pc } => {
                write!(f, "unrecognized opcode 0x{opcode:04x} at pc 0x{pc:03x}")
            }
            Self::StackOverflow { pc } => write!(f, "call stack overflow at pc 0x{pc:03x}"),
            Self::StackUnderflow { pc } => {
                write!(f, "return instruction with empty stack at pc 0x{pc:03x}")
            }
            Self::Backend(message) => write!(f, "backend error: {message}"),
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for Chip8Error {}

impl From<std::io::Error> for Chip8Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
