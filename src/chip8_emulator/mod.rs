pub mod backend;
pub mod config;
pub mod cpu;
pub mod decode;
pub mod display;
pub mod driver;
pub mod error;
pub mod headless;
pub mod memory;
pub mod raylib_backend;
pub mod registers;
pub mod state;
