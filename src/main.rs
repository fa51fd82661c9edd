use std::path::PathBuf;

use clap::Parser;
use log::error;

use chip8_vm::chip8_emulator::config::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use chip8_vm::{run_emulator_app, run_emulator_headless, Chip8Error};

#[derive(Debug, Parser)]
#[command(name = "chip8-vm")]
#[command(about = "Run a CHIP-8 ROM")]
struct Args {
    #[arg(long)]
    rom: PathBuf,

    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: u32,

    #[arg(long, default_value_t = 2000)]
    max_ticks: usize,

    #[arg(long)]
    headless: bool,
}

fn run(args: &Args) -> Result<(), Chip8Error> {
    if args.headless {
        let state = run_emulator_headless(&args.rom, args.max_ticks)?;
        println!(
            "headless finished: pc=0x{:03x} lit_pixels={}",
            state.registers.pc,
            state.framebuffer.lit_pixels()
        );
        return Ok(());
    }

    let _state = run_emulator_app(&args.rom, args.width, args.height)?;
    Ok(())
}

fn main() -> Result<(), Chip8Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args).inspect_err(|err| error!("{err}"))
}
