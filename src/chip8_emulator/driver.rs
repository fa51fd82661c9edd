use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::chip8_emulator::backend::{Backend, PresentPolicy, ReleaseGuard};
use crate::chip8_emulator::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_INTERVAL};
use crate::chip8_emulator::cpu::{execute_cycle, tick_timers, Flow};
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::headless::HeadlessBackend;
use crate::chip8_emulator::raylib_backend::RaylibBackend;
use crate::chip8_emulator::state::{create_state, EmulatorState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Running,
    Closing,
}

pub struct Driver<'a, B: Backend + ?Sized> {
    pub state: EmulatorState,
    backend: ReleaseGuard<'a, B>,
    status: DriverStatus,
    budget: Duration,
}

impl<'a, B: Backend + ?Sized> Driver<'a, B> {
    pub fn new(state: EmulatorState, backend: &'a mut B) -> Self {
        Self {
            state,
            backend: ReleaseGuard::new(backend),
            status: DriverStatus::Running,
            budget: Duration::ZERO,
        }
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn into_state(self) -> EmulatorState {
        self.state
    }

    fn close(&mut self) {
        if self.status == DriverStatus::Running {
            debug!("driver: Running -> Closing");
            self.status = DriverStatus::Closing;
        }
    }

    pub fn tick(&mut self) -> Result<Duration, Chip8Error> {
        if self.status == DriverStatus::Closing {
            return Ok(Duration::ZERO);
        }

        tick_timers(&mut self.state);

        let started = Instant::now();
        let flow = execute_cycle(&mut self.state, &mut *self.backend)?;
        let blocked = match flow {
            Flow::KeyWaited | Flow::CloseRequested => {
                let blocked = started.elapsed();
                debug!("key wait resumed after {blocked:?}");
                blocked
            }
            Flow::Continue | Flow::Collided => Duration::ZERO,
        };

        match flow {
            Flow::CloseRequested => self.close(),
            Flow::Collided => {}
            Flow::Continue | Flow::KeyWaited => {
                if self.backend.present_policy() == PresentPolicy::EveryTick {
                    self.backend.draw(&self.state.framebuffer);
                }
            }
        }

        Ok(blocked)
    }

    pub fn advance(&mut self, elapsed: Duration) -> Result<Duration, Chip8Error> {
        self.budget += elapsed;

        let mut blocked = Duration::ZERO;
        while self.status == DriverStatus::Running && self.budget >= TICK_INTERVAL {
            blocked += self.tick()?;
            self.budget -= TICK_INTERVAL;
        }

        Ok(blocked)
    }

    pub fn frame(&mut self, elapsed: Duration) -> Result<Duration, Chip8Error> {
        if self.backend.should_close() {
            self.close();
            return Ok(Duration::ZERO);
        }

        self.backend.update();
        self.advance(elapsed)
    }

    pub fn run(mut self) -> Result<EmulatorState, Chip8Error> {
        let mut previous_tick = Instant::now();

        while self.status == DriverStatus::Running {
            let now = Instant::now();
            let elapsed = now - previous_tick;
            previous_tick = now;

            let blocked = self.frame(elapsed)?;
            previous_tick += blocked;
        }

        info!("closing at pc=0x{:03x}", self.state.registers.pc);
        Ok(self.into_state())
    }
}

fn load_or_release<B: Backend + ?Sized>(
    rom_path: &Path,
    backend: &mut B,
) -> Result<EmulatorState, Chip8Error> {
    create_state(Some(rom_path)).map_err(|error| {
        backend.release();
        error
    })
}

pub fn run_emulator_headless(
    rom_path: &Path,
    max_ticks: usize,
) -> Result<EmulatorState, Chip8Error> {
    let mut backend = HeadlessBackend::default();
    run_headless_with(rom_path, max_ticks, &mut backend)
}

pub fn run_headless_with<B: Backend + ?Sized>(
    rom_path: &Path,
    max_ticks: usize,
    backend: &mut B,
) -> Result<EmulatorState, Chip8Error> {
    if max_ticks == 0 {
        return Err(Chip8Error::InvalidArgument("max_ticks must be > 0"));
    }

    let state = load_or_release(rom_path, backend)?;
    let mut driver = Driver::new(state, backend);

    for _ in 0..max_ticks {
        if driver.status() == DriverStatus::Closing {
            break;
        }
        driver.frame(TICK_INTERVAL)?;
    }

    Ok(driver.into_state())
}

pub fn run_emulator_app(
    rom_path: &Path,
    width: u32,
    height: u32,
) -> Result<EmulatorState, Chip8Error> {
    if width < SCREEN_WIDTH as u32 {
        return Err(Chip8Error::InvalidArgument("width must be >= 64"));
    }
    if height < SCREEN_HEIGHT as u32 {
        return Err(Chip8Error::InvalidArgument("height must be >= 32"));
    }

    let mut backend = RaylibBackend::open(width, height)?;
    let state = load_or_release(rom_path, &mut backend)?;

    Driver::new(state, &mut backend).run()
}
