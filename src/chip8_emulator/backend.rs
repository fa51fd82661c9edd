use std::ops::{Deref, DerefMut};

use log::debug;

use crate::chip8_emulator::display::Framebuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentPolicy {
    OnCollision,
    EveryTick,
}

pub trait Backend {
    fn update(&mut self);

    fn draw(&mut self, framebuffer: &Framebuffer);

    fn clear(&mut self);

    fn is_key_pressed(&mut self, key: u8) -> bool;

    /// Blocks until a key is pressed. `None` means the backend was asked to
    /// close while waiting.
    fn wait_for_key_press(&mut self) -> Option<u8>;

    fn should_close(&mut self) -> bool;

    fn release(&mut self);

    fn present_policy(&self) -> PresentPolicy {
        PresentPolicy::OnCollision
    }
}

pub struct ReleaseGuard<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: Backend + ?Sized> ReleaseGuard<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }
}

impl<B: Backend + ?Sized> Deref for ReleaseGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for ReleaseGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl<B: Backend + ?Sized> Drop for ReleaseGuard<'_, B> {
    fn drop(&mut self) {
        debug!("releasing backend");
        self.backend.release();
    }
}
