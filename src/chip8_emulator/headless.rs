use std::collections::VecDeque;

use crate::chip8_emulator::backend::{Backend, PresentPolicy};
use crate::chip8_emulator::config::KEY_COUNT;
use crate::chip8_emulator::display::Framebuffer;

#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    pub keys: [bool; KEY_COUNT],
    pub pending_key_presses: VecDeque<u8>,
    pub close_after_updates: Option<usize>,
    pub close_requested: bool,
    pub policy: PresentPolicy,
    pub last_frame: Option<Framebuffer>,
    pub updates: usize,
    pub draws: usize,
    pub clears: usize,
    pub key_waits: usize,
    pub releases: usize,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self {
            keys: [false; KEY_COUNT],
            pending_key_presses: VecDeque::new(),
            close_after_updates: None,
            close_requested: false,
            policy: PresentPolicy::OnCollision,
            last_frame: None,
            updates: 0,
            draws: 0,
            clears: 0,
            key_waits: 0,
            releases: 0,
        }
    }
}

impl HeadlessBackend {
    pub fn with_policy(policy: PresentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn set_key_state(&mut self, key: usize, is_pressed: bool) {
        if key >= KEY_COUNT {
            return;
        }

        self.keys[key] = is_pressed;
    }

    pub fn queue_key_press(&mut self, key: u8) {
        self.pending_key_presses.push_back(key & 0x0F);
    }
}

impl Backend for HeadlessBackend {
    fn update(&mut self) {
        self.updates += 1;
        if self
            .close_after_updates
            .is_some_and(|limit| self.updates >= limit)
        {
            self.close_requested = true;
        }
    }

    fn draw(&mut self, framebuffer: &Framebuffer) {
        self.draws += 1;
        self.last_frame = Some(framebuffer.clone());
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.last_frame = None;
    }

    fn is_key_pressed(&mut self, key: u8) -> bool {
        self.keys[(key & 0x0F) as usize]
    }

    fn wait_for_key_press(&mut self) -> Option<u8> {
        self.key_waits += 1;
        if self.close_requested {
            return None;
        }

        // An empty queue acts as a close request.
        let key = self.pending_key_presses.pop_front();
        if key.is_none() {
            self.close_requested = true;
        }
        key
    }

    fn should_close(&mut self) -> bool {
        self.close_requested
    }

    fn release(&mut self) {
        self.releases += 1;
    }

    fn present_policy(&self) -> PresentPolicy {
        self.policy
    }
}
