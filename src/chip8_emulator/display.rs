use crate::chip8_emulator::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

impl Framebuffer {
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[(x % SCREEN_WIDTH) + (y % SCREEN_HEIGHT) * SCREEN_WIDTH] == 1
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|pixel| **pixel == 1).count()
    }

    pub fn blit_row(&mut self, x: usize, y: usize, sprite_row: u8) -> bool {
        let y_pos = y % SCREEN_HEIGHT;
        let mut collision = false;

        for bit in 0..8 {
            if (sprite_row >> (7 - bit)) & 0x1 == 0 {
                continue;
            }

            let x_pos = (x + bit) % SCREEN_WIDTH;
            let location = x_pos + (y_pos * SCREEN_WIDTH);
            if self.pixels[location] == 1 {
                collision = true;
            }
            self.pixels[location] ^= 1;
        }

        collision
    }
}
