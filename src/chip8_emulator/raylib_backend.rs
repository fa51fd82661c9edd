use log::{debug, info};
use raylib::prelude::{Color, KeyboardKey, RaylibDraw, RaylibHandle, RaylibThread};

use crate::chip8_emulator::backend::{Backend, PresentPolicy};
use crate::chip8_emulator::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::chip8_emulator::display::Framebuffer;
use crate::chip8_emulator::error::Chip8Error;

const TARGET_FPS: u32 = 60;

const KEY_MAP: [(KeyboardKey, u8); 16] = [
    (KeyboardKey::KEY_ONE, 0x1),
    (KeyboardKey::KEY_TWO, 0x2),
    (KeyboardKey::KEY_THREE, 0x3),
    (KeyboardKey::KEY_FOUR, 0xC),
    (KeyboardKey::KEY_Q, 0x4),
    (KeyboardKey::KEY_W, 0x5),
    (KeyboardKey::KEY_E, 0x6),
    (KeyboardKey::KEY_R, 0xD),
    (KeyboardKey::KEY_A, 0x7),
    (KeyboardKey::KEY_S, 0x8),
    (KeyboardKey::KEY_D, 0x9),
    (KeyboardKey::KEY_F, 0xE),
    (KeyboardKey::KEY_Z, 0xA),
    (KeyboardKey::KEY_X, 0x0),
    (KeyboardKey::KEY_C, 0xB),
    (KeyboardKey::KEY_V, 0xF),
];

struct RaylibWindow {
    handle: RaylibHandle,
    thread: RaylibThread,
}

pub struct RaylibBackend {
    window: Option<RaylibWindow>,
    front_buffer: Framebuffer,
    pixel_width: i32,
    pixel_height: i32,
}

impl RaylibBackend {
    pub fn open(width: u32, height: u32) -> Result<Self, Chip8Error> {
        let (mut handle, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title("chip8-vm")
            .build();

        if !handle.is_window_ready() {
            return Err(Chip8Error::Backend(format!(
                "could not open a {width}x{height} window"
            )));
        }
        handle.set_target_fps(TARGET_FPS);
        info!("opened {width}x{height} window");

        Ok(Self {
            window: Some(RaylibWindow { handle, thread }),
            front_buffer: Framebuffer::default(),
            pixel_width: (width / SCREEN_WIDTH as u32) as i32,
            pixel_height: (height / SCREEN_HEIGHT as u32) as i32,
        })
    }

    fn render(&mut self) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        let mut d = window.handle.begin_drawing(&window.thread);
        d.clear_background(Color::BLACK);
        for (index, value) in self.front_buffer.pixels().iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let x = (index % SCREEN_WIDTH) as i32;
            let y = (index / SCREEN_WIDTH) as i32;
            d.draw_rectangle(
                x * self.pixel_width,
                y * self.pixel_height,
                self.pixel_width,
                self.pixel_height,
                Color::WHITE,
            );
        }
    }

    fn pressed_key(&self) -> Option<u8> {
        let window = self.window.as_ref()?;
        KEY_MAP
            .iter()
            .find(|(key, _)| window.handle.is_key_pressed(*key))
            .map(|(_, mapped)| *mapped)
    }
}

impl Backend for RaylibBackend {
    fn update(&mut self) {
        self.render();
    }

    fn draw(&mut self, framebuffer: &Framebuffer) {
        self.front_buffer.clone_from(framebuffer);
    }

    fn clear(&mut self) {
        self.front_buffer.clear();
    }

    fn is_key_pressed(&mut self, key: u8) -> bool {
        let Some(window) = self.window.as_ref() else {
            return false;
        };
        KEY_MAP
            .iter()
            .filter(|(_, mapped)| *mapped == key)
            .any(|(physical, _)| window.handle.is_key_down(*physical))
    }

    fn wait_for_key_press(&mut self) -> Option<u8> {
        loop {
            if self.should_close() {
                return None;
            }
            self.render();
            if let Some(key) = self.pressed_key() {
                return Some(key);
            }
        }
    }

    fn should_close(&mut self) -> bool {
        self.window
            .as_ref()
            .map_or(true, |window| window.handle.window_should_close())
    }

    fn release(&mut self) {
        if self.window.take().is_some() {
            debug!("closed window");
        }
    }

    fn present_policy(&self) -> PresentPolicy {
        PresentPolicy::EveryTick
    }
}
