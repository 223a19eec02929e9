use anyhow::{Context, Result};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::display::{HEIGHT, WIDTH};
use crate::emulator::Emulator;
use crate::keyboard::Layout;

const PIXEL_ON: u32 = 0x007FFF;
const PIXEL_OFF: u32 = 0x000000;

/// Host window: renders frames the VM marks dirty and feeds key press and
/// release transitions back into it.
pub struct Screen {
    window: Window,
    layout: Layout,
    pixels: Vec<u32>,
}

impl Screen {
    pub fn new(layout: Layout) -> Result<Self> {
        let window = Window::new(
            "chipvm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: Scale::X16,
                ..WindowOptions::default()
            },
        )
        .context("opening display window")?;
        Ok(Self {
            window,
            layout,
            pixels: vec![PIXEL_OFF; WIDTH * HEIGHT],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Deliver key transitions since the last refresh into the VM.
    pub fn pump_keys(&mut self, emu: &mut Emulator) {
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if let Some(hex) = self.layout.hex_key(key) {
                emu.key_pressed(hex);
            }
        }
        for key in self.window.get_keys_released() {
            if let Some(hex) = self.layout.hex_key(key) {
                emu.key_released(hex);
            }
        }
    }

    /// Redraw if the VM produced a new frame, otherwise just pump window
    /// events.
    pub fn refresh(&mut self, emu: &mut Emulator) -> Result<()> {
        if let Some(frame) = emu.frame() {
            for (dst, src) in self.pixels.iter_mut().zip(frame.iter()) {
                *dst = if *src != 0 { PIXEL_ON } else { PIXEL_OFF };
            }
            self.window
                .update_with_buffer(&self.pixels, WIDTH, HEIGHT)
                .context("presenting frame")?;
        } else {
            self.window.update();
        }
        Ok(())
    }
}
