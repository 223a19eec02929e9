pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// The 64x32 one-bit-per-pixel display. Sprites are XORed on with wraparound
/// in both axes; a 1->0 transition anywhere in the draw reports a collision.
/// The dirty flag tells the host a redraw is due and is cleared when the
/// frame is taken.
pub struct FrameBuffer {
    pixels: [u8; WIDTH * HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [0; WIDTH * HEIGHT],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; WIDTH * HEIGHT];
        self.dirty = true;
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y * WIDTH + x] != 0
    }

    /// XOR an 8-pixel-wide sprite on at (x, y), one byte per row, most
    /// significant bit leftmost. Returns whether any set pixel was unset.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x as usize + col) % WIDTH;
                let py = (y as usize + row) % HEIGHT;
                let index = py * WIDTH + px;
                if self.pixels[index] != 0 {
                    collision = true;
                }
                self.pixels[index] ^= 1;
            }
        }
        self.dirty = true;
        collision
    }

    /// The pixel bits if a redraw is due, clearing the dirty flag.
    pub fn take_frame(&mut self) -> Option<&[u8; WIDTH * HEIGHT]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.pixels)
        } else {
            None
        }
    }
}
