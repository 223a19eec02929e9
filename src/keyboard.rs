use minifb::Key;

/// Current physical state of the 16-key hex keypad. The host writes press
/// and release transitions; the interpreter only reads.
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self { keys: [false; 16] }
    }

    pub fn press(&mut self, key: u8) {
        self.keys[key as usize & 0xF] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[key as usize & 0xF] = false;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[key as usize & 0xF]
    }
}

/// Which physical keys stand in for the hex pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// 1234/QWER/ASDF/ZXCV block, the usual emulator arrangement.
    Qwerty,
    /// Number pad, matching the pad's own grid more closely.
    Numpad,
}

impl Layout {
    /// Map a host key to a hex pad index, if the layout binds it.
    pub fn hex_key(&self, key: Key) -> Option<u8> {
        match self {
            Layout::Qwerty => match key {
                Key::Key1 => Some(0x1),
                Key::Key2 => Some(0x2),
                Key::Key3 => Some(0x3),
                Key::Key4 => Some(0xC),
                Key::Q => Some(0x4),
                Key::W => Some(0x5),
                Key::E => Some(0x6),
                Key::R => Some(0xD),
                Key::A => Some(0x7),
                Key::S => Some(0x8),
                Key::D => Some(0x9),
                Key::F => Some(0xE),
                Key::Z => Some(0xA),
                Key::X => Some(0x0),
                Key::C => Some(0xB),
                Key::V => Some(0xF),
                _ => None,
            },
            Layout::Numpad => match key {
                Key::NumPad0 => Some(0x0),
                Key::NumPad1 => Some(0x1),
                Key::NumPad2 => Some(0x2),
                Key::NumPad3 => Some(0x3),
                Key::NumPad4 => Some(0x4),
                Key::NumPad5 => Some(0x5),
                Key::NumPad6 => Some(0x6),
                Key::NumPad7 => Some(0x7),
                Key::NumPad8 => Some(0x8),
                Key::NumPad9 => Some(0x9),
                Key::NumPadDot => Some(0xA),
                Key::NumPadEnter => Some(0xB),
                Key::NumPadPlus => Some(0xC),
                Key::NumPadMinus => Some(0xD),
                Key::NumPadAsterisk => Some(0xE),
                Key::NumPadSlash => Some(0xF),
                _ => None,
            },
        }
    }
}
