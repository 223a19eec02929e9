use crate::error::VmError;
use crate::registers::{IndexRegister, ProgramCounter};

pub type Addr = u16; // in reality u12

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: Addr = 0x200;
pub const GLYPH_BYTES: u8 = 5;

type FontBytes = [u8; GLYPH_BYTES as usize * 16];

// Glyphs for hex digits 0..F, five bytes each, resident at address 0x000.
const FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4 KiB address space plus the addressing registers that point into it.
/// Every access the interpreter makes goes through the checked `get`/`set`
/// pair; a bad address is a fatal fault, never a silent wrap.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Self {
            bytes,
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    pub fn get(&self, addr: Addr) -> Result<u8, VmError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(VmError::OutOfBounds { address: addr })
    }

    pub fn set(&mut self, addr: Addr, val: u8) -> Result<(), VmError> {
        *self
            .bytes
            .get_mut(addr as usize)
            .ok_or(VmError::OutOfBounds { address: addr })? = val;
        Ok(())
    }

    /// Read the big-endian instruction word at the program counter and move
    /// past it.
    pub fn fetch(&mut self) -> Result<u16, VmError> {
        let hi = self.get(self.pc.0)?;
        let lo = self.get(self.pc.0 + 1)?;
        self.pc.advance();
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Offset of the built-in glyph for a hex digit.
    pub fn glyph_addr(digit: u8) -> Addr {
        GLYPH_BYTES as Addr * (digit & 0x0F) as Addr
    }

    /// Copy a raw program image in at 0x200. Rejected before execution if it
    /// does not fit.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), VmError> {
        let start = PROGRAM_START as usize;
        let end = start + image.len();
        self.bytes
            .get_mut(start..end)
            .ok_or(VmError::RomTooLarge {
                size: image.len(),
                capacity: MEMORY_SIZE - start,
            })?
            .copy_from_slice(image);
        Ok(())
    }
}

pub const STACK_DEPTH: usize = 16;

/// Return-address stack for 2nnn/00EE, capped at sixteen frames like the
/// original hardware.
pub struct Stack {
    addresses: Vec<Addr>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: Vec::with_capacity(STACK_DEPTH),
        }
    }

    pub fn push(&mut self, addr: Addr, at: Addr) -> Result<(), VmError> {
        if self.addresses.len() == STACK_DEPTH {
            return Err(VmError::StackOverflow { address: at });
        }
        self.addresses.push(addr);
        Ok(())
    }

    pub fn pop(&mut self, at: Addr) -> Result<Addr, VmError> {
        self.addresses.pop().ok_or(VmError::StackUnderflow { address: at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_glyphs_start_at_zero() {
        let mem = Memory::new();
        let at = Memory::glyph_addr(0xA);
        assert_eq!(at, 50);
        let glyph: Vec<u8> = (at..at + 5).map(|a| mem.get(a).unwrap()).collect();
        assert_eq!(glyph, [0xF0, 0x90, 0xF0, 0x90, 0x90]);
    }

    #[test]
    fn rom_lands_at_program_start() {
        let mut mem = Memory::new();
        mem.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(mem.get(0x200).unwrap(), 0xAA);
        assert_eq!(mem.get(0x201).unwrap(), 0xBB);
    }

    #[test]
    fn oversized_rom_is_rejected() {
        let mut mem = Memory::new();
        let image = vec![0; MEMORY_SIZE - 0x200 + 1];
        assert_eq!(
            mem.load_rom(&image),
            Err(VmError::RomTooLarge {
                size: image.len(),
                capacity: MEMORY_SIZE - 0x200,
            })
        );
    }

    #[test]
    fn fetch_is_big_endian_and_advances() {
        let mut mem = Memory::new();
        mem.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(mem.fetch().unwrap(), 0xAABB);
        assert_eq!(mem.pc.0, 0x202);
    }

    #[test]
    fn access_past_end_faults() {
        let mut mem = Memory::new();
        assert_eq!(
            mem.get(0x1000),
            Err(VmError::OutOfBounds { address: 0x1000 })
        );
        assert_eq!(
            mem.set(0x1000, 1),
            Err(VmError::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn stack_depth_is_sixteen() {
        let mut stack = Stack::new();
        for i in 0..16 {
            stack.push(0x200 + i, 0x200).unwrap();
        }
        assert_eq!(
            stack.push(0x300, 0x240),
            Err(VmError::StackOverflow { address: 0x240 })
        );
    }

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(
            stack.pop(0x200),
            Err(VmError::StackUnderflow { address: 0x200 })
        );
    }
}
