use crate::memory::Addr;

pub const FLAG: u8 = 0xF;

/// The sixteen general purpose 8-bit registers V0..VF. VF doubles as the
/// carry/borrow/collision flag and is clobbered by arithmetic and draw.
pub struct Registers {
    v: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { v: [0; 16] }
    }

    pub fn get(&self, reg: u8) -> u8 {
        self.v[reg as usize]
    }

    pub fn set(&mut self, reg: u8, value: u8) {
        self.v[reg as usize] = value;
    }

    pub fn set_flag(&mut self, value: bool) {
        self.v[FLAG as usize] = value as u8;
    }

    // 7xkk wraps and leaves VF alone.
    pub fn add_immediate(&mut self, reg: u8, value: u8) {
        let slot = &mut self.v[reg as usize];
        *slot = slot.wrapping_add(value);
    }
}

// Special registers
#[derive(Debug)]
pub struct ProgramCounter(pub Addr);

impl ProgramCounter {
    /// Move past the instruction that was just fetched.
    pub fn advance(&mut self) {
        self.0 += 2;
    }

    /// Skip the next instruction (taken 3xkk/4xkk/5xy0/9xy0/Ex9E/ExA1).
    pub fn skip(&mut self) {
        self.0 += 2;
    }

    pub fn jump(&mut self, addr: Addr) {
        self.0 = addr;
    }
}

pub struct IndexRegister(pub Addr);

impl IndexRegister {
    pub fn set(&mut self, addr: Addr) {
        self.0 = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_immediate_wraps_without_flag() {
        let mut regs = Registers::new();
        regs.set(0x3, 0xFF);
        regs.set_flag(false);
        regs.add_immediate(0x3, 0x02);
        assert_eq!(regs.get(0x3), 0x01);
        assert_eq!(regs.get(FLAG), 0);
    }
}
