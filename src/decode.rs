use crate::memory::Addr;

/// Operand fields shared by every instruction family, extracted from the raw
/// word up front regardless of which pattern ends up matching.
#[derive(Clone, Copy)]
pub struct Fields {
    code: u16,
}

impl Fields {
    pub fn new(code: u16) -> Self {
        Self { code }
    }

    /// Low 12 bits, an address literal.
    pub fn nnn(&self) -> Addr {
        self.code & 0x0FFF
    }

    /// Low byte.
    pub fn kk(&self) -> u8 {
        (self.code & 0x00FF) as u8
    }

    /// Low nibble.
    pub fn n(&self) -> u8 {
        (self.code & 0x000F) as u8
    }

    /// First register index (bits 8-11).
    pub fn x(&self) -> u8 {
        ((self.code & 0x0F00) >> 8) as u8
    }

    /// Second register index (bits 4-7).
    pub fn y(&self) -> u8 {
        ((self.code & 0x00F0) >> 4) as u8
    }

    fn family(&self) -> u8 {
        ((self.code & 0xF000) >> 12) as u8
    }
}

/// The closed set of 35 baseline instructions. Decoding produces exactly one
/// of these or nothing; execution matches exhaustively so no opcode can fall
/// through unhandled.
#[derive(Debug, PartialEq, Eq)]
pub enum Instruction {
    // 00E0
    ClearScreen,
    // 00EE
    Return,
    // 1nnn
    Jump(Addr),
    // 2nnn
    Call(Addr),
    // 3xkk
    SkipEqImm(u8, u8),
    // 4xkk
    SkipNeImm(u8, u8),
    // 5xy0
    SkipEqReg(u8, u8),
    // 9xy0
    SkipNeReg(u8, u8),
    // 6xkk
    LoadImm(u8, u8),
    // 7xkk
    AddImm(u8, u8),

    // 8xy0
    Move(u8, u8),
    // 8xy1
    Or(u8, u8),
    // 8xy2
    And(u8, u8),
    // 8xy3
    Xor(u8, u8),
    // 8xy4
    Add(u8, u8),
    // 8xy5
    Sub(u8, u8),
    // 8xy7
    SubReversed(u8, u8),
    // 8xy6
    ShiftRight(u8, u8),
    // 8xyE
    ShiftLeft(u8, u8),

    // Annn
    LoadIndex(Addr),
    // Bnnn
    JumpOffset(Addr),
    // Cxkk
    Random(u8, u8),
    // Dxyn
    Draw(u8, u8, u8),

    // Ex9E
    SkipKeyPressed(u8),
    // ExA1
    SkipKeyNotPressed(u8),
    // Fx0A
    WaitKey(u8),

    // Fx07
    ReadDelay(u8),
    // Fx15
    SetDelay(u8),
    // Fx18
    SetSound(u8),

    // Fx1E
    AddIndex(u8),
    // Fx29
    LoadGlyph(u8),
    // Fx33
    StoreBcd(u8),
    // Fx55
    StoreRegisters(u8),
    // Fx65
    LoadRegisters(u8),
}

impl Instruction {
    /// Decode a raw instruction word. `None` means the word matches no
    /// recognized pattern, which the executor treats as fatal.
    pub fn decode(code: u16) -> Option<Self> {
        let f = Fields::new(code);
        let decoded = match f.family() {
            0x0 => match code {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::Return,
                _ => return None,
            },
            0x1 => Self::Jump(f.nnn()),
            0x2 => Self::Call(f.nnn()),
            0x3 => Self::SkipEqImm(f.x(), f.kk()),
            0x4 => Self::SkipNeImm(f.x(), f.kk()),
            0x5 if f.n() == 0x0 => Self::SkipEqReg(f.x(), f.y()),
            0x6 => Self::LoadImm(f.x(), f.kk()),
            0x7 => Self::AddImm(f.x(), f.kk()),
            0x8 => match f.n() {
                0x0 => Self::Move(f.x(), f.y()),
                0x1 => Self::Or(f.x(), f.y()),
                0x2 => Self::And(f.x(), f.y()),
                0x3 => Self::Xor(f.x(), f.y()),
                0x4 => Self::Add(f.x(), f.y()),
                0x5 => Self::Sub(f.x(), f.y()),
                0x6 => Self::ShiftRight(f.x(), f.y()),
                0x7 => Self::SubReversed(f.x(), f.y()),
                0xE => Self::ShiftLeft(f.x(), f.y()),
                _ => return None,
            },
            0x9 if f.n() == 0x0 => Self::SkipNeReg(f.x(), f.y()),
            0xA => Self::LoadIndex(f.nnn()),
            0xB => Self::JumpOffset(f.nnn()),
            0xC => Self::Random(f.x(), f.kk()),
            0xD => Self::Draw(f.x(), f.y(), f.n()),
            0xE => match f.kk() {
                0x9E => Self::SkipKeyPressed(f.x()),
                0xA1 => Self::SkipKeyNotPressed(f.x()),
                _ => return None,
            },
            0xF => match f.kk() {
                0x07 => Self::ReadDelay(f.x()),
                0x0A => Self::WaitKey(f.x()),
                0x15 => Self::SetDelay(f.x()),
                0x18 => Self::SetSound(f.x()),
                0x1E => Self::AddIndex(f.x()),
                0x29 => Self::LoadGlyph(f.x()),
                0x33 => Self::StoreBcd(f.x()),
                0x55 => Self::StoreRegisters(f.x()),
                0x65 => Self::LoadRegisters(f.x()),
                _ => return None,
            },
            _ => return None,
        };
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_extraction() {
        let f = Fields::new(0x4CEE);
        assert_eq!(f.nnn(), 0xCEE);
        assert_eq!(f.kk(), 0xEE);
        assert_eq!(f.n(), 0xE);
        assert_eq!(f.x(), 0xC);
        assert_eq!(f.y(), 0xE);
    }

    #[test]
    fn decodes_every_family() {
        assert_eq!(Instruction::decode(0x00E0), Some(Instruction::ClearScreen));
        assert_eq!(Instruction::decode(0x00EE), Some(Instruction::Return));
        assert_eq!(Instruction::decode(0x1ABC), Some(Instruction::Jump(0xABC)));
        assert_eq!(Instruction::decode(0x2ABC), Some(Instruction::Call(0xABC)));
        assert_eq!(
            Instruction::decode(0x3A12),
            Some(Instruction::SkipEqImm(0xA, 0x12))
        );
        assert_eq!(
            Instruction::decode(0x4A12),
            Some(Instruction::SkipNeImm(0xA, 0x12))
        );
        assert_eq!(
            Instruction::decode(0x5AB0),
            Some(Instruction::SkipEqReg(0xA, 0xB))
        );
        assert_eq!(
            Instruction::decode(0x6A12),
            Some(Instruction::LoadImm(0xA, 0x12))
        );
        assert_eq!(
            Instruction::decode(0x7A12),
            Some(Instruction::AddImm(0xA, 0x12))
        );
        assert_eq!(Instruction::decode(0x8AB0), Some(Instruction::Move(0xA, 0xB)));
        assert_eq!(Instruction::decode(0x8AB1), Some(Instruction::Or(0xA, 0xB)));
        assert_eq!(Instruction::decode(0x8AB2), Some(Instruction::And(0xA, 0xB)));
        assert_eq!(Instruction::decode(0x8AB3), Some(Instruction::Xor(0xA, 0xB)));
        assert_eq!(Instruction::decode(0x8AB4), Some(Instruction::Add(0xA, 0xB)));
        assert_eq!(Instruction::decode(0x8AB5), Some(Instruction::Sub(0xA, 0xB)));
        assert_eq!(
            Instruction::decode(0x8AB6),
            Some(Instruction::ShiftRight(0xA, 0xB))
        );
        assert_eq!(
            Instruction::decode(0x8AB7),
            Some(Instruction::SubReversed(0xA, 0xB))
        );
        assert_eq!(
            Instruction::decode(0x8ABE),
            Some(Instruction::ShiftLeft(0xA, 0xB))
        );
        assert_eq!(
            Instruction::decode(0x9AB0),
            Some(Instruction::SkipNeReg(0xA, 0xB))
        );
        assert_eq!(
            Instruction::decode(0xAABC),
            Some(Instruction::LoadIndex(0xABC))
        );
        assert_eq!(
            Instruction::decode(0xBABC),
            Some(Instruction::JumpOffset(0xABC))
        );
        assert_eq!(
            Instruction::decode(0xCA12),
            Some(Instruction::Random(0xA, 0x12))
        );
        assert_eq!(
            Instruction::decode(0xDAB4),
            Some(Instruction::Draw(0xA, 0xB, 0x4))
        );
        assert_eq!(
            Instruction::decode(0xEA9E),
            Some(Instruction::SkipKeyPressed(0xA))
        );
        assert_eq!(
            Instruction::decode(0xEAA1),
            Some(Instruction::SkipKeyNotPressed(0xA))
        );
        assert_eq!(Instruction::decode(0xFA07), Some(Instruction::ReadDelay(0xA)));
        assert_eq!(Instruction::decode(0xFA0A), Some(Instruction::WaitKey(0xA)));
        assert_eq!(Instruction::decode(0xFA15), Some(Instruction::SetDelay(0xA)));
        assert_eq!(Instruction::decode(0xFA18), Some(Instruction::SetSound(0xA)));
        assert_eq!(Instruction::decode(0xFA1E), Some(Instruction::AddIndex(0xA)));
        assert_eq!(Instruction::decode(0xFA29), Some(Instruction::LoadGlyph(0xA)));
        assert_eq!(Instruction::decode(0xFA33), Some(Instruction::StoreBcd(0xA)));
        assert_eq!(
            Instruction::decode(0xFA55),
            Some(Instruction::StoreRegisters(0xA))
        );
        assert_eq!(
            Instruction::decode(0xFA65),
            Some(Instruction::LoadRegisters(0xA))
        );
    }

    #[test]
    fn unrecognized_patterns_do_not_decode() {
        for code in [0xFFFF, 0x0000, 0x00E1, 0x5AB1, 0x8AB8, 0x9AB1, 0xEA00, 0xFA99] {
            assert_eq!(Instruction::decode(code), None, "{code:#06X}");
        }
    }
}
