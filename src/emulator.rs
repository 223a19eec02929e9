use log::trace;
use rand::Rng;

use crate::decode::Instruction;
use crate::display::FrameBuffer;
use crate::error::VmError;
use crate::keyboard::Keypad;
use crate::memory::{Addr, Memory};
use crate::registers::Registers;
use crate::timer::Timer;

/// Platform-variant behavior switches. The historical interpreters disagree
/// on the shift instructions; both behaviors live behind this flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quirks {
    /// 8xy6/8xyE copy Vy into Vx before shifting (COSMAC VIP). Off by
    /// default: shift Vx in place, ignore Vy.
    pub shift_reads_vy: bool,
}

/// Interpreter progress state. Fx0A parks the VM here instead of blocking,
/// so the host event loop keeps running; the next key release resumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Running,
    WaitingForKey { register: u8 },
}

/// The whole machine: registers, memory, stack, timers, framebuffer and
/// keypad behind one aggregate. The host talks to it through `load_rom`,
/// `step`, the key events, `tick_timers` and the framebuffer accessors;
/// everything else is interpreter-private.
pub struct Emulator {
    regs: Registers,
    mem: Memory,
    fb: FrameBuffer,
    keypad: Keypad,
    delay: Timer,
    sound: Timer,
    mode: Mode,
    quirks: Quirks,
}

impl Emulator {
    pub fn new(quirks: Quirks) -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            fb: FrameBuffer::new(),
            keypad: Keypad::new(),
            delay: Timer::new(),
            sound: Timer::new(),
            mode: Mode::Running,
            quirks,
        }
    }

    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), VmError> {
        self.mem.load_rom(image)
    }

    /// Fetch, decode and execute one instruction. Returns whether the
    /// framebuffer changed. A no-op while waiting on Fx0A.
    pub fn step(&mut self) -> Result<bool, VmError> {
        if let Mode::WaitingForKey { .. } = self.mode {
            return Ok(false);
        }
        let at = self.mem.pc.0;
        let opcode = self.mem.fetch()?;
        let instruction =
            Instruction::decode(opcode).ok_or(VmError::UnknownOpcode { opcode, address: at })?;
        trace!("{at:#05X}: {opcode:04X} {instruction:?}");
        self.execute(instruction, at)
    }

    fn execute(&mut self, instruction: Instruction, at: Addr) -> Result<bool, VmError> {
        let mut drew = false;
        match instruction {
            Instruction::ClearScreen => {
                self.fb.clear();
                drew = true;
            }
            Instruction::Return => {
                let addr = self.mem.stack.pop(at)?;
                self.mem.pc.jump(addr);
            }
            Instruction::Jump(addr) => self.mem.pc.jump(addr),
            Instruction::Call(addr) => {
                // pc has already moved past the call, so it is the return address
                self.mem.stack.push(self.mem.pc.0, at)?;
                self.mem.pc.jump(addr);
            }
            Instruction::SkipEqImm(x, kk) => {
                if self.regs.get(x) == kk {
                    self.mem.pc.skip();
                }
            }
            Instruction::SkipNeImm(x, kk) => {
                if self.regs.get(x) != kk {
                    self.mem.pc.skip();
                }
            }
            Instruction::SkipEqReg(x, y) => {
                if self.regs.get(x) == self.regs.get(y) {
                    self.mem.pc.skip();
                }
            }
            Instruction::SkipNeReg(x, y) => {
                if self.regs.get(x) != self.regs.get(y) {
                    self.mem.pc.skip();
                }
            }
            Instruction::LoadImm(x, kk) => self.regs.set(x, kk),
            Instruction::AddImm(x, kk) => self.regs.add_immediate(x, kk),
            Instruction::Move(x, y) => self.regs.set(x, self.regs.get(y)),
            Instruction::Or(x, y) => self.regs.set(x, self.regs.get(x) | self.regs.get(y)),
            Instruction::And(x, y) => self.regs.set(x, self.regs.get(x) & self.regs.get(y)),
            Instruction::Xor(x, y) => self.regs.set(x, self.regs.get(x) ^ self.regs.get(y)),
            Instruction::Add(x, y) => {
                let (sum, carry) = self.regs.get(x).overflowing_add(self.regs.get(y));
                self.regs.set(x, sum);
                self.regs.set_flag(carry);
            }
            Instruction::Sub(x, y) => {
                let (vx, vy) = (self.regs.get(x), self.regs.get(y));
                self.regs.set(x, vx.wrapping_sub(vy));
                self.regs.set_flag(vx > vy);
            }
            Instruction::SubReversed(x, y) => {
                let (vx, vy) = (self.regs.get(x), self.regs.get(y));
                self.regs.set(x, vy.wrapping_sub(vx));
                self.regs.set_flag(vy > vx);
            }
            Instruction::ShiftRight(x, y) => {
                let value = self.shift_source(x, y);
                self.regs.set(x, value >> 1);
                self.regs.set_flag(value & 0x01 != 0);
            }
            Instruction::ShiftLeft(x, y) => {
                let value = self.shift_source(x, y);
                self.regs.set(x, value << 1);
                self.regs.set_flag(value & 0x80 != 0);
            }
            Instruction::LoadIndex(addr) => self.mem.index.set(addr),
            Instruction::JumpOffset(addr) => {
                self.mem.pc.jump(addr + self.regs.get(0x0) as Addr);
            }
            Instruction::Random(x, kk) => {
                self.regs.set(x, rand::thread_rng().gen::<u8>() & kk);
            }
            Instruction::Draw(x, y, n) => {
                let mut sprite = [0u8; 16];
                for row in 0..n as u16 {
                    sprite[row as usize] = self.mem.get(self.index_offset(row)?)?;
                }
                let collision =
                    self.fb
                        .draw(self.regs.get(x), self.regs.get(y), &sprite[..n as usize]);
                self.regs.set_flag(collision);
                drew = true;
            }
            Instruction::SkipKeyPressed(x) => {
                if self.keypad.is_pressed(self.regs.get(x)) {
                    self.mem.pc.skip();
                }
            }
            Instruction::SkipKeyNotPressed(x) => {
                if !self.keypad.is_pressed(self.regs.get(x)) {
                    self.mem.pc.skip();
                }
            }
            Instruction::WaitKey(x) => {
                self.mode = Mode::WaitingForKey { register: x };
            }
            Instruction::ReadDelay(x) => self.regs.set(x, self.delay.get()),
            Instruction::SetDelay(x) => self.delay.set(self.regs.get(x)),
            Instruction::SetSound(x) => self.sound.set(self.regs.get(x)),
            Instruction::AddIndex(x) => {
                let sum = self.mem.index.0 as u32 + self.regs.get(x) as u32;
                self.regs.set_flag(sum > 0xFFF);
                self.mem.index.set(sum as Addr);
            }
            Instruction::LoadGlyph(x) => {
                self.mem.index.set(Memory::glyph_addr(self.regs.get(x)));
            }
            Instruction::StoreBcd(x) => {
                let value = self.regs.get(x);
                for (offset, digit) in [value / 100, value / 10 % 10, value % 10]
                    .into_iter()
                    .enumerate()
                {
                    let addr = self.index_offset(offset as u16)?;
                    self.mem.set(addr, digit)?;
                }
            }
            Instruction::StoreRegisters(x) => {
                for reg in 0..=x {
                    let addr = self.index_offset(reg as u16)?;
                    self.mem.set(addr, self.regs.get(reg))?;
                }
            }
            Instruction::LoadRegisters(x) => {
                for reg in 0..=x {
                    let addr = self.index_offset(reg as u16)?;
                    let value = self.mem.get(addr)?;
                    self.regs.set(reg, value);
                }
            }
        }
        Ok(drew)
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_reads_vy {
            self.regs.get(y)
        } else {
            self.regs.get(x)
        }
    }

    // I plus a small offset, refusing to leave the address space.
    fn index_offset(&self, offset: u16) -> Result<Addr, VmError> {
        self.mem
            .index
            .0
            .checked_add(offset)
            .ok_or(VmError::OutOfBounds {
                address: self.mem.index.0,
            })
    }

    /// One 60 Hz decrement of both timers. Called by the host's scheduler,
    /// including while the VM waits on Fx0A: the decrement rate is locked to
    /// wall-clock time, not to instruction progress.
    pub fn tick_timers(&mut self) {
        self.delay.tick();
        self.sound.tick();
    }

    /// Whether the host should keep a tone playing.
    pub fn beeping(&self) -> bool {
        self.sound.get() > 0
    }

    pub fn key_pressed(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// A key release also completes a pending Fx0A: the released key's index
    /// lands in the waiting register and execution resumes.
    pub fn key_released(&mut self, key: u8) {
        self.keypad.release(key);
        if let Mode::WaitingForKey { register } = self.mode {
            self.regs.set(register, key);
            self.mode = Mode::Running;
        }
    }

    /// The framebuffer contents if a redraw is due.
    pub fn frame(&mut self) -> Option<&[u8; crate::display::WIDTH * crate::display::HEIGHT]> {
        self.fb.take_frame()
    }
}
