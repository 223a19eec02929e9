use thiserror::Error;

/// Fatal interpreter faults. None of these are recoverable: the VM stops at
/// the offending instruction and the host decides how to report it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmError {
    #[error("program image is {size} bytes, only {capacity} fit above 0x200")]
    RomTooLarge { size: usize, capacity: usize },

    #[error("unrecognized opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("call stack overflow at {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("return with empty call stack at {address:#05X}")]
    StackUnderflow { address: u16 },

    // The original interpreter wrapped silently here; failing loudly instead.
    #[error("memory access out of bounds at {address:#06X}")]
    OutOfBounds { address: u16 },
}
