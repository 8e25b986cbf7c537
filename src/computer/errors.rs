use std::io;

use thiserror::Error;

/// Faults raised by the machine while it runs. None of them are recoverable:
/// once one is returned the machine is halted.
#[derive(Error, Debug)]
pub enum MachineError {
    /// No handler is registered for the fetched byte.
    #[error("unknown opcode {opcode:#010b} at pc {pc}")]
    UnknownOpcode { opcode: u8, pc: usize },

    #[error("memory address {address} out of range at pc {pc}")]
    MemoryOutOfRange { address: usize, pc: usize },

    #[error("register index {index} out of range at pc {pc}")]
    RegisterOutOfRange { index: usize, pc: usize },

    #[error("unsupported ALU operation {0:#06b}")]
    UnsupportedAluOperation(u8),

    /// Only raised when the machine is configured with a strict stack.
    #[error("stack overflow at pc {pc}")]
    StackOverflow { pc: usize },

    /// Only raised when the machine is configured with a strict stack.
    #[error("stack underflow (sp {sp}) at pc {pc}")]
    StackUnderflow { sp: u8, pc: usize },

    #[error("machine is halted and cannot be resumed")]
    AlreadyHalted,

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
