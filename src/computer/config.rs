#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Fault on stack overflow/underflow instead of silently wrapping into
    /// neighbouring memory.
    pub strict_stack: bool,
    /// Log a trace line before every instruction.
    pub trace: bool,
    pub entry_point: u8,
}

impl MachineConfig {
    pub fn strict() -> MachineConfig {
        MachineConfig {
            strict_stack: true,
            ..MachineConfig::default()
        }
    }
}
