pub const REGISTER_COUNT: usize = 8;

/// Register 7 is reserved for the stack pointer.
pub const SP: usize = 7;

/// Initial stack pointer. The stack grows down from here.
pub const STACK_TOP: u8 = 244;

#[derive(Clone, Default)]
pub struct RegisterFile {
    slots: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            slots: [0; REGISTER_COUNT],
        }
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: u8) -> Option<()> {
        let slot = self.slots.get_mut(index)?;
        *slot = value;
        Some(())
    }

    pub fn sp(&self) -> u8 {
        self.slots[SP]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.slots[SP] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}

/// Comparison flags. After a COMPARE exactly one of them is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub equal: bool,
    pub less: bool,
    pub greater: bool,
}

impl Flags {
    pub fn clear(&mut self) {
        *self = Flags::default();
    }

    /// Resets all three flags, then sets the one matching `a` against `b`.
    pub fn compare(&mut self, a: u8, b: u8) {
        self.clear();
        if a == b {
            self.equal = true;
        } else if a < b {
            self.less = true;
        } else {
            self.greater = true;
        }
    }

    /// Packed `00000LGE` form, used by the trace output.
    pub fn bits(&self) -> u8 {
        ((self.less as u8) << 2) | ((self.greater as u8) << 1) | self.equal as u8
    }
}
