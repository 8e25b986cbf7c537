pub const MEMORY_SIZE: usize = 256;

/// Flat byte-addressed RAM. Out-of-range accesses return `None` and the
/// caller decides how to fault.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Option<u8> {
        self.cells.get(address).copied()
    }

    pub fn write(&mut self, address: usize, value: u8) -> Option<()> {
        let cell = self.cells.get_mut(address)?;
        *cell = value;
        Some(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
