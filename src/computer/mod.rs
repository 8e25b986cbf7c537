pub mod alu;
pub mod config;
pub mod errors;
mod handlers;
pub mod instructions;
pub mod memory;
pub mod registers;

use std::fmt::Write as _;
use std::io::{self, Write};

use log::{debug, trace};

pub use config::MachineConfig;
pub use errors::MachineError;

use instructions::{instruction_size, sets_pc};
use memory::Memory;
use registers::{Flags, RegisterFile, STACK_TOP};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Constructed, SP and PC not yet initialised.
    Ready,
    Running,
    /// Terminal. The machine can still be inspected.
    Halted,
}

pub struct Computer<W: Write = io::Stdout> {
    memory: Memory,
    registers: RegisterFile,
    flags: Flags,
    program_counter: usize,

    /// Cleared by HLT; checked after each instruction.
    running: bool,
    state: State,

    config: MachineConfig,
    output: W,
}

impl Computer<io::Stdout> {
    pub fn new(config: MachineConfig) -> Computer<io::Stdout> {
        Computer::with_output(io::stdout(), config)
    }
}

impl<W: Write> Computer<W> {
    /// PRINT_REG writes to `output` instead of standard output.
    pub fn with_output(output: W, config: MachineConfig) -> Computer<W> {
        Computer {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            flags: Flags::default(),
            program_counter: 0,
            running: false,
            state: State::Ready,
            config,
            output,
        }
    }

    /// Copies a program image into memory starting at address 0.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        for (address, &byte) in program.iter().enumerate() {
            self.memory
                .write(address, byte)
                .ok_or(MachineError::MemoryOutOfRange { address, pc: 0 })?;
        }
        debug!("loaded {} bytes", program.len());

        Ok(())
    }

    /// Runs until HLT or a fault.
    pub fn run(&mut self) -> Result<(), MachineError> {
        while self.step()? == State::Running {}
        Ok(())
    }

    /// Executes exactly one instruction and reports the resulting state. The
    /// first call starts the machine.
    pub fn step(&mut self) -> Result<State, MachineError> {
        match self.state {
            State::Halted => return Err(MachineError::AlreadyHalted),
            State::Ready => self.start(),
            State::Running => {}
        }

        if let Err(err) = self.execute_next() {
            self.running = false;
            self.state = State::Halted;
            return Err(err);
        }

        if !self.running {
            self.state = State::Halted;
            debug!("halted, pc {}", self.program_counter);
        }

        Ok(self.state)
    }

    fn start(&mut self) {
        self.registers.set_sp(STACK_TOP);
        self.program_counter = self.config.entry_point as usize;
        self.flags.clear();
        self.running = true;
        self.state = State::Running;
        debug!("running from pc {}", self.program_counter);
    }

    fn execute_next(&mut self) -> Result<(), MachineError> {
        let pc = self.program_counter;
        let opcode = self.ram_read(pc)?;
        let instruction =
            instructions::decode(opcode).ok_or(MachineError::UnknownOpcode { opcode, pc })?;

        if self.config.trace {
            trace!("{}", self.trace_line());
        }

        handlers::execute(self, instruction, opcode)?;

        if !sets_pc(opcode) {
            self.program_counter += instruction_size(opcode);
        }

        Ok(())
    }

    /// `TRACE: PC | FL | IR op1 op2 | R0..R7 | disassembly`, all in hex.
    pub fn trace_line(&self) -> String {
        let pc = self.program_counter;
        let byte = |address: usize| self.memory.read(address).unwrap_or(0);

        let mut line = format!(
            "TRACE: {:02X} | {:02X} | {:02X} {:02X} {:02X} |",
            pc,
            self.flags.bits(),
            byte(pc),
            byte(pc + 1),
            byte(pc + 2)
        );
        for value in self.registers.as_slice() {
            let _ = write!(line, " {:02X}", value);
        }
        if let Some(text) = instructions::disassemble(self.memory.as_slice(), pc) {
            let _ = write!(line, " | {}", text);
        }

        line
    }

    pub fn pc(&self) -> usize {
        self.program_counter
    }

    pub fn sp(&self) -> u8 {
        self.registers.sp()
    }

    pub fn register(&self, index: usize) -> Option<u8> {
        self.registers.get(index)
    }

    pub fn registers(&self) -> &[u8] {
        self.registers.as_slice()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ram_read(&self, address: usize) -> Result<u8, MachineError> {
        self.memory
            .read(address)
            .ok_or(MachineError::MemoryOutOfRange {
                address,
                pc: self.program_counter,
            })
    }

    fn ram_write(&mut self, address: usize, value: u8) -> Result<(), MachineError> {
        self.memory
            .write(address, value)
            .ok_or(MachineError::MemoryOutOfRange {
                address,
                pc: self.program_counter,
            })
    }

    /// The `n`th byte after the current opcode.
    fn operand(&self, n: usize) -> Result<u8, MachineError> {
        self.ram_read(self.program_counter + n)
    }

    fn reg(&self, index: u8) -> Result<u8, MachineError> {
        self.registers
            .get(index as usize)
            .ok_or(MachineError::RegisterOutOfRange {
                index: index as usize,
                pc: self.program_counter,
            })
    }

    fn set_reg(&mut self, index: u8, value: u8) -> Result<(), MachineError> {
        self.registers
            .set(index as usize, value)
            .ok_or(MachineError::RegisterOutOfRange {
                index: index as usize,
                pc: self.program_counter,
            })
    }

    /// Decrements SP and returns the slot it now points at.
    fn stack_grow(&mut self) -> Result<usize, MachineError> {
        let sp = self.registers.sp();
        if self.config.strict_stack && sp == 0 {
            return Err(MachineError::StackOverflow {
                pc: self.program_counter,
            });
        }

        let sp = sp.wrapping_sub(1);
        self.registers.set_sp(sp);
        Ok(sp as usize)
    }

    /// Reads the value SP points at without moving SP.
    fn stack_top(&self) -> Result<u8, MachineError> {
        let sp = self.registers.sp();
        if self.config.strict_stack && sp >= STACK_TOP {
            return Err(MachineError::StackUnderflow {
                sp,
                pc: self.program_counter,
            });
        }

        self.ram_read(sp as usize)
    }

    fn stack_shrink(&mut self) {
        self.registers.set_sp(self.registers.sp().wrapping_add(1));
    }

    fn push(&mut self, value: u8) -> Result<(), MachineError> {
        let slot = self.stack_grow()?;
        self.ram_write(slot, value)
    }

    fn pop(&mut self) -> Result<u8, MachineError> {
        let value = self.stack_top()?;
        self.stack_shrink();
        Ok(value)
    }
}
