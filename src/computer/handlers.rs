use std::io::Write;

use crate::computer::alu::{self, AluOp};
use crate::computer::errors::MachineError;
use crate::computer::instructions::{alu_bits, instruction_size, Instruction};
use crate::computer::Computer;

/// Runs the handler for `instruction`. Operands are read from the bytes that
/// follow `opcode` in memory. Handlers for PC-setting opcodes leave the PC
/// where execution continues; all others leave it on the opcode.
pub(super) fn execute<W: Write>(
    computer: &mut Computer<W>,
    instruction: Instruction,
    opcode: u8,
) -> Result<(), MachineError> {
    match instruction {
        Instruction::PrintReg => print_reg(computer),
        Instruction::LoadImmediate => load_immediate(computer),
        Instruction::Halt => halt(computer),
        Instruction::Multiply => alu_op(computer, opcode),
        Instruction::Push => push(computer),
        Instruction::Pop => pop(computer),
        Instruction::Call => call(computer, opcode),
        Instruction::Return => ret(computer),
        Instruction::Compare => compare(computer),
        Instruction::Jump => jump(computer),
        Instruction::JumpIfEqual => {
            let taken = computer.flags.equal;
            jump_if(computer, opcode, taken)
        }
        Instruction::JumpIfNotEqual => {
            let taken = !computer.flags.equal;
            jump_if(computer, opcode, taken)
        }
    }
}

fn print_reg<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let value = computer.reg(computer.operand(1)?)?;
    writeln!(computer.output, "{}", value)?;
    Ok(())
}

fn load_immediate<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let index = computer.operand(1)?;
    let value = computer.operand(2)?;
    computer.set_reg(index, value)
}

fn halt<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    computer.running = false;
    Ok(())
}

// reg[a] = reg[a] <op> reg[b]
fn alu_op<W: Write>(computer: &mut Computer<W>, opcode: u8) -> Result<(), MachineError> {
    let op = AluOp::from_bits(alu_bits(opcode))?;
    let a = computer.operand(1)?;
    let b = computer.operand(2)?;
    let result = alu::apply(op, computer.reg(a)?, computer.reg(b)?);
    computer.set_reg(a, result)
}

// SP moves before the register is read, so PUSH R7 stores the new SP.
fn push<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let index = computer.operand(1)?;
    let slot = computer.stack_grow()?;
    let value = computer.reg(index)?;
    computer.ram_write(slot, value)
}

// The register is written before SP moves, so POP R7 ends one past the value.
fn pop<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let index = computer.operand(1)?;
    let value = computer.stack_top()?;
    computer.set_reg(index, value)?;
    computer.stack_shrink();
    Ok(())
}

fn call<W: Write>(computer: &mut Computer<W>, opcode: u8) -> Result<(), MachineError> {
    let index = computer.operand(1)?;
    // Return addresses are stored in a single byte.
    let return_address = (computer.program_counter + instruction_size(opcode)) as u8;
    computer.push(return_address)?;
    let target = computer.reg(index)?;
    computer.program_counter = target as usize;
    Ok(())
}

fn ret<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let address = computer.pop()?;
    computer.program_counter = address as usize;
    Ok(())
}

fn compare<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let a = computer.reg(computer.operand(1)?)?;
    let b = computer.reg(computer.operand(2)?)?;
    computer.flags.compare(a, b);
    Ok(())
}

fn jump<W: Write>(computer: &mut Computer<W>) -> Result<(), MachineError> {
    let target = computer.reg(computer.operand(1)?)?;
    computer.program_counter = target as usize;
    Ok(())
}

/// The engine never advances the PC for conditional jumps, so the fall-through
/// path steps over the operand here.
fn jump_if<W: Write>(
    computer: &mut Computer<W>,
    opcode: u8,
    taken: bool,
) -> Result<(), MachineError> {
    if taken {
        jump(computer)
    } else {
        computer.program_counter += instruction_size(opcode);
        Ok(())
    }
}
