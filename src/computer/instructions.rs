use phf::phf_map;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    PrintReg,
    LoadImmediate,
    Halt,
    Multiply,
    Push,
    Pop,
    Call,
    Return,
    Compare,
    Jump,
    JumpIfEqual,
    JumpIfNotEqual,
}

/// Opcode byte to instruction. Layout of an opcode: `AABCDDDD`, where `AA` is
/// the operand count, `C` marks instructions that set the PC themselves and
/// `DDDD` picks the ALU operation.
pub static OPCODES: phf::Map<u8, Instruction> = phf_map! {
    0b0100_0111u8 => Instruction::PrintReg,
    0b1000_0010u8 => Instruction::LoadImmediate,
    0b0000_0001u8 => Instruction::Halt,
    0b1010_0010u8 => Instruction::Multiply,
    0b0100_0101u8 => Instruction::Push,
    0b0100_0110u8 => Instruction::Pop,
    0b0101_0000u8 => Instruction::Call,
    0b0001_0001u8 => Instruction::Return,
    0b1010_0111u8 => Instruction::Compare,
    0b0101_0100u8 => Instruction::Jump,
    0b0101_0101u8 => Instruction::JumpIfEqual,
    0b0101_0110u8 => Instruction::JumpIfNotEqual,
};

pub fn decode(opcode: u8) -> Option<Instruction> {
    OPCODES.get(&opcode).copied()
}

pub fn operand_count(opcode: u8) -> usize {
    (opcode >> 6) as usize
}

pub fn instruction_size(opcode: u8) -> usize {
    operand_count(opcode) + 1
}

pub fn sets_pc(opcode: u8) -> bool {
    opcode & 0b0001_0000 != 0
}

pub fn alu_bits(opcode: u8) -> u8 {
    opcode & 0b0000_1111
}

impl Instruction {
    pub fn opcode(self) -> u8 {
        match self {
            Instruction::PrintReg => 0b0100_0111,
            Instruction::LoadImmediate => 0b1000_0010,
            Instruction::Halt => 0b0000_0001,
            Instruction::Multiply => 0b1010_0010,
            Instruction::Push => 0b0100_0101,
            Instruction::Pop => 0b0100_0110,
            Instruction::Call => 0b0101_0000,
            Instruction::Return => 0b0001_0001,
            Instruction::Compare => 0b1010_0111,
            Instruction::Jump => 0b0101_0100,
            Instruction::JumpIfEqual => 0b0101_0101,
            Instruction::JumpIfNotEqual => 0b0101_0110,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::PrintReg => "PRN",
            Instruction::LoadImmediate => "LDI",
            Instruction::Halt => "HLT",
            Instruction::Multiply => "MUL",
            Instruction::Push => "PUSH",
            Instruction::Pop => "POP",
            Instruction::Call => "CALL",
            Instruction::Return => "RET",
            Instruction::Compare => "CMP",
            Instruction::Jump => "JMP",
            Instruction::JumpIfEqual => "JEQ",
            Instruction::JumpIfNotEqual => "JNE",
        }
    }
}

/// Renders the instruction at `address` as `MNEMONIC op1 op2`, or `None` when
/// the byte there is not a known opcode.
pub fn disassemble(memory: &[u8], address: usize) -> Option<String> {
    let opcode = *memory.get(address)?;
    let instruction = decode(opcode)?;

    let mut text = instruction.mnemonic().to_string();
    for offset in 1..instruction_size(opcode) {
        match memory.get(address + offset) {
            Some(operand) => text.push_str(&format!(" {}", operand)),
            None => text.push_str(" ??"),
        }
    }

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_agrees_with_opcode() {
        assert_eq!(OPCODES.len(), 12);
        for (&opcode, &instruction) in OPCODES.entries() {
            assert_eq!(instruction.opcode(), opcode, "{}", instruction.mnemonic());
        }
    }

    #[test]
    fn size_comes_from_top_bits() {
        assert_eq!(instruction_size(Instruction::Halt.opcode()), 1);
        assert_eq!(instruction_size(Instruction::PrintReg.opcode()), 2);
        assert_eq!(instruction_size(Instruction::LoadImmediate.opcode()), 3);
        assert_eq!(instruction_size(Instruction::Return.opcode()), 1);
    }

    #[test]
    fn pc_setting_bit() {
        for instruction in [
            Instruction::Call,
            Instruction::Return,
            Instruction::Jump,
            Instruction::JumpIfEqual,
            Instruction::JumpIfNotEqual,
        ] {
            assert!(sets_pc(instruction.opcode()), "{}", instruction.mnemonic());
        }
        assert!(!sets_pc(Instruction::Push.opcode()));
        assert!(!sets_pc(Instruction::Multiply.opcode()));
    }

    #[test]
    fn unknown_byte_does_not_decode() {
        assert_eq!(decode(0b1111_1111), None);
        assert_eq!(decode(0), None);
    }

    #[test]
    fn disassembles_with_operands() {
        let memory = [0b1000_0010, 0, 8, 0b0000_0001];
        assert_eq!(disassemble(&memory, 0).as_deref(), Some("LDI 0 8"));
        assert_eq!(disassemble(&memory, 3).as_deref(), Some("HLT"));
        assert_eq!(disassemble(&memory, 1), None);
    }
}
