//! Machine laws under property testing:
//! 1. MULTIPLY then PRINT_REG prints the wrapped 8-bit product
//! 2. PUSH then POP restores the register and SP
//! 3. COMPARE sets exactly one flag, agreeing with numeric order
//! 4. JUMP_IF_EQUAL lands on the target iff Equal, else 2 bytes on
//! 5. CALL then RETURN resumes right after the CALL

use proptest::prelude::*;

use byteman::computer::instructions::Instruction;
use byteman::computer::registers::STACK_TOP;
use byteman::computer::{Computer, MachineConfig, State};

const LDI: u8 = 0b1000_0010;
const PRN: u8 = 0b0100_0111;
const HLT: u8 = 0b0000_0001;
const MUL: u8 = 0b1010_0010;
const PUSH: u8 = 0b0100_0101;
const POP: u8 = 0b0100_0110;
const CALL: u8 = 0b0101_0000;
const RET: u8 = 0b0001_0001;
const CMP: u8 = 0b1010_0111;
const JEQ: u8 = 0b0101_0101;

fn machine(program: &[u8]) -> Computer<Vec<u8>> {
    let mut computer = Computer::with_output(Vec::new(), MachineConfig::default());
    computer.load_program(program).unwrap();
    computer
}

fn step_n(computer: &mut Computer<Vec<u8>>, n: usize) {
    for _ in 0..n {
        assert_eq!(computer.step().unwrap(), State::Running);
    }
}

#[test]
fn opcode_constants_match_table() {
    assert_eq!(Instruction::Call.opcode(), CALL);
    assert_eq!(Instruction::Return.opcode(), RET);
    assert_eq!(Instruction::JumpIfEqual.opcode(), JEQ);
}

proptest! {
    #[test]
    fn multiply_prints_wrapped_product(a in any::<u8>(), b in any::<u8>()) {
        let mut computer = machine(&[LDI, 0, a, LDI, 1, b, MUL, 0, 1, PRN, 0, HLT]);
        computer.run().unwrap();
        let expected = format!("{}\n", a.wrapping_mul(b));
        prop_assert_eq!(String::from_utf8(computer.into_output()).unwrap(), expected);
    }

    #[test]
    fn push_pop_round_trip(reg in 0u8..7, value in any::<u8>()) {
        let mut computer = machine(&[LDI, reg, value, PUSH, reg, LDI, reg, 0, POP, reg, HLT]);
        step_n(&mut computer, 2);
        prop_assert_eq!(computer.sp(), STACK_TOP - 1);
        computer.run().unwrap();
        prop_assert_eq!(computer.register(reg as usize), Some(value));
        prop_assert_eq!(computer.sp(), STACK_TOP);
    }

    #[test]
    fn compare_sets_exactly_one_flag(a in any::<u8>(), b in any::<u8>()) {
        let mut computer = machine(&[LDI, 0, a, LDI, 1, b, CMP, 0, 1, HLT]);
        computer.run().unwrap();
        let flags = computer.flags();
        let set = [flags.equal, flags.less, flags.greater].iter().filter(|&&f| f).count();
        prop_assert_eq!(set, 1);
        prop_assert_eq!(flags.equal, a == b);
        prop_assert_eq!(flags.less, a < b);
        prop_assert_eq!(flags.greater, a > b);
    }

    #[test]
    fn jump_if_equal_branches_on_equal(a in any::<u8>(), b in any::<u8>(), target in 20u8..=255) {
        // 0: LDI r0,a  3: LDI r1,b  6: LDI r2,target  9: CMP r0,r1  12: JEQ r2
        let mut computer = machine(&[LDI, 0, a, LDI, 1, b, LDI, 2, target, CMP, 0, 1, JEQ, 2]);
        step_n(&mut computer, 5);
        let expected = if a == b { target as usize } else { 14 };
        prop_assert_eq!(computer.pc(), expected);
    }

    #[test]
    fn call_returns_after_call(target in 16u8..=200) {
        // 0: LDI r0,target  3: CALL r0  5: HLT ... target: RET
        let mut program = vec![0u8; 256];
        program[..6].copy_from_slice(&[LDI, 0, target, CALL, 0, HLT]);
        program[target as usize] = RET;

        let mut computer = machine(&program);
        step_n(&mut computer, 2);
        prop_assert_eq!(computer.pc(), target as usize);
        step_n(&mut computer, 1);
        prop_assert_eq!(computer.pc(), 5);
        prop_assert_eq!(computer.sp(), STACK_TOP);
        prop_assert_eq!(computer.step().unwrap(), State::Halted);
    }
}
