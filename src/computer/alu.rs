use crate::computer::errors::MachineError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
}

impl AluOp {
    /// Selects the operation from the low nibble of an ALU opcode.
    pub fn from_bits(bits: u8) -> Result<AluOp, MachineError> {
        match bits & 0x0F {
            0b0000 => Ok(AluOp::Add),
            0b0010 => Ok(AluOp::Mul),
            other => Err(MachineError::UnsupportedAluOperation(other)),
        }
    }
}

/// Registers are 8 bits wide; results wrap.
pub fn apply(op: AluOp, a: u8, b: u8) -> u8 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Mul => a.wrapping_mul(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies() {
        assert_eq!(apply(AluOp::Mul, 9, 3), 27);
    }

    #[test]
    fn wraps_on_overflow() {
        assert_eq!(apply(AluOp::Mul, 16, 17), 16);
        assert_eq!(apply(AluOp::Add, 250, 10), 4);
    }

    #[test]
    fn selects_op_from_low_nibble() {
        assert_eq!(AluOp::from_bits(0b1010_0010).unwrap(), AluOp::Mul);
        assert_eq!(AluOp::from_bits(0b1010_0000).unwrap(), AluOp::Add);
        assert!(matches!(
            AluOp::from_bits(0b0011),
            Err(MachineError::UnsupportedAluOperation(0b0011))
        ));
    }
}
