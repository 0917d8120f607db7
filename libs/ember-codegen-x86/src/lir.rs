use crate::opcode::X86Op;
use derive_more::From;
use ember_core::MachReg;
use std::fmt::{Display, Formatter};

/// Index of an instruction inside its [`MethodUnit`](crate::MethodUnit)
/// stream. Branch targets reference instructions through this instead of
/// pointers; the assembler resolves them into byte displacements.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LirId(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, From)]
pub enum Operand {
	Reg(MachReg),
	Imm(i32),
}

impl Display for Operand {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operand::Reg(reg) => Display::fmt(reg, f),
			Operand::Imm(value) => Display::fmt(value, f),
		}
	}
}

/// One machine instruction before byte encoding. Owned by the unit's
/// instruction stream; after emission only `target` and `nop` may change.
#[derive(Clone, Debug)]
pub struct LirInst {
	pub op: X86Op,
	pub operands: Vec<Operand>,
	/// Branch destination, patched in once the destination record exists.
	pub target: Option<LirId>,
	/// A self-move is kept for downstream bookkeeping but elided by the
	/// assembler.
	pub nop: bool,
	/// Bytecode offset this instruction was lowered from.
	pub pos: u32,
}

impl LirInst {
	pub fn reg(&self, slot: usize) -> MachReg {
		match self.operands[slot] {
			Operand::Reg(reg) => reg,
			Operand::Imm(value) => panic!("operand {slot} of {self} is immediate {value}"),
		}
	}

	pub fn imm(&self, slot: usize) -> i32 {
		match self.operands[slot] {
			Operand::Imm(value) => value,
			Operand::Reg(reg) => panic!("operand {slot} of {self} is register {reg}"),
		}
	}
}

impl Display for LirInst {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.op)?;
		for (i, operand) in self.operands.iter().enumerate() {
			if i == 0 {
				write!(f, " {operand}")?;
			} else {
				write!(f, ", {operand}")?;
			}
		}
		if let Some(target) = self.target {
			write!(f, " -> #{}", target.0)?;
		}
		if self.nop {
			write!(f, " ; nop")?;
		}
		Ok(())
	}
}
