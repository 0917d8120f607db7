use bitflags::bitflags;
use ember_core::CondCode;
use std::fmt::{Display, Formatter};

/// Concrete x86-32 opcodes the lowering emits. Naming follows the operand
/// layout: `RR` register-register, `RI` register-immediate (`RI8` the short
/// immediate form), `RM` register from base+displacement, `RA` register from
/// base+index*scale+displacement, `MR`/`AR` the store directions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum X86Op {
	Mov32RR,
	Mov32RI,
	Mov32RM,
	Mov32RA,
	Mov32MR,
	Mov32AR,
	Mov16MR,
	Mov16AR,
	Mov8MR,
	Mov8AR,
	Movsx8RR,
	Movsx16RR,
	Movzx8RR,
	Movzx16RR,
	Movsx8RM,
	Movsx16RM,
	Movzx8RM,
	Movzx16RM,
	Movsx8RA,
	Movsx16RA,
	Movzx8RA,
	Movzx16RA,
	Add32RR,
	Sub32RR,
	Adc32RR,
	Sbb32RR,
	And32RR,
	Or32RR,
	Xor32RR,
	Cmp32RR,
	Imul32RR,
	Add32RI,
	Add32RI8,
	Sub32RI,
	Sub32RI8,
	Adc32RI,
	Adc32RI8,
	And32RI,
	And32RI8,
	Or32RI,
	Or32RI8,
	Xor32RI,
	Xor32RI8,
	Cmp32RI,
	Cmp32RI8,
	Imul32RRI,
	Imul32RRI8,
	Add32RM,
	Sub32RM,
	And32RM,
	Or32RM,
	Xor32RM,
	Cmp32RM,
	Sal32RI,
	Shr32RI,
	Sar32RI,
	Sal32RC,
	Shr32RC,
	Sar32RC,
	Neg32R,
	Not32R,
	CallR,
	CallM,
	Jmp8,
	Jcc8,
	Lea32Ra,
	MovssRR,
	MovsdRR,
	MovdxrRR,
	MovdrxRR,
	XorpsRR,
	OrpsRR,
	PsllqRI,
	MovssRM,
	MovssRA,
	MovssMR,
	MovssAR,
	MovsdRM,
	MovsdRA,
	MovsdMR,
	MovsdAR,
}

bitflags! {
	/// Instruction-set-defined shape of an opcode. Consulted only by
	/// `debug_assert!` consistency checks when a record is built.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct OpShape: u8 {
		const UNARY = 1;
		const BINARY = 1 << 1;
		const TERNARY = 1 << 2;
		const QUIN = 1 << 3;
		const IS_LOAD = 1 << 4;
		const IS_STORE = 1 << 5;
		const IS_BRANCH = 1 << 6;
	}
}

impl OpShape {
	pub fn operand_count(&self) -> usize {
		if self.contains(OpShape::UNARY) {
			1
		} else if self.contains(OpShape::BINARY) {
			2
		} else if self.contains(OpShape::TERNARY) {
			3
		} else {
			5
		}
	}
}

impl X86Op {
	pub fn shape(&self) -> OpShape {
		match self {
			X86Op::Neg32R | X86Op::Not32R | X86Op::CallR => OpShape::UNARY,
			X86Op::Jmp8 => OpShape::UNARY | OpShape::IS_BRANCH,
			X86Op::Jcc8 => OpShape::BINARY | OpShape::IS_BRANCH,
			X86Op::Mov32RR
			| X86Op::Mov32RI
			| X86Op::Movsx8RR
			| X86Op::Movsx16RR
			| X86Op::Movzx8RR
			| X86Op::Movzx16RR
			| X86Op::Add32RR
			| X86Op::Sub32RR
			| X86Op::Adc32RR
			| X86Op::Sbb32RR
			| X86Op::And32RR
			| X86Op::Or32RR
			| X86Op::Xor32RR
			| X86Op::Cmp32RR
			| X86Op::Imul32RR
			| X86Op::Add32RI
			| X86Op::Add32RI8
			| X86Op::Sub32RI
			| X86Op::Sub32RI8
			| X86Op::Adc32RI
			| X86Op::Adc32RI8
			| X86Op::And32RI
			| X86Op::And32RI8
			| X86Op::Or32RI
			| X86Op::Or32RI8
			| X86Op::Xor32RI
			| X86Op::Xor32RI8
			| X86Op::Cmp32RI
			| X86Op::Cmp32RI8
			| X86Op::Sal32RI
			| X86Op::Shr32RI
			| X86Op::Sar32RI
			| X86Op::Sal32RC
			| X86Op::Shr32RC
			| X86Op::Sar32RC
			| X86Op::CallM
			| X86Op::MovssRR
			| X86Op::MovsdRR
			| X86Op::MovdxrRR
			| X86Op::MovdrxRR
			| X86Op::XorpsRR
			| X86Op::OrpsRR
			| X86Op::PsllqRI => OpShape::BINARY,
			X86Op::Imul32RRI | X86Op::Imul32RRI8 => OpShape::TERNARY,
			X86Op::Mov32RM
			| X86Op::Movsx8RM
			| X86Op::Movsx16RM
			| X86Op::Movzx8RM
			| X86Op::Movzx16RM
			| X86Op::Add32RM
			| X86Op::Sub32RM
			| X86Op::And32RM
			| X86Op::Or32RM
			| X86Op::Xor32RM
			| X86Op::Cmp32RM
			| X86Op::MovssRM
			| X86Op::MovsdRM => OpShape::TERNARY | OpShape::IS_LOAD,
			X86Op::Mov32MR
			| X86Op::Mov16MR
			| X86Op::Mov8MR
			| X86Op::MovssMR
			| X86Op::MovsdMR => OpShape::TERNARY | OpShape::IS_STORE,
			X86Op::Mov32RA
			| X86Op::Movsx8RA
			| X86Op::Movsx16RA
			| X86Op::Movzx8RA
			| X86Op::Movzx16RA
			| X86Op::MovssRA
			| X86Op::MovsdRA => OpShape::QUIN | OpShape::IS_LOAD,
			X86Op::Mov32AR
			| X86Op::Mov16AR
			| X86Op::Mov8AR
			| X86Op::MovssAR
			| X86Op::MovsdAR => OpShape::QUIN | OpShape::IS_STORE,
			X86Op::Lea32Ra => OpShape::QUIN,
		}
	}

	pub fn is_branch(&self) -> bool {
		self.shape().contains(OpShape::IS_BRANCH)
	}
}

impl Display for X86Op {
	// The variant names already read as mnemonics.
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{self:?}")
	}
}

/// The tttn condition nibble of a `Jcc` instruction.
pub fn cond_encoding(cc: CondCode) -> u8 {
	match cc {
		CondCode::Vs => 0x0,
		CondCode::Vc => 0x1,
		CondCode::Cs => 0x2,
		CondCode::Cc => 0x3,
		CondCode::Eq => 0x4,
		CondCode::Ne => 0x5,
		CondCode::Ls => 0x6,
		CondCode::Hi => 0x7,
		CondCode::Mi => 0x8,
		CondCode::Pl => 0x9,
		CondCode::Lt => 0xC,
		CondCode::Ge => 0xD,
		CondCode::Le => 0xE,
		CondCode::Gt => 0xF,
	}
}

/// True when the instruction set has a sign-extended 8-bit immediate
/// encoding for this value.
pub fn is_simm8(value: i32) -> bool {
	value >= i8::MIN as i32 && value <= i8::MAX as i32
}
