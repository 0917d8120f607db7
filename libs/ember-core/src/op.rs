use std::fmt::{Display, Formatter};

/// An architecture-independent operation as the bytecode front end emits
/// them, after allocation but before instruction selection. Every selector
/// matches this enum exhaustively, so growing it breaks the build until each
/// selector has decided what to do with the new kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpKind {
	Add,
	Sub,
	Adc,
	Sbc,
	Mul,
	And,
	Or,
	Xor,
	Neg,
	Not,
	Lsl,
	Lsr,
	Asr,
	Ror,
	Mov,
	Cmp,
	/// int -> byte, sign extending.
	I2b,
	/// int -> short, sign extending.
	I2s,
	/// int -> char, zero extending.
	I2c,
	/// Indirect call.
	Call,
}

impl OpKind {
	pub fn commutative(&self) -> bool {
		matches!(
			self,
			OpKind::Add | OpKind::Adc | OpKind::And | OpKind::Or | OpKind::Xor
		)
	}
}

impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			OpKind::Add => f.write_str("ADD"),
			OpKind::Sub => f.write_str("SUB"),
			OpKind::Adc => f.write_str("ADC"),
			OpKind::Sbc => f.write_str("SBC"),
			OpKind::Mul => f.write_str("MUL"),
			OpKind::And => f.write_str("AND"),
			OpKind::Or => f.write_str("OR"),
			OpKind::Xor => f.write_str("XOR"),
			OpKind::Neg => f.write_str("NEG"),
			OpKind::Not => f.write_str("NOT"),
			OpKind::Lsl => f.write_str("LSL"),
			OpKind::Lsr => f.write_str("LSR"),
			OpKind::Asr => f.write_str("ASR"),
			OpKind::Ror => f.write_str("ROR"),
			OpKind::Mov => f.write_str("MOV"),
			OpKind::Cmp => f.write_str("CMP"),
			OpKind::I2b => f.write_str("I2B"),
			OpKind::I2s => f.write_str("I2S"),
			OpKind::I2c => f.write_str("I2C"),
			OpKind::Call => f.write_str("CALL"),
		}
	}
}

/// Condition a conditional branch tests. The target-side encoding is a pure
/// total function in the backend crate.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CondCode {
	Eq,
	Ne,
	/// Carry set / unsigned lower.
	Cs,
	/// Carry clear / unsigned higher or same.
	Cc,
	/// Minus / negative.
	Mi,
	/// Plus / positive or zero.
	Pl,
	/// Overflow.
	Vs,
	/// No overflow.
	Vc,
	/// Unsigned higher.
	Hi,
	/// Unsigned lower or same.
	Ls,
	Ge,
	Lt,
	Gt,
	Le,
}

impl Display for CondCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			CondCode::Eq => "eq",
			CondCode::Ne => "ne",
			CondCode::Cs => "cs",
			CondCode::Cc => "cc",
			CondCode::Mi => "mi",
			CondCode::Pl => "pl",
			CondCode::Vs => "vs",
			CondCode::Vc => "vc",
			CondCode::Hi => "hi",
			CondCode::Ls => "ls",
			CondCode::Ge => "ge",
			CondCode::Lt => "lt",
			CondCode::Gt => "gt",
			CondCode::Le => "le",
		};
		f.write_str(name)
	}
}
