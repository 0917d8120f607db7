use std::fmt::{Display, Formatter};

/// Width and signedness of a memory access. Only the load/store engine
/// dispatches on this; in-register arithmetic is always full width.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum OperandSize {
	Word,
	Long,
	Single,
	Double,
	SignedHalf,
	UnsignedHalf,
	SignedByte,
	UnsignedByte,
}

impl OperandSize {
	/// A wide value occupies a register pair (or one fused double).
	pub fn is_wide(&self) -> bool {
		matches!(self, OperandSize::Long | OperandSize::Double)
	}

	/// Required displacement alignment. Wide accesses are checked per 32-bit
	/// half, so 4 rather than 8.
	pub fn alignment(&self) -> i32 {
		match self {
			OperandSize::Word | OperandSize::Long | OperandSize::Single | OperandSize::Double => 4,
			OperandSize::SignedHalf | OperandSize::UnsignedHalf => 2,
			OperandSize::SignedByte | OperandSize::UnsignedByte => 1,
		}
	}
}

impl Display for OperandSize {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			OperandSize::Word => f.write_str("word"),
			OperandSize::Long => f.write_str("long"),
			OperandSize::Single => f.write_str("single"),
			OperandSize::Double => f.write_str("double"),
			OperandSize::SignedHalf => f.write_str("half"),
			OperandSize::UnsignedHalf => f.write_str("uhalf"),
			OperandSize::SignedByte => f.write_str("byte"),
			OperandSize::UnsignedByte => f.write_str("ubyte"),
		}
	}
}
