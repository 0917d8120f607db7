use std::fmt::{Debug, Display, Formatter};

/// A physical register the allocator hands out. A register is exactly one of
/// general-purpose, floating single or floating double; a double aliases the
/// two adjacent singles it was fused from.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum MachReg {
	Gpr(u8),
	FloatSingle(u8),
	FloatDouble(u8),
}

impl MachReg {
	pub const EAX: MachReg = MachReg::Gpr(0);
	pub const ECX: MachReg = MachReg::Gpr(1);
	pub const EDX: MachReg = MachReg::Gpr(2);
	pub const EBX: MachReg = MachReg::Gpr(3);
	pub const ESP: MachReg = MachReg::Gpr(4);
	pub const EBP: MachReg = MachReg::Gpr(5);
	pub const ESI: MachReg = MachReg::Gpr(6);
	pub const EDI: MachReg = MachReg::Gpr(7);

	pub fn num(&self) -> u8 {
		match self {
			MachReg::Gpr(n) => *n,
			MachReg::FloatSingle(n) => *n,
			MachReg::FloatDouble(n) => *n,
		}
	}

	pub fn is_float(&self) -> bool {
		matches!(self, MachReg::FloatSingle(_) | MachReg::FloatDouble(_))
	}

	pub fn is_single(&self) -> bool {
		matches!(self, MachReg::FloatSingle(_))
	}

	pub fn is_double(&self) -> bool {
		matches!(self, MachReg::FloatDouble(_))
	}

	/// A double is the only register that holds a 64-bit value by itself.
	pub fn is_pair(&self) -> bool {
		self.is_double()
	}

	/// Only eax..ebx have 8-bit aliases (al, cl, dl, bl).
	pub fn is_byte_addressable(&self) -> bool {
		matches!(self, MachReg::Gpr(n) if *n < 4)
	}

	/// Fuse this single with the adjacent `high` single into the double that
	/// aliases both. The halves must form an even/odd adjacent pair.
	pub fn pair_with(self, high: MachReg) -> MachReg {
		match (self, high) {
			(MachReg::FloatSingle(lo), MachReg::FloatSingle(hi)) => {
				assert_eq!(lo % 2, 0, "pair low half fr{lo} is not even");
				assert_eq!(hi, lo + 1, "pair halves fr{lo}/fr{hi} are not adjacent");
				MachReg::FloatDouble(lo / 2)
			}
			(lo, hi) => panic!("cannot pair {lo} with {hi}"),
		}
	}
}

impl Display for MachReg {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		const GPR_NAMES: [&str; 8] = ["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"];
		match self {
			MachReg::Gpr(n) if (*n as usize) < GPR_NAMES.len() => {
				f.write_str(GPR_NAMES[*n as usize])
			}
			MachReg::Gpr(n) => write!(f, "r{n}"),
			MachReg::FloatSingle(n) => write!(f, "fr{n}"),
			MachReg::FloatDouble(n) => write!(f, "dr{n}"),
		}
	}
}

impl Debug for MachReg {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}
