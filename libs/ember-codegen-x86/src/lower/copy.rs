use crate::lir::LirId;
use crate::opcode::{OpShape, X86Op};
use crate::unit::MethodUnit;
use ember_core::MachReg;

impl MethodUnit {
	/// Register-to-register copy with at least one floating register
	/// involved. Both sides must be double or both not double.
	pub fn op_fp_reg_copy(&mut self, dest: MachReg, src: MachReg) -> LirId {
		assert_eq!(
			dest.is_double(),
			src.is_double(),
			"fp copy width mismatch: {dest} <- {src}"
		);
		let opcode = if dest.is_double() {
			X86Op::MovsdRR
		} else if dest.is_single() {
			if src.is_single() {
				X86Op::MovssRR
			} else {
				// fpr <- gpr
				X86Op::MovdxrRR
			}
		} else {
			// gpr <- fpr
			assert!(src.is_single(), "gpr copy routed through the fp path: {dest} <- {src}");
			X86Op::MovdrxRR
		};
		debug_assert!(opcode.shape().contains(OpShape::BINARY));
		let res = self.push2(opcode, dest, src);
		if dest == src {
			self.mark_nop(res);
		}
		res
	}

	/// Class-aware register copy. A same-register copy is still emitted but
	/// flagged as a nop; downstream bookkeeping wants the record.
	pub fn op_reg_copy(&mut self, dest: MachReg, src: MachReg) -> LirId {
		if dest.is_float() || src.is_float() {
			return self.op_fp_reg_copy(dest, src);
		}
		let res = self.push2(X86Op::Mov32RR, dest, src);
		if dest == src {
			self.mark_nop(res);
		}
		res
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit() -> MethodUnit {
		MethodUnit::new(vec![])
	}

	#[test]
	fn gpr_copy() {
		let mut unit = unit();
		let id = unit.op_reg_copy(MachReg::EAX, MachReg::ESI);
		assert_eq!(unit.inst(id).op, X86Op::Mov32RR);
		assert!(!unit.inst(id).nop);
	}

	#[test]
	fn self_copy_is_nop_but_kept() {
		let mut unit = unit();
		let id = unit.op_reg_copy(MachReg::EAX, MachReg::EAX);
		assert_eq!(unit.insts().len(), 1);
		assert!(unit.inst(id).nop);
	}

	#[test]
	fn cross_class_copies() {
		let mut unit = unit();
		let fpr = MachReg::FloatSingle(1);
		let id = unit.op_reg_copy(fpr, MachReg::EAX);
		assert_eq!(unit.inst(id).op, X86Op::MovdxrRR);
		let id = unit.op_reg_copy(MachReg::EAX, fpr);
		assert_eq!(unit.inst(id).op, X86Op::MovdrxRR);
		let id = unit.op_reg_copy(MachReg::FloatSingle(2), fpr);
		assert_eq!(unit.inst(id).op, X86Op::MovssRR);
		let id = unit.op_reg_copy(MachReg::FloatDouble(2), MachReg::FloatDouble(3));
		assert_eq!(unit.inst(id).op, X86Op::MovsdRR);
	}

	#[test]
	#[should_panic]
	fn mixed_width_fp_copy_faults() {
		let mut unit = unit();
		unit.op_fp_reg_copy(MachReg::FloatDouble(0), MachReg::FloatSingle(1));
	}
}
