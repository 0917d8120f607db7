use crate::lir::LirId;
use crate::opcode::{cond_encoding, X86Op};
use crate::unit::MethodUnit;
use ember_core::CondCode;

impl MethodUnit {
	/// Unconditional jump. The displacement operand is a placeholder the
	/// assembler patches once the target's address is known; a forward
	/// branch passes `None` and gets its target set later.
	pub fn op_unconditional_branch(&mut self, target: Option<LirId>) -> LirId {
		let res = self.push1(X86Op::Jmp8, 0);
		if let Some(target) = target {
			self.set_target(res, target);
		}
		res
	}

	/// Conditional jump; same placeholder discipline, plus the encoded
	/// condition operand.
	pub fn op_cond_branch(&mut self, cc: CondCode, target: Option<LirId>) -> LirId {
		let res = self.push2(X86Op::Jcc8, 0, cond_encoding(cc) as i32);
		if let Some(target) = target {
			self.set_target(res, target);
		}
		res
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ember_core::MachReg;

	#[test]
	fn backward_jump_points_at_its_target() {
		let mut unit = MethodUnit::new(vec![]);
		let dest = unit.op_reg_copy(MachReg::EAX, MachReg::ESI);
		let jump = unit.op_unconditional_branch(Some(dest));
		let inst = unit.inst(jump);
		assert_eq!(inst.op, X86Op::Jmp8);
		assert_eq!(inst.imm(0), 0);
		assert_eq!(inst.target, Some(dest));
	}

	#[test]
	fn forward_branch_is_patched_later() {
		let mut unit = MethodUnit::new(vec![]);
		let branch = unit.op_cond_branch(CondCode::Ne, None);
		assert_eq!(unit.inst(branch).target, None);
		let dest = unit.op_reg_copy(MachReg::EAX, MachReg::ESI);
		unit.set_target(branch, dest);
		let inst = unit.inst(branch);
		assert_eq!(inst.op, X86Op::Jcc8);
		assert_eq!(inst.imm(1), cond_encoding(CondCode::Ne) as i32);
		assert_eq!(inst.target, Some(dest));
	}

	#[test]
	#[should_panic]
	fn only_branches_take_targets() {
		let mut unit = MethodUnit::new(vec![]);
		let mov = unit.op_reg_copy(MachReg::EAX, MachReg::ESI);
		let dest = unit.op_reg_copy(MachReg::ECX, MachReg::ESI);
		unit.set_target(mov, dest);
	}
}
