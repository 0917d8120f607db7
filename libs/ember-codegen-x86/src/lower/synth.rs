use crate::lir::LirId;
use crate::opcode::{is_simm8, X86Op};
use crate::unit::MethodUnit;
use ember_core::{MachReg, OpKind};

impl MethodUnit {
	/// `dest = src1 OP src2` on top of two-operand instructions. Strategy is
	/// picked by how the destination aliases the sources.
	pub fn op_reg_reg_reg(
		&mut self,
		op: OpKind,
		dest: MachReg,
		src1: MachReg,
		src2: MachReg,
	) -> LirId {
		if dest != src1 && dest != src2 {
			if op == OpKind::Add {
				if src1 == src2 {
					// lea cannot put one register in both the base and the
					// index slot; double via shift instead.
					self.op_reg_copy(dest, src1);
					self.op_reg_imm(OpKind::Lsl, dest, 1)
				} else if src1 != MachReg::EBP {
					// ebp as a base needs a displacement byte
					self.push5(X86Op::Lea32Ra, dest, src1, src2, 0, 0)
				} else {
					self.push5(X86Op::Lea32Ra, dest, src2, src1, 0, 0)
				}
			} else {
				self.op_reg_copy(dest, src1);
				self.op_reg_reg(op, dest, src2)
			}
		} else if dest == src1 {
			self.op_reg_reg(op, dest, src2)
		} else {
			// dest == src2
			match op {
				OpKind::Sub => {
					// non-commutative: dest = -(dest) + src1
					self.op_reg(OpKind::Neg, dest);
					self.op_reg_reg(OpKind::Add, dest, src1)
				}
				OpKind::Sbc | OpKind::Lsl | OpKind::Lsr | OpKind::Asr | OpKind::Ror => self
					.with_temp(|unit, tmp| {
						unit.op_reg_copy(tmp, src1);
						unit.op_reg_reg(op, tmp, src2);
						unit.op_reg_copy(dest, tmp)
					}),
				OpKind::Add | OpKind::Adc | OpKind::Or | OpKind::And | OpKind::Xor => {
					debug_assert!(op.commutative());
					self.op_reg_reg(op, dest, src1)
				}
				OpKind::Mul
				| OpKind::Neg
				| OpKind::Not
				| OpKind::Mov
				| OpKind::Cmp
				| OpKind::I2b
				| OpKind::I2s
				| OpKind::I2c
				| OpKind::Call => {
					panic!("{op} cannot be synthesized with dest aliasing src2")
				}
			}
		}
	}

	/// `dest = src OP imm` on top of two-operand instructions.
	pub fn op_reg_reg_imm(&mut self, op: OpKind, dest: MachReg, src: MachReg, value: i32) -> LirId {
		if op == OpKind::Mul {
			let opcode = if is_simm8(value) {
				X86Op::Imul32RRI8
			} else {
				X86Op::Imul32RRI
			};
			return self.push3(opcode, dest, src, value);
		}
		if op == OpKind::And {
			// Masks that are really zero extensions.
			if value == 0xFF && src.is_byte_addressable() {
				return self.push2(X86Op::Movzx8RR, dest, src);
			} else if value == 0xFFFF {
				return self.push2(X86Op::Movzx16RR, dest, src);
			}
		}
		if dest != src {
			if op == OpKind::Add {
				// lea dest, [src + value]; esp in the index slot encodes
				// "no index" in the SIB byte.
				return self.push5(X86Op::Lea32Ra, dest, src, MachReg::ESP, 0, value);
			}
			self.op_reg_copy(dest, src);
		}
		self.op_reg_imm(op, dest, value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit() -> MethodUnit {
		MethodUnit::new(vec![MachReg::EDX])
	}

	#[test]
	fn add_without_aliasing_is_one_lea() {
		let mut unit = unit();
		let id = unit.op_reg_reg_reg(OpKind::Add, MachReg::EAX, MachReg::ESI, MachReg::EDI);
		assert_eq!(unit.insts().len(), 1);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Lea32Ra);
		assert_eq!(inst.reg(1), MachReg::ESI);
		assert_eq!(inst.reg(2), MachReg::EDI);
	}

	#[test]
	fn add_with_equal_sources_doubles_via_shift() {
		let mut unit = unit();
		unit.op_reg_reg_reg(OpKind::Add, MachReg::EAX, MachReg::EBX, MachReg::EBX);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RR, X86Op::Sal32RI]);
		assert_eq!(unit.insts()[1].imm(1), 1);
	}

	#[test]
	fn add_swaps_ebp_out_of_the_base_slot() {
		let mut unit = unit();
		let id = unit.op_reg_reg_reg(OpKind::Add, MachReg::EAX, MachReg::EBP, MachReg::ESI);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Lea32Ra);
		assert_eq!(inst.reg(1), MachReg::ESI);
		assert_eq!(inst.reg(2), MachReg::EBP);
	}

	#[test]
	fn non_add_copies_then_operates() {
		let mut unit = unit();
		unit.op_reg_reg_reg(OpKind::Xor, MachReg::EAX, MachReg::ESI, MachReg::EDI);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RR, X86Op::Xor32RR]);
	}

	#[test]
	fn dest_aliasing_src1_operates_in_place() {
		let mut unit = unit();
		let id = unit.op_reg_reg_reg(OpKind::Sub, MachReg::EAX, MachReg::EAX, MachReg::ESI);
		assert_eq!(unit.insts().len(), 1);
		assert_eq!(unit.inst(id).op, X86Op::Sub32RR);
	}

	#[test]
	fn sub_with_dest_aliasing_src2_negates_then_adds() {
		let mut unit = unit();
		unit.op_reg_reg_reg(OpKind::Sub, MachReg::EAX, MachReg::ESI, MachReg::EAX);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Neg32R, X86Op::Add32RR]);
		assert_eq!(unit.insts()[1].reg(1), MachReg::ESI);
	}

	#[test]
	fn commutative_with_dest_aliasing_src2_swaps() {
		let mut unit = unit();
		let id = unit.op_reg_reg_reg(OpKind::And, MachReg::EAX, MachReg::ESI, MachReg::EAX);
		assert_eq!(unit.insts().len(), 1);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::And32RR);
		assert_eq!(inst.reg(1), MachReg::ESI);
	}

	#[test]
	fn shift_with_dest_aliasing_src2_borrows_a_temp() {
		let mut unit = unit();
		let before = unit.free_temps();
		unit.op_reg_reg_reg(OpKind::Lsl, MachReg::ECX, MachReg::ESI, MachReg::ECX);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RR, X86Op::Sal32RC, X86Op::Mov32RR]);
		assert_eq!(unit.free_temps(), before);
	}

	#[test]
	fn and_mask_rewrites_to_zero_extension() {
		let mut unit = unit();
		let id = unit.op_reg_reg_imm(OpKind::And, MachReg::EAX, MachReg::ECX, 0xFF);
		assert_eq!(unit.inst(id).op, X86Op::Movzx8RR);
		let id = unit.op_reg_reg_imm(OpKind::And, MachReg::EAX, MachReg::ESI, 0xFFFF);
		assert_eq!(unit.inst(id).op, X86Op::Movzx16RR);
	}

	#[test]
	fn and_byte_mask_from_high_register_is_not_rewritten() {
		let mut unit = unit();
		unit.op_reg_reg_imm(OpKind::And, MachReg::EAX, MachReg::ESI, 0xFF);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RR, X86Op::And32RI]);
	}

	#[test]
	fn add_immediate_without_aliasing_is_lea_with_displacement() {
		let mut unit = unit();
		let id = unit.op_reg_reg_imm(OpKind::Add, MachReg::EAX, MachReg::ESI, 40);
		assert_eq!(unit.insts().len(), 1);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Lea32Ra);
		assert_eq!(inst.reg(1), MachReg::ESI);
		assert_eq!(inst.imm(4), 40);
	}

	#[test]
	fn shift_immediate_without_aliasing_copies_first() {
		let mut unit = unit();
		unit.op_reg_reg_imm(OpKind::Lsl, MachReg::EAX, MachReg::ESI, 2);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RR, X86Op::Sal32RI]);
	}

	#[test]
	fn mul_immediate_ignores_aliasing() {
		let mut unit = unit();
		let id = unit.op_reg_reg_imm(OpKind::Mul, MachReg::EAX, MachReg::ESI, 100);
		assert_eq!(unit.insts().len(), 1);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Imul32RRI8);
		assert_eq!(inst.reg(1), MachReg::ESI);
	}
}
