use crate::lir::LirId;
use crate::opcode::X86Op;
use crate::unit::MethodUnit;
use ember_core::MachReg;

impl MethodUnit {
	/// Every 32-bit immediate encodes directly on this target; nothing ever
	/// needs a literal pool.
	pub fn is_cheap_constant(&self, _reg: MachReg, _value: i32) -> bool {
		true
	}

	/// Load an immediate without clobbering anything but the destination. A
	/// floating destination routes the value through a borrowed
	/// general-purpose temporary.
	pub fn load_constant(&mut self, dest: MachReg, value: i32) -> LirId {
		if dest.is_float() {
			if value == 0 {
				return self.push2(X86Op::XorpsRR, dest, dest);
			}
			assert!(
				dest.is_single(),
				"64-bit fp constants go through load_constant_wide, not {dest}"
			);
			return self.with_temp(|unit, tmp| {
				let res = unit.load_gpr_constant(tmp, value);
				unit.push2(X86Op::MovdxrRR, dest, tmp);
				res
			});
		}
		self.load_gpr_constant(dest, value)
	}

	fn load_gpr_constant(&mut self, dest: MachReg, value: i32) -> LirId {
		if value == 0 {
			self.push2(X86Op::Xor32RR, dest, dest)
		} else {
			// there is no byte immediate form of a 32-bit move
			self.push2(X86Op::Mov32RI, dest, value)
		}
	}

	/// Load a 64-bit immediate into a register pair. A floating pair has no
	/// 64-bit immediate load, so the high half is built in the adjacent
	/// single, shifted up and or-merged into the low half.
	pub fn load_constant_wide(
		&mut self,
		dest_lo: MachReg,
		dest_hi: MachReg,
		value: i64,
	) -> LirId {
		let val_lo = value as i32;
		let val_hi = (value >> 32) as i32;
		if dest_lo.is_float() {
			assert!(
				dest_hi.is_float(),
				"fp pair with a gpr high half: {dest_lo}/{dest_hi}"
			);
			if val_lo == 0 && val_hi == 0 {
				return self.push2(X86Op::XorpsRR, dest_lo, dest_lo);
			}
			let res = if val_lo == 0 {
				self.push2(X86Op::XorpsRR, dest_lo, dest_lo)
			} else {
				self.load_constant(dest_lo, val_lo)
			};
			if val_hi != 0 {
				self.load_constant(dest_hi, val_hi);
				self.push2(X86Op::PsllqRI, dest_hi, 32);
				self.push2(X86Op::OrpsRR, dest_lo, dest_hi);
			}
			res
		} else {
			let res = self.load_gpr_constant(dest_lo, val_lo);
			self.load_gpr_constant(dest_hi, val_hi);
			res
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit() -> MethodUnit {
		MethodUnit::new(vec![MachReg::EDX])
	}

	#[test]
	fn zero_clears_via_self_xor() {
		let mut unit = unit();
		let id = unit.load_constant(MachReg::EAX, 0);
		assert_eq!(unit.insts().len(), 1);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Xor32RR);
		assert_eq!(inst.reg(0), inst.reg(1));
	}

	#[test]
	fn zero_clears_a_float_destination_via_packed_xor() {
		let mut unit = unit();
		let id = unit.load_constant(MachReg::FloatSingle(0), 0);
		assert_eq!(unit.insts().len(), 1);
		assert_eq!(unit.inst(id).op, X86Op::XorpsRR);
	}

	#[test]
	fn nonzero_gpr_is_a_full_width_move() {
		let mut unit = unit();
		let id = unit.load_constant(MachReg::EAX, 5);
		let inst = unit.inst(id);
		assert_eq!(inst.op, X86Op::Mov32RI);
		assert_eq!(inst.imm(1), 5);
	}

	#[test]
	fn float_destination_routes_through_a_temp() {
		let mut unit = unit();
		let before = unit.free_temps();
		unit.load_constant(MachReg::FloatSingle(1), 7);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RI, X86Op::MovdxrRR]);
		assert_eq!(unit.insts()[0].reg(0), MachReg::EDX);
		assert_eq!(unit.free_temps(), before);
	}

	#[test]
	fn wide_gpr_materializes_both_halves() {
		let mut unit = unit();
		unit.load_constant_wide(MachReg::EAX, MachReg::ECX, 0x1_0000_0005);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RI, X86Op::Mov32RI]);
		assert_eq!(unit.insts()[0].imm(1), 5);
		assert_eq!(unit.insts()[1].imm(1), 1);
	}

	#[test]
	fn wide_fp_zero_is_one_xor() {
		let mut unit = unit();
		unit.load_constant_wide(MachReg::FloatSingle(0), MachReg::FloatSingle(1), 0);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::XorpsRR]);
	}

	#[test]
	fn wide_fp_with_zero_high_half_skips_the_merge() {
		let mut unit = unit();
		let before = unit.free_temps();
		unit.load_constant_wide(MachReg::FloatSingle(0), MachReg::FloatSingle(1), 5);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		assert_eq!(ops, [X86Op::Mov32RI, X86Op::MovdxrRR]);
		assert_eq!(unit.free_temps(), before);
	}

	#[test]
	fn wide_fp_merges_a_nonzero_high_half() {
		let mut unit = unit();
		let lo = MachReg::FloatSingle(0);
		let hi = MachReg::FloatSingle(1);
		unit.load_constant_wide(lo, hi, 0x2_0000_0000);
		let ops: Vec<X86Op> = unit.insts().iter().map(|i| i.op).collect();
		// low half cleared, high half built then shifted and merged
		assert_eq!(
			ops,
			[
				X86Op::XorpsRR,
				X86Op::Mov32RI,
				X86Op::MovdxrRR,
				X86Op::PsllqRI,
				X86Op::OrpsRR,
			]
		);
		let last = unit.insts().last().unwrap();
		assert_eq!(last.reg(0), lo);
		assert_eq!(last.reg(1), hi);
	}
}
