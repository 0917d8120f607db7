use crate::lir::{LirId, LirInst, Operand};
use crate::opcode::X86Op;
use ember_core::MachReg;
use tracing::trace;

/// A frame-slot access, recorded for the stack-map/debug tooling whenever a
/// load or store goes through the stack pointer. Purely observational; it
/// never changes what gets emitted.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FrameAccess {
	pub inst: LirId,
	pub slot: i32,
	pub is_load: bool,
	pub wide: bool,
}

/// The temporary-register service the register allocator exposes to the
/// lowering. Every borrow is released before the lowering call that took it
/// returns; the pool holds no other state.
#[derive(Debug)]
pub struct TempPool {
	free: Vec<MachReg>,
}

impl TempPool {
	pub fn new(free: Vec<MachReg>) -> TempPool {
		TempPool { free }
	}

	pub fn alloc(&mut self) -> MachReg {
		self.free.pop().expect("out of temporary registers")
	}

	pub fn free(&mut self, reg: MachReg) {
		debug_assert!(!self.free.contains(&reg), "{reg} freed twice");
		self.free.push(reg);
	}

	pub fn available(&self) -> usize {
		self.free.len()
	}
}

/// The instruction stream of one method being compiled, together with the
/// collaborator seams the lowering needs: the temporary pool and the
/// frame-access annotations. All lowering entry points live in `lower/` as
/// methods on this type.
pub struct MethodUnit {
	insts: Vec<LirInst>,
	pos: u32,
	pool: TempPool,
	frame_accesses: Vec<FrameAccess>,
}

impl MethodUnit {
	pub fn new(temps: Vec<MachReg>) -> MethodUnit {
		MethodUnit {
			insts: Vec::new(),
			pos: 0,
			pool: TempPool::new(temps),
			frame_accesses: Vec::new(),
		}
	}

	/// Bytecode offset stamped onto every instruction appended from now on.
	pub fn set_pos(&mut self, pos: u32) {
		self.pos = pos;
	}

	pub fn insts(&self) -> &[LirInst] {
		&self.insts
	}

	pub fn inst(&self, id: LirId) -> &LirInst {
		&self.insts[id.0 as usize]
	}

	fn push(&mut self, op: X86Op, operands: Vec<Operand>) -> LirId {
		debug_assert_eq!(
			op.shape().operand_count(),
			operands.len(),
			"{op} built with the wrong operand count"
		);
		let id = LirId(self.insts.len() as u32);
		let inst = LirInst {
			op,
			operands,
			target: None,
			nop: false,
			pos: self.pos,
		};
		trace!("#{} {}", id.0, inst);
		self.insts.push(inst);
		id
	}

	pub fn push1(&mut self, op: X86Op, a: impl Into<Operand>) -> LirId {
		self.push(op, vec![a.into()])
	}

	pub fn push2(&mut self, op: X86Op, a: impl Into<Operand>, b: impl Into<Operand>) -> LirId {
		self.push(op, vec![a.into(), b.into()])
	}

	pub fn push3(
		&mut self,
		op: X86Op,
		a: impl Into<Operand>,
		b: impl Into<Operand>,
		c: impl Into<Operand>,
	) -> LirId {
		self.push(op, vec![a.into(), b.into(), c.into()])
	}

	pub fn push5(
		&mut self,
		op: X86Op,
		a: impl Into<Operand>,
		b: impl Into<Operand>,
		c: impl Into<Operand>,
		d: impl Into<Operand>,
		e: impl Into<Operand>,
	) -> LirId {
		self.push(
			op,
			vec![a.into(), b.into(), c.into(), d.into(), e.into()],
		)
	}

	/// Patch a forward branch once its destination record exists.
	pub fn set_target(&mut self, branch: LirId, target: LirId) {
		let inst = &mut self.insts[branch.0 as usize];
		debug_assert!(inst.op.is_branch(), "{} cannot take a branch target", inst.op);
		inst.target = Some(target);
	}

	pub fn mark_nop(&mut self, id: LirId) {
		self.insts[id.0 as usize].nop = true;
	}

	pub fn alloc_temp(&mut self) -> MachReg {
		self.pool.alloc()
	}

	pub fn free_temp(&mut self, reg: MachReg) {
		self.pool.free(reg);
	}

	pub fn free_temps(&self) -> usize {
		self.pool.available()
	}

	/// Borrow a temporary for the duration of `f`. Release happens on every
	/// exit path; a fault inside `f` aborts the unit anyway.
	pub fn with_temp<R>(&mut self, f: impl FnOnce(&mut MethodUnit, MachReg) -> R) -> R {
		let tmp = self.alloc_temp();
		let result = f(self, tmp);
		self.free_temp(tmp);
		result
	}

	pub fn annotate_frame_access(&mut self, inst: LirId, slot: i32, is_load: bool, wide: bool) {
		self.frame_accesses.push(FrameAccess {
			inst,
			slot,
			is_load,
			wide,
		});
	}

	pub fn frame_accesses(&self) -> &[FrameAccess] {
		&self.frame_accesses
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stream_stamps_positions() {
		let mut unit = MethodUnit::new(vec![]);
		unit.set_pos(7);
		let id = unit.push2(X86Op::Mov32RR, MachReg::EAX, MachReg::ECX);
		assert_eq!(unit.inst(id).pos, 7);
		unit.set_pos(9);
		let id = unit.push1(X86Op::Neg32R, MachReg::EAX);
		assert_eq!(unit.inst(id).pos, 9);
	}

	#[test]
	fn scoped_temp_is_released() {
		let mut unit = MethodUnit::new(vec![MachReg::EDX, MachReg::ECX]);
		assert_eq!(unit.free_temps(), 2);
		let tmp = unit.with_temp(|unit, tmp| {
			assert_eq!(unit.free_temps(), 1);
			tmp
		});
		assert_eq!(tmp, MachReg::ECX);
		assert_eq!(unit.free_temps(), 2);
	}

	#[test]
	fn target_patching() {
		let mut unit = MethodUnit::new(vec![]);
		let branch = unit.push1(X86Op::Jmp8, 0);
		let dest = unit.push2(X86Op::Mov32RR, MachReg::EAX, MachReg::ECX);
		unit.set_target(branch, dest);
		assert_eq!(unit.inst(branch).target, Some(dest));
	}
}
