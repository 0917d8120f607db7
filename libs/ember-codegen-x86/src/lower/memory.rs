use crate::lir::LirId;
use crate::opcode::X86Op;
use crate::unit::MethodUnit;
use ember_core::{MachReg, OperandSize};

/// Byte offsets of the halves of a 64-bit value in memory.
pub const LO_OFFSET: i32 = 0;
pub const HI_OFFSET: i32 = 4;

impl MethodUnit {
	/// The one load construction every variant funnels through: base plus
	/// optional scaled index plus displacement, into a register or register
	/// pair. Alignment is the caller's problem and only asserted here.
	pub fn load_base_indexed_disp(
		&mut self,
		base: MachReg,
		index: Option<(MachReg, i32)>,
		displacement: i32,
		dest: MachReg,
		dest_hi: Option<MachReg>,
		size: OperandSize,
	) -> LirId {
		let is_array = index.is_some();
		let mut pair = false;
		let mut dest = dest;
		let mut dest_hi = dest_hi;
		let wide = size.is_wide();
		let opcode = match size {
			OperandSize::Long | OperandSize::Double => {
				if dest.is_float() {
					if dest.is_single() {
						let hi = dest_hi
							.take()
							.expect("wide fp load without the pair's high half");
						dest = dest.pair_with(hi);
					}
					dest_hi = None;
					if is_array {
						X86Op::MovsdRA
					} else {
						X86Op::MovsdRM
					}
				} else {
					pair = true;
					if is_array {
						X86Op::Mov32RA
					} else {
						X86Op::Mov32RM
					}
				}
			}
			OperandSize::Word | OperandSize::Single => {
				if dest.is_float() {
					assert!(dest.is_single(), "{size} load into {dest}");
					if is_array {
						X86Op::MovssRA
					} else {
						X86Op::MovssRM
					}
				} else if is_array {
					X86Op::Mov32RA
				} else {
					X86Op::Mov32RM
				}
			}
			OperandSize::UnsignedHalf => {
				if is_array {
					X86Op::Movzx16RA
				} else {
					X86Op::Movzx16RM
				}
			}
			OperandSize::SignedHalf => {
				if is_array {
					X86Op::Movsx16RA
				} else {
					X86Op::Movsx16RM
				}
			}
			OperandSize::UnsignedByte => {
				if is_array {
					X86Op::Movzx8RA
				} else {
					X86Op::Movzx8RM
				}
			}
			OperandSize::SignedByte => {
				if is_array {
					X86Op::Movsx8RA
				} else {
					X86Op::Movsx8RM
				}
			}
		};
		assert_eq!(
			displacement & (size.alignment() - 1),
			0,
			"misaligned {size} load at displacement {displacement}"
		);

		let load;
		let mut load2 = None;
		match index {
			None => {
				if !pair {
					load = self.push3(opcode, dest, base, displacement);
				} else {
					let hi = dest_hi.expect("wide gpr load without a high register");
					if base == dest {
						// the low move would clobber the base before the
						// high half is read
						load2 = Some(self.push3(opcode, hi, base, displacement + HI_OFFSET));
						load = self.push3(opcode, dest, base, displacement + LO_OFFSET);
					} else {
						load = self.push3(opcode, dest, base, displacement + LO_OFFSET);
						load2 = Some(self.push3(opcode, hi, base, displacement + HI_OFFSET));
					}
				}
				if base == MachReg::ESP {
					let slot = (displacement + if pair { LO_OFFSET } else { 0 }) >> 2;
					self.annotate_frame_access(load, slot, true, wide);
					if let Some(load2) = load2 {
						self.annotate_frame_access(load2, (displacement + HI_OFFSET) >> 2, true, wide);
					}
				}
			}
			Some((index, scale)) => {
				if !pair {
					load = self.push5(opcode, dest, base, index, scale, displacement + LO_OFFSET);
				} else {
					let hi = dest_hi.expect("wide gpr load without a high register");
					if base == dest {
						load2 = Some(self.push5(
							opcode,
							hi,
							base,
							index,
							scale,
							displacement + HI_OFFSET,
						));
						load = self.push5(opcode, dest, base, index, scale, displacement + LO_OFFSET);
					} else {
						load = self.push5(opcode, dest, base, index, scale, displacement + LO_OFFSET);
						load2 = Some(self.push5(
							opcode,
							hi,
							base,
							index,
							scale,
							displacement + HI_OFFSET,
						));
					}
				}
			}
		}
		load
	}

	/// Store counterpart of [`Self::load_base_indexed_disp`]; the same
	/// pairing, alignment and ordering rules apply.
	pub fn store_base_indexed_disp(
		&mut self,
		base: MachReg,
		index: Option<(MachReg, i32)>,
		displacement: i32,
		src: MachReg,
		src_hi: Option<MachReg>,
		size: OperandSize,
	) -> LirId {
		let is_array = index.is_some();
		let mut pair = false;
		let mut src = src;
		let mut src_hi = src_hi;
		let wide = size.is_wide();
		let opcode = match size {
			OperandSize::Long | OperandSize::Double => {
				if src.is_float() {
					if src.is_single() {
						let hi = src_hi
							.take()
							.expect("wide fp store without the pair's high half");
						src = src.pair_with(hi);
					}
					src_hi = None;
					if is_array {
						X86Op::MovsdAR
					} else {
						X86Op::MovsdMR
					}
				} else {
					pair = true;
					if is_array {
						X86Op::Mov32AR
					} else {
						X86Op::Mov32MR
					}
				}
			}
			OperandSize::Word | OperandSize::Single => {
				if src.is_float() {
					assert!(src.is_single(), "{size} store from {src}");
					if is_array {
						X86Op::MovssAR
					} else {
						X86Op::MovssMR
					}
				} else if is_array {
					X86Op::Mov32AR
				} else {
					X86Op::Mov32MR
				}
			}
			OperandSize::SignedHalf | OperandSize::UnsignedHalf => {
				if is_array {
					X86Op::Mov16AR
				} else {
					X86Op::Mov16MR
				}
			}
			OperandSize::SignedByte | OperandSize::UnsignedByte => {
				if is_array {
					X86Op::Mov8AR
				} else {
					X86Op::Mov8MR
				}
			}
		};
		assert_eq!(
			displacement & (size.alignment() - 1),
			0,
			"misaligned {size} store at displacement {displacement}"
		);

		let store;
		let mut store2 = None;
		match index {
			None => {
				if !pair {
					store = self.push3(opcode, base, displacement, src);
				} else {
					let hi = src_hi.expect("wide gpr store without a high register");
					if base == src {
						store2 = Some(self.push3(opcode, base, displacement + HI_OFFSET, hi));
						store = self.push3(opcode, base, displacement + LO_OFFSET, src);
					} else {
						store = self.push3(opcode, base, displacement + LO_OFFSET, src);
						store2 = Some(self.push3(opcode, base, displacement + HI_OFFSET, hi));
					}
				}
				if base == MachReg::ESP {
					let slot = (displacement + if pair { LO_OFFSET } else { 0 }) >> 2;
					self.annotate_frame_access(store, slot, false, wide);
					if let Some(store2) = store2 {
						self.annotate_frame_access(
							store2,
							(displacement + HI_OFFSET) >> 2,
							false,
							wide,
						);
					}
				}
			}
			Some((index, scale)) => {
				if !pair {
					store = self.push5(opcode, base, index, scale, displacement + LO_OFFSET, src);
				} else {
					let hi = src_hi.expect("wide gpr store without a high register");
					if base == src {
						store2 = Some(self.push5(
							opcode,
							base,
							index,
							scale,
							displacement + HI_OFFSET,
							hi,
						));
						store = self.push5(opcode, base, index, scale, displacement + LO_OFFSET, src);
					} else {
						store = self.push5(opcode, base, index, scale, displacement + LO_OFFSET, src);
						store2 = Some(self.push5(
							opcode,
							base,
							index,
							scale,
							displacement + HI_OFFSET,
							hi,
						));
					}
				}
			}
		}
		store
	}

	pub fn load_base_disp(
		&mut self,
		base: MachReg,
		displacement: i32,
		dest: MachReg,
		size: OperandSize,
	) -> LirId {
		self.load_base_indexed_disp(base, None, displacement, dest, None, size)
	}

	pub fn load_base_disp_wide(
		&mut self,
		base: MachReg,
		displacement: i32,
		dest_lo: MachReg,
		dest_hi: MachReg,
	) -> LirId {
		self.load_base_indexed_disp(base, None, displacement, dest_lo, Some(dest_hi), OperandSize::Long)
	}

	/// Load from base + index * 2^scale.
	pub fn load_base_indexed(
		&mut self,
		base: MachReg,
		index: MachReg,
		dest: MachReg,
		scale: i32,
		size: OperandSize,
	) -> LirId {
		self.load_base_indexed_disp(base, Some((index, scale)), 0, dest, None, size)
	}

	pub fn store_base_disp(
		&mut self,
		base: MachReg,
		displacement: i32,
		src: MachReg,
		size: OperandSize,
	) -> LirId {
		self.store_base_indexed_disp(base, None, displacement, src, None, size)
	}

	pub fn store_base_disp_wide(
		&mut self,
		base: MachReg,
		displacement: i32,
		src_lo: MachReg,
		src_hi: MachReg,
	) -> LirId {
		self.store_base_indexed_disp(base, None, displacement, src_lo, Some(src_hi), OperandSize::Long)
	}

	/// Store to base + index * 2^scale.
	pub fn store_base_indexed(
		&mut self,
		base: MachReg,
		index: MachReg,
		src: MachReg,
		scale: i32,
		size: OperandSize,
	) -> LirId {
		self.store_base_indexed_disp(base, Some((index, scale)), 0, src, None, size)
	}
}
