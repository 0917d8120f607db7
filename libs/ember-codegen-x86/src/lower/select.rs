use crate::lir::LirId;
use crate::opcode::{is_simm8, X86Op};
use crate::unit::MethodUnit;
use ember_core::{MachReg, OpKind};

impl MethodUnit {
	/// Unary register form.
	pub fn op_reg(&mut self, op: OpKind, reg: MachReg) -> LirId {
		let opcode = match op {
			OpKind::Neg => X86Op::Neg32R,
			OpKind::Not => X86Op::Not32R,
			OpKind::Call => X86Op::CallR,
			OpKind::Add
			| OpKind::Sub
			| OpKind::Adc
			| OpKind::Sbc
			| OpKind::Mul
			| OpKind::And
			| OpKind::Or
			| OpKind::Xor
			| OpKind::Lsl
			| OpKind::Lsr
			| OpKind::Asr
			| OpKind::Ror
			| OpKind::Mov
			| OpKind::Cmp
			| OpKind::I2b
			| OpKind::I2s
			| OpKind::I2c => panic!("{op} has no unary register form"),
		};
		self.push1(opcode, reg)
	}

	/// Register-immediate form. Arithmetic, logic and compare prefer the
	/// short immediate encoding whenever the value fits in a signed byte.
	pub fn op_reg_imm(&mut self, op: OpKind, reg: MachReg, value: i32) -> LirId {
		assert!(!reg.is_float(), "{op} immediate into fp register {reg}");
		let short = is_simm8(value);
		let opcode = match op {
			OpKind::Lsl => X86Op::Sal32RI,
			OpKind::Lsr => X86Op::Shr32RI,
			OpKind::Asr => X86Op::Sar32RI,
			OpKind::Add => {
				if short {
					X86Op::Add32RI8
				} else {
					X86Op::Add32RI
				}
			}
			OpKind::Or => {
				if short {
					X86Op::Or32RI8
				} else {
					X86Op::Or32RI
				}
			}
			OpKind::Adc => {
				if short {
					X86Op::Adc32RI8
				} else {
					X86Op::Adc32RI
				}
			}
			OpKind::And => {
				if short {
					X86Op::And32RI8
				} else {
					X86Op::And32RI
				}
			}
			OpKind::Sub => {
				if short {
					X86Op::Sub32RI8
				} else {
					X86Op::Sub32RI
				}
			}
			OpKind::Xor => {
				if short {
					X86Op::Xor32RI8
				} else {
					X86Op::Xor32RI
				}
			}
			OpKind::Cmp => {
				if short {
					X86Op::Cmp32RI8
				} else {
					X86Op::Cmp32RI
				}
			}
			OpKind::Mov => return self.load_constant(reg, value),
			OpKind::Mul => {
				// imul already has the three-operand immediate form.
				let opcode = if short {
					X86Op::Imul32RRI8
				} else {
					X86Op::Imul32RRI
				};
				return self.push3(opcode, reg, reg, value);
			}
			OpKind::Sbc
			| OpKind::Neg
			| OpKind::Not
			| OpKind::Ror
			| OpKind::I2b
			| OpKind::I2s
			| OpKind::I2c
			| OpKind::Call => panic!("{op} has no register-immediate form"),
		};
		self.push2(opcode, reg, value)
	}

	/// Two-operand register form: `dest_src1 = dest_src1 OP src2`.
	pub fn op_reg_reg(&mut self, op: OpKind, dest_src1: MachReg, src2: MachReg) -> LirId {
		let mut src2_must_be_cx = false;
		let opcode = match op {
			// unary kinds synthesized as copy-then-operate
			OpKind::Not => {
				self.op_reg_copy(dest_src1, src2);
				return self.op_reg(OpKind::Not, dest_src1);
			}
			OpKind::Neg => {
				self.op_reg_copy(dest_src1, src2);
				return self.op_reg(OpKind::Neg, dest_src1);
			}
			OpKind::Sub => X86Op::Sub32RR,
			OpKind::Sbc => X86Op::Sbb32RR,
			OpKind::Lsl => {
				src2_must_be_cx = true;
				X86Op::Sal32RC
			}
			OpKind::Lsr => {
				src2_must_be_cx = true;
				X86Op::Shr32RC
			}
			OpKind::Asr => {
				src2_must_be_cx = true;
				X86Op::Sar32RC
			}
			OpKind::Mov => X86Op::Mov32RR,
			OpKind::Cmp => X86Op::Cmp32RR,
			OpKind::Add => X86Op::Add32RR,
			OpKind::Adc => X86Op::Adc32RR,
			OpKind::And => X86Op::And32RR,
			OpKind::Or => X86Op::Or32RR,
			OpKind::Xor => X86Op::Xor32RR,
			OpKind::Mul => X86Op::Imul32RR,
			OpKind::I2b => {
				if !src2.is_byte_addressable() {
					// The source has no 8-bit alias; simulate the byte
					// truncation with shifts.
					self.push2(X86Op::Mov32RR, dest_src1, src2);
					self.push2(X86Op::Sal32RI, dest_src1, 24);
					return self.push2(X86Op::Sar32RI, dest_src1, 24);
				}
				X86Op::Movsx8RR
			}
			OpKind::I2s => X86Op::Movsx16RR,
			OpKind::I2c => X86Op::Movzx16RR,
			OpKind::Ror | OpKind::Call => panic!("{op} has no register-register form"),
		};
		assert!(
			!src2_must_be_cx || src2 == MachReg::ECX,
			"variable {op} count must be in ecx, got {src2}"
		);
		self.push2(opcode, dest_src1, src2)
	}

	/// Register-memory form: `dest = dest OP [base + displacement]`.
	pub fn op_reg_mem(&mut self, op: OpKind, dest: MachReg, base: MachReg, disp: i32) -> LirId {
		let opcode = match op {
			OpKind::Sub => X86Op::Sub32RM,
			OpKind::Mov => X86Op::Mov32RM,
			OpKind::Cmp => X86Op::Cmp32RM,
			OpKind::Add => X86Op::Add32RM,
			OpKind::And => X86Op::And32RM,
			OpKind::Or => X86Op::Or32RM,
			OpKind::Xor => X86Op::Xor32RM,
			OpKind::I2b => X86Op::Movsx8RM,
			OpKind::I2s => X86Op::Movsx16RM,
			OpKind::I2c => X86Op::Movzx16RM,
			OpKind::Adc
			| OpKind::Sbc
			| OpKind::Mul
			| OpKind::Neg
			| OpKind::Not
			| OpKind::Lsl
			| OpKind::Lsr
			| OpKind::Asr
			| OpKind::Ror
			| OpKind::Call => panic!("{op} has no register-memory form"),
		};
		self.push3(opcode, dest, base, disp)
	}

	/// Memory-operand form; only the indirect call reads its operand this way.
	pub fn op_mem(&mut self, op: OpKind, base: MachReg, disp: i32) -> LirId {
		let opcode = match op {
			OpKind::Call => X86Op::CallM,
			OpKind::Add
			| OpKind::Sub
			| OpKind::Adc
			| OpKind::Sbc
			| OpKind::Mul
			| OpKind::And
			| OpKind::Or
			| OpKind::Xor
			| OpKind::Neg
			| OpKind::Not
			| OpKind::Lsl
			| OpKind::Lsr
			| OpKind::Asr
			| OpKind::Ror
			| OpKind::Mov
			| OpKind::Cmp
			| OpKind::I2b
			| OpKind::I2s
			| OpKind::I2c => panic!("{op} has no memory-operand form"),
		};
		self.push2(opcode, base, disp)
	}
}
