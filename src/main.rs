use time::macros::format_description;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ember_codegen_x86::MethodUnit;
use ember_core::{CondCode, MachReg, OpKind, OperandSize};

fn main() {
	let timer = UtcTime::new(format_description!(
		"[hour]:[minute]:[second].[subsecond digits:3]"
	));
	let format = tracing_subscriber::fmt::format().with_timer(timer).compact();
	let fmt_layer = tracing_subscriber::fmt::layer().event_format(format);
	tracing_subscriber::registry().with(fmt_layer).init();

	// Lower a short post-allocation sequence the way the baseline JIT
	// would: v0 = v1 + v2, spill v0, compare against a constant, branch,
	// and a float constant for good measure.
	let mut unit = MethodUnit::new(vec![MachReg::EDX]);

	unit.set_pos(0);
	unit.op_reg_reg_reg(OpKind::Add, MachReg::EAX, MachReg::ESI, MachReg::EDI);
	unit.set_pos(2);
	unit.store_base_disp(MachReg::ESP, 8, MachReg::EAX, OperandSize::Word);
	unit.set_pos(3);
	unit.op_reg_imm(OpKind::Cmp, MachReg::EAX, 100);
	let branch = unit.op_cond_branch(CondCode::Ge, None);
	unit.set_pos(6);
	unit.load_constant(MachReg::FloatSingle(0), 0x3f80_0000);
	unit.set_pos(8);
	let join = unit.op_reg_copy(MachReg::EAX, MachReg::EAX);
	unit.set_target(branch, join);

	info!("lowered {} instructions", unit.insts().len());
	for (i, inst) in unit.insts().iter().enumerate() {
		info!("{i:>3}: {inst}");
	}
	for access in unit.frame_accesses() {
		info!(
			"frame slot {} {} at #{}",
			access.slot,
			if access.is_load { "load" } else { "store" },
			access.inst.0
		);
	}
}
