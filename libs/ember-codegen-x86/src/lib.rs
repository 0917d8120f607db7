//! Instruction selection and operand lowering for 32-bit x86.
//!
//! The bytecode front end hands this crate architecture-independent
//! operations over allocated registers; it answers with LIR records for the
//! assembler. Selection is a pure per-call translation: the only state a
//! lowering call touches is the unit's instruction stream and temporaries it
//! borrows and releases before returning.

mod lir;
mod lower;
mod opcode;
mod unit;

pub use lir::*;
pub use opcode::*;
pub use unit::*;
