//! Lowering entry points, one concern per file, all implemented as methods
//! on [`MethodUnit`](crate::MethodUnit).

mod branch;
mod constant;
mod copy;
mod memory;
mod select;
mod synth;
