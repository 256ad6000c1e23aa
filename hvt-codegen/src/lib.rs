//! Hack VM Translator - Assembly Model and Emission
//!
//! This crate models the Hack assembly instruction set and renders it to
//! text. It includes:
//!
//! - Closed instruction types (A- and C-instructions, labels, comments)
//! - Canonical text rendering via `Display`
//! - Program emission with 15-bit immediate validation

pub mod asm;
pub mod emit;

pub use asm::{Addr, Comp, Dest, HackInst, Jump};
pub use emit::{emit_program, EmitError, MAX_A_CONSTANT};
