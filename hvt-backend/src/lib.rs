//! Hack VM Translator - Backend
//!
//! This crate is the core of the translator: it classifies VM source lines,
//! lowers each instruction to a self-contained Hack assembly block, and
//! assembles translated units into one program with a shared label
//! namespace and an optional bootstrap prologue.
//!
//! The surrounding driver owns file discovery, comment stripping, and
//! output writing; this crate consumes stripped lines plus stable unit
//! base names and produces [`hvt_codegen::HackInst`] sequences.

pub mod classify;
pub mod command;
pub mod labels;
pub mod lower;
pub mod program;
pub mod unit;

pub use classify::{classify, Verdict};
pub use command::{Segment, VmCommand};
pub use labels::LabelAllocator;
pub use lower::{lower_command, LowerCtx, LowerError};
pub use program::{ProgramAssembler, ENTRY_FUNCTION, STACK_BASE};
pub use unit::UnitTranslator;
