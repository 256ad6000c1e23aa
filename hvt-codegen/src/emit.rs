//! Assembly text emission
//!
//! Renders a sequence of [`HackInst`] values to the textual form the Hack
//! assembler consumes, one instruction per line. A-instruction constants
//! are checked against the 15-bit immediate ceiling; everything else about
//! a well-formed instruction renders unconditionally.

use crate::asm::{Addr, HackInst};
use thiserror::Error;

/// The largest constant an A-instruction can carry (15-bit immediate).
pub const MAX_A_CONSTANT: u16 = 0x7FFF;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("A-instruction constant {0} exceeds the 15-bit maximum")]
    ConstantOutOfRange(u16),
}

/// Render instructions to assembly text, one per line, trailing newline.
pub fn emit_program(instructions: &[HackInst]) -> Result<String, EmitError> {
    let mut out = String::new();
    for inst in instructions {
        if let HackInst::A(Addr::Const(value)) = inst {
            if *value > MAX_A_CONSTANT {
                return Err(EmitError::ConstantOutOfRange(*value));
            }
        }
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    Ok(out)
}
