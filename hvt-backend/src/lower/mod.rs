//! Instruction lowering
//!
//! Maps one parsed VM command to an ordered block of Hack instructions.
//! Lowering is a pure function of the command plus two pieces of context:
//! the translation unit name (static-variable namespacing) and the shared
//! label allocator. Given a shape-valid command the only failures are
//! operand values outside their defined domain; those are reported and the
//! unit translator recovers by emitting a diagnostic comment in place of
//! code.

pub mod control_flow;
pub mod function;
pub mod memory;
pub mod stack_ops;

use crate::command::VmCommand;
use crate::labels::LabelAllocator;
use hvt_codegen::{Comp, HackInst, Jump};
use thiserror::Error;

/// Operand values outside their defined domain. Recovery happens in the
/// unit translator: a diagnostic comment in place of code, then translation
/// continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("`pop constant` has no target location")]
    PopConstant,

    #[error("pointer offset {0} out of range (must be 0 or 1)")]
    PointerOffset(u16),

    #[error("temp offset {0} out of range (must be 0..=7)")]
    TempOffset(u16),

    #[error("constant {0} exceeds the 15-bit immediate maximum")]
    ConstantTooLarge(u16),

    #[error("segment offset {0} exceeds the 15-bit immediate maximum")]
    OffsetTooLarge(u16),

    #[error("call argument count {0} exceeds the addressable maximum")]
    CallArgCount(u16),
}

/// Context threaded through lowering: unit identity plus the program-scoped
/// label allocator. No ambient global state.
pub struct LowerCtx<'a> {
    pub unit: &'a str,
    pub labels: &'a mut LabelAllocator,
}

/// Lower one VM command to its Hack instruction block.
pub fn lower_command(
    command: &VmCommand,
    ctx: &mut LowerCtx<'_>,
) -> Result<Vec<HackInst>, LowerError> {
    match command {
        VmCommand::Add => Ok(stack_ops::lower_binary("add", Comp::DPlusM)),
        VmCommand::Sub => Ok(stack_ops::lower_binary("sub", Comp::MMinusD)),
        VmCommand::And => Ok(stack_ops::lower_binary("and", Comp::DAndM)),
        VmCommand::Or => Ok(stack_ops::lower_binary("or", Comp::DOrM)),

        VmCommand::Neg => Ok(stack_ops::lower_unary("neg", Comp::NegM)),
        VmCommand::Not => Ok(stack_ops::lower_unary("not", Comp::NotM)),

        VmCommand::Eq => Ok(stack_ops::lower_comparison("eq", "IS_EQ", Jump::JEQ, ctx.labels)),
        VmCommand::Gt => Ok(stack_ops::lower_comparison("gt", "IS_GT", Jump::JGT, ctx.labels)),
        VmCommand::Lt => Ok(stack_ops::lower_comparison("lt", "IS_LT", Jump::JLT, ctx.labels)),

        VmCommand::Push(segment, offset) => memory::lower_push(*segment, *offset, ctx.unit),
        VmCommand::Pop(segment, offset) => memory::lower_pop(*segment, *offset, ctx.unit),

        VmCommand::Label(name) => Ok(control_flow::lower_label(name)),
        VmCommand::Goto(name) => Ok(control_flow::lower_goto(name)),
        VmCommand::IfGoto(name) => Ok(control_flow::lower_if_goto(name)),

        VmCommand::Function(name, n_locals) => Ok(function::lower_function(name, *n_locals)),
        VmCommand::Call(name, n_args) => function::lower_call(name, *n_args, ctx.labels),
        VmCommand::Return => Ok(function::lower_return()),
    }
}
