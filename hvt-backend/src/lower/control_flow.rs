//! Control-flow lowering: label, goto, if-goto
//!
//! User-defined label names pass through exactly as written (flat,
//! unscoped). `if-goto` treats any non-zero popped value as true, not just
//! the canonical −1.

use hvt_codegen::{Comp, Dest, HackInst, Jump};

/// `label <name>`: a jump target at the current position.
pub fn lower_label(name: &str) -> Vec<HackInst> {
    vec![
        HackInst::comment(format!("label {}", name)),
        HackInst::label(name),
    ]
}

/// `goto <name>`: unconditional jump.
pub fn lower_goto(name: &str) -> Vec<HackInst> {
    vec![
        HackInst::comment(format!("goto {}", name)),
        HackInst::a(name),
        HackInst::jump(Comp::Zero, Jump::JMP),
    ]
}

/// `if-goto <name>`: pop one value, jump iff it is non-zero.
pub fn lower_if_goto(name: &str) -> Vec<HackInst> {
    vec![
        HackInst::comment(format!("if-goto {}", name)),
        HackInst::a("SP"),
        HackInst::assign(Dest::M, Comp::MMinusOne),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::D, Comp::M),
        HackInst::a(name),
        HackInst::jump(Comp::D, Jump::JNE),
    ]
}
