//! Stack arithmetic, logical, and comparison lowering
//!
//! Operand convention: for a binary operation the "first" operand is the
//! value pushed earlier, so `sub` computes first − second. Comparisons push
//! the VM boolean encoding: true = −1 (all bits set), false = 0.

use crate::labels::LabelAllocator;
use hvt_codegen::{Comp, Dest, HackInst, Jump};
use log::trace;

/// Binary op: pop two, combine, push one. Net stack effect −1.
///
/// The combining `comp` sees the second-pushed value in D and the
/// first-pushed value in M (e.g. `M-D` for sub).
pub fn lower_binary(mnemonic: &str, comp: Comp) -> Vec<HackInst> {
    trace!("lower_binary: {mnemonic}");
    vec![
        HackInst::comment(mnemonic),
        HackInst::a("SP"),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::D, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::M, comp),
        HackInst::a("SP"),
        HackInst::assign(Dest::M, Comp::MMinusOne),
    ]
}

/// Unary op: rewrite the top-of-stack cell in place. Net stack effect 0.
pub fn lower_unary(mnemonic: &str, comp: Comp) -> Vec<HackInst> {
    trace!("lower_unary: {mnemonic}");
    vec![
        HackInst::comment(mnemonic),
        HackInst::a("SP"),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::M, comp),
    ]
}

/// Comparison: pop two, compute first − second, branch on the difference.
/// Pushes −1 (true) or 0 (false); net stack effect −1. Each call allocates
/// a fresh label pair so repeated comparisons never share jump targets.
pub fn lower_comparison(
    mnemonic: &str,
    tag: &str,
    jump: Jump,
    labels: &mut LabelAllocator,
) -> Vec<HackInst> {
    let suffix = labels.next();
    let true_label = format!("{}_{}", tag, suffix);
    let end_label = format!("END_{}", suffix);
    trace!("lower_comparison: {mnemonic} suffix={suffix}");

    vec![
        HackInst::comment(mnemonic),
        // D = second, M = first, D = first - second
        HackInst::a("SP"),
        HackInst::assign(Dest::M, Comp::MMinusOne),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::D, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::D, Comp::MMinusD),
        // branch on the sign/zero-ness of the difference
        HackInst::a(true_label.clone()),
        HackInst::jump(Comp::D, jump),
        // false: overwrite the result slot with 0
        HackInst::a("SP"),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::M, Comp::Zero),
        HackInst::a(end_label.clone()),
        HackInst::jump(Comp::Zero, Jump::JMP),
        // true: overwrite the result slot with -1
        HackInst::label(true_label),
        HackInst::a("SP"),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::A, Comp::AMinusOne),
        HackInst::assign(Dest::M, Comp::NegOne),
        HackInst::label(end_label),
    ]
}
