//! Function / call / return protocol lowering
//!
//! `call` and `return` agree on one frame layout: five saved words
//! immediately below the callee's argument region, in push order
//! return-address, LCL, ARG, THIS, THAT. So relative to the callee's LCL
//! base ("frame"), the return address sits at frame−5 and the saved bases
//! at frame−4..frame−1. `return` is a fixed parameterless block; its
//! correctness rests entirely on `call` having built the frame in that
//! order.
//!
//! Scratch registers: R13 walks the frame during return, R14 holds the
//! return address (R13 is also the pop scratch in memory lowering, but the
//! two uses never overlap in one block).

use super::LowerError;
use crate::labels::LabelAllocator;
use hvt_codegen::{Comp, Dest, HackInst, Jump, MAX_A_CONSTANT};
use log::trace;

/// Words saved by `call` below the argument region.
pub const FRAME_WORDS: u16 = 5;

/// Most arguments one call can take: repointing ARG emits
/// `@(nArgs + 5)`, which must fit the 15-bit immediate.
pub const MAX_CALL_ARGS: u16 = MAX_A_CONSTANT - FRAME_WORDS;

/// `function <name> <nLocals>`: entry label, then all locals zeroed.
/// The caller has already positioned ARG; no frame adjustment here.
pub fn lower_function(name: &str, n_locals: u16) -> Vec<HackInst> {
    trace!("lower_function: {name} with {n_locals} locals");
    let mut block = vec![
        HackInst::comment(format!("function {} {}", name, n_locals)),
        HackInst::label(name),
    ];
    for _ in 0..n_locals {
        // push constant 0
        block.push(HackInst::a("SP"));
        block.push(HackInst::assign(Dest::A, Comp::M));
        block.push(HackInst::assign(Dest::M, Comp::Zero));
        block.push(HackInst::a("SP"));
        block.push(HackInst::assign(Dest::M, Comp::MPlusOne));
    }
    block
}

/// `call <name> <nArgs>`: push the five-word frame, repoint ARG to the
/// first actual argument, repoint LCL to the stack top, jump. The return
/// address label is unique to this call site.
pub fn lower_call(
    name: &str,
    n_args: u16,
    labels: &mut LabelAllocator,
) -> Result<Vec<HackInst>, LowerError> {
    if n_args > MAX_CALL_ARGS {
        return Err(LowerError::CallArgCount(n_args));
    }
    Ok(build_call(name, n_args, labels))
}

/// The call sequence itself, after operand validation. The bootstrap block
/// enters the program through this same rule.
pub(crate) fn build_call(name: &str, n_args: u16, labels: &mut LabelAllocator) -> Vec<HackInst> {
    let return_label = format!("RET_{}", labels.next());
    trace!("lower_call: {name} n_args={n_args} return={return_label}");

    let mut block = vec![HackInst::comment(format!("call {} {}", name, n_args))];

    // push the return address
    block.push(HackInst::a(return_label.clone()));
    block.push(HackInst::assign(Dest::D, Comp::A));
    block.extend(push_d());

    // push the caller's four bases
    for base in ["LCL", "ARG", "THIS", "THAT"] {
        block.push(HackInst::a(base));
        block.push(HackInst::assign(Dest::D, Comp::M));
        block.extend(push_d());
    }

    // ARG = SP - nArgs - 5
    block.push(HackInst::a("SP"));
    block.push(HackInst::assign(Dest::D, Comp::M));
    block.push(HackInst::at(n_args + FRAME_WORDS));
    block.push(HackInst::assign(Dest::D, Comp::DMinusA));
    block.push(HackInst::a("ARG"));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // LCL = SP
    block.push(HackInst::a("SP"));
    block.push(HackInst::assign(Dest::D, Comp::M));
    block.push(HackInst::a("LCL"));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // transfer control, then land here on return
    block.push(HackInst::a(name));
    block.push(HackInst::jump(Comp::Zero, Jump::JMP));
    block.push(HackInst::label(return_label));

    block
}

/// `return`: tear down the frame built by `call` and hand the single
/// return value to the caller.
pub fn lower_return() -> Vec<HackInst> {
    trace!("lower_return");
    let mut block = vec![HackInst::comment("return")];

    // R13 = frame base (current LCL)
    block.push(HackInst::a("LCL"));
    block.push(HackInst::assign(Dest::D, Comp::M));
    block.push(HackInst::a("R13"));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // R14 = return address = *(frame - 5)
    block.push(HackInst::at(FRAME_WORDS));
    block.push(HackInst::assign(Dest::A, Comp::DMinusA));
    block.push(HackInst::assign(Dest::D, Comp::M));
    block.push(HackInst::a("R14"));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // *ARG = popped return value (overwrites the caller's first argument slot)
    block.push(HackInst::a("SP"));
    block.push(HackInst::assign(Dest::M, Comp::MMinusOne));
    block.push(HackInst::assign(Dest::A, Comp::M));
    block.push(HackInst::assign(Dest::D, Comp::M));
    block.push(HackInst::a("ARG"));
    block.push(HackInst::assign(Dest::A, Comp::M));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // SP = ARG + 1 (discard the callee's frame and argument list)
    block.push(HackInst::a("ARG"));
    block.push(HackInst::assign(Dest::D, Comp::MPlusOne));
    block.push(HackInst::a("SP"));
    block.push(HackInst::assign(Dest::M, Comp::D));

    // restore the caller's bases, walking the frame downward
    for base in ["THAT", "THIS", "ARG", "LCL"] {
        block.push(HackInst::a("R13"));
        block.push(HackInst::assign(Dest::AM, Comp::MMinusOne));
        block.push(HackInst::assign(Dest::D, Comp::M));
        block.push(HackInst::a(base));
        block.push(HackInst::assign(Dest::M, Comp::D));
    }

    // jump to the return address
    block.push(HackInst::a("R14"));
    block.push(HackInst::assign(Dest::A, Comp::M));
    block.push(HackInst::jump(Comp::Zero, Jump::JMP));

    block
}

/// `*SP = D; SP += 1`
fn push_d() -> Vec<HackInst> {
    vec![
        HackInst::a("SP"),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::M, Comp::D),
        HackInst::a("SP"),
        HackInst::assign(Dest::M, Comp::MPlusOne),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(block: &[HackInst]) -> Vec<String> {
        block.iter().map(|inst| inst.to_string()).collect()
    }

    #[test]
    fn test_function_entry_and_locals() {
        let block = render(&lower_function("Main.fib", 2));
        assert_eq!(block[0], "// function Main.fib 2");
        assert_eq!(block[1], "(Main.fib)");
        // two zero-pushes
        assert_eq!(block.iter().filter(|s| *s == "M=0").count(), 2);
        assert_eq!(block.iter().filter(|s| *s == "M=M+1").count(), 2);
    }

    #[test]
    fn test_function_with_no_locals() {
        let block = render(&lower_function("Sys.init", 0));
        assert_eq!(block, vec!["// function Sys.init 0", "(Sys.init)"]);
    }

    #[test]
    fn test_call_frame_push_order() {
        let mut labels = LabelAllocator::new();
        let block = render(&lower_call("Main.fib", 1, &mut labels).unwrap());

        // return address first, then LCL, ARG, THIS, THAT
        let positions: Vec<usize> = ["@RET_0", "@LCL", "@ARG", "@THIS", "@THAT"]
            .iter()
            .map(|sym| block.iter().position(|s| s == sym).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // ARG repointed past args + frame: 1 + 5 = 6
        assert!(block.contains(&"@6".to_string()));
        // jump target and landing label
        assert!(block.contains(&"@Main.fib".to_string()));
        assert_eq!(block.last().unwrap(), "(RET_0)");
    }

    #[test]
    fn test_call_sites_get_unique_return_labels() {
        let mut labels = LabelAllocator::new();
        let first = render(&lower_call("f", 0, &mut labels).unwrap());
        let second = render(&lower_call("f", 0, &mut labels).unwrap());
        assert!(first.contains(&"(RET_0)".to_string()));
        assert!(second.contains(&"(RET_1)".to_string()));
    }

    #[test]
    fn test_call_arg_count_above_addressable_maximum() {
        let mut labels = LabelAllocator::new();
        assert_eq!(
            lower_call("f", u16::MAX, &mut labels),
            Err(LowerError::CallArgCount(u16::MAX))
        );
        assert_eq!(
            lower_call("f", MAX_CALL_ARGS + 1, &mut labels),
            Err(LowerError::CallArgCount(MAX_CALL_ARGS + 1))
        );
        // the boundary itself still lowers
        assert!(lower_call("f", MAX_CALL_ARGS, &mut labels).is_ok());
        // rejected calls must not burn a return label
        assert!(lower_call("g", 0, &mut labels)
            .unwrap()
            .iter()
            .any(|inst| inst.to_string() == "(RET_1)"));
    }

    #[test]
    fn test_return_restores_bases_in_reverse_order() {
        let block = render(&lower_return());
        let positions: Vec<usize> = ["@THAT", "@THIS", "@ARG", "@LCL"]
            .iter()
            .map(|sym| block.iter().rposition(|s| s == sym).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(block.last().unwrap(), "0;JMP");
        // frame walk uses the combined decrement
        assert!(block.contains(&"AM=M-1".to_string()));
    }

    #[test]
    fn test_return_is_parameterless_and_fixed() {
        assert_eq!(lower_return(), lower_return());
    }
}
