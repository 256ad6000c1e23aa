//! Line classification
//!
//! Decides whether a comment-stripped source line is a valid VM instruction.
//! The arity/shape table here is the translator's only rejection point:
//! anything that does not match one of the fixed shapes is `Malformed` and
//! reported upstream as a warning, never a fatal error.

use crate::command::{Segment, VmCommand};

/// Classification verdict for one source line
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// No tokens after comment stripping
    Blank,
    /// A recognized instruction
    Command(VmCommand),
    /// Not a recognized instruction; carries the offending line
    Malformed(String),
}

/// Classify one comment-stripped source line.
///
/// Recognized shapes:
/// - arity 0: `add sub neg and or not eq gt lt return`
/// - arity 1: `label goto if-goto` (symbol operand)
/// - arity 2: `push pop` (segment + offset), `function call` (name + count)
pub fn classify(line: &str) -> Verdict {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Verdict::Blank,

        [mnemonic] => match *mnemonic {
            "add" => Verdict::Command(VmCommand::Add),
            "sub" => Verdict::Command(VmCommand::Sub),
            "neg" => Verdict::Command(VmCommand::Neg),
            "and" => Verdict::Command(VmCommand::And),
            "or" => Verdict::Command(VmCommand::Or),
            "not" => Verdict::Command(VmCommand::Not),
            "eq" => Verdict::Command(VmCommand::Eq),
            "gt" => Verdict::Command(VmCommand::Gt),
            "lt" => Verdict::Command(VmCommand::Lt),
            "return" => Verdict::Command(VmCommand::Return),
            _ => malformed(line),
        },

        [mnemonic, symbol] => match *mnemonic {
            "label" => Verdict::Command(VmCommand::Label(symbol.to_string())),
            "goto" => Verdict::Command(VmCommand::Goto(symbol.to_string())),
            "if-goto" => Verdict::Command(VmCommand::IfGoto(symbol.to_string())),
            _ => malformed(line),
        },

        [mnemonic, operand, index] => {
            let Ok(index) = index.parse::<u16>() else {
                return malformed(line);
            };
            match *mnemonic {
                "push" | "pop" => {
                    let Ok(segment) = operand.parse::<Segment>() else {
                        return malformed(line);
                    };
                    if *mnemonic == "push" {
                        Verdict::Command(VmCommand::Push(segment, index))
                    } else {
                        Verdict::Command(VmCommand::Pop(segment, index))
                    }
                }
                "function" => Verdict::Command(VmCommand::Function(operand.to_string(), index)),
                "call" => Verdict::Command(VmCommand::Call(operand.to_string(), index)),
                _ => malformed(line),
            }
        }

        _ => malformed(line),
    }
}

fn malformed(line: &str) -> Verdict {
    Verdict::Malformed(line.trim().to_string())
}
