//! VM command model
//!
//! Closed variant types for the VM instruction set. The classifier produces
//! these and the lowering dispatch consumes them with one exhaustive match,
//! so the compiler guarantees every instruction shape is handled.

use std::fmt;
use std::str::FromStr;

/// A VM memory segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
    Constant,
}

impl Segment {
    /// Base-pointer symbol for the indirect segments, `None` otherwise
    pub fn base_symbol(self) -> Option<&'static str> {
        match self {
            Segment::Local => Some("LCL"),
            Segment::Argument => Some("ARG"),
            Segment::This => Some("THIS"),
            Segment::That => Some("THAT"),
            _ => None,
        }
    }
}

impl FromStr for Segment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Segment::Local),
            "argument" => Ok(Segment::Argument),
            "this" => Ok(Segment::This),
            "that" => Ok(Segment::That),
            "temp" => Ok(Segment::Temp),
            "pointer" => Ok(Segment::Pointer),
            "static" => Ok(Segment::Static),
            "constant" => Ok(Segment::Constant),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
            Segment::Static => "static",
            Segment::Constant => "constant",
        };
        write!(f, "{}", name)
    }
}

/// A parsed VM instruction, one variant per mnemonic shape
#[derive(Debug, Clone, PartialEq)]
pub enum VmCommand {
    // Stack arithmetic / logic / comparison (arity 0)
    Add,
    Sub,
    Neg,
    And,
    Or,
    Not,
    Eq,
    Gt,
    Lt,

    // Memory segment access (arity 2)
    Push(Segment, u16),
    Pop(Segment, u16),

    // Control flow (arity 1)
    Label(String),
    Goto(String),
    IfGoto(String),

    // Function protocol
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl fmt::Display for VmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmCommand::Add => write!(f, "add"),
            VmCommand::Sub => write!(f, "sub"),
            VmCommand::Neg => write!(f, "neg"),
            VmCommand::And => write!(f, "and"),
            VmCommand::Or => write!(f, "or"),
            VmCommand::Not => write!(f, "not"),
            VmCommand::Eq => write!(f, "eq"),
            VmCommand::Gt => write!(f, "gt"),
            VmCommand::Lt => write!(f, "lt"),
            VmCommand::Push(segment, offset) => write!(f, "push {} {}", segment, offset),
            VmCommand::Pop(segment, offset) => write!(f, "pop {} {}", segment, offset),
            VmCommand::Label(name) => write!(f, "label {}", name),
            VmCommand::Goto(name) => write!(f, "goto {}", name),
            VmCommand::IfGoto(name) => write!(f, "if-goto {}", name),
            VmCommand::Function(name, n_locals) => write!(f, "function {} {}", name, n_locals),
            VmCommand::Call(name, n_args) => write!(f, "call {} {}", name, n_args),
            VmCommand::Return => write!(f, "return"),
        }
    }
}
