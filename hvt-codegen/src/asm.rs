//! Hack Assembly Instruction Definitions
//!
//! This module defines the instruction model for the Hack machine: a 16-bit
//! architecture with one data register (D), one address register (A), and
//! RAM-as-array memory addressed through A (the M pseudo-register).
//!
//! An A-instruction (`@x`) loads a constant or symbol address into A.
//! A C-instruction (`dest=comp;jump`) computes an ALU function over D, A,
//! and M, optionally stores it, and optionally jumps on its sign.

use std::fmt;

/// Destination field of a C-instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dest::M => write!(f, "M"),
            Dest::D => write!(f, "D"),
            Dest::MD => write!(f, "MD"),
            Dest::A => write!(f, "A"),
            Dest::AM => write!(f, "AM"),
            Dest::AD => write!(f, "AD"),
            Dest::AMD => write!(f, "AMD"),
        }
    }
}

/// Computation field of a C-instruction (the full Hack ALU table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comp {
    Zero,     // 0
    One,      // 1
    NegOne,   // -1
    D,
    A,
    M,
    NotD,     // !D
    NotA,     // !A
    NotM,     // !M
    NegD,     // -D
    NegA,     // -A
    NegM,     // -M
    DPlusOne, // D+1
    APlusOne, // A+1
    MPlusOne, // M+1
    DMinusOne, // D-1
    AMinusOne, // A-1
    MMinusOne, // M-1
    DPlusA,   // D+A
    DPlusM,   // D+M
    DMinusA,  // D-A
    DMinusM,  // D-M
    AMinusD,  // A-D
    MMinusD,  // M-D
    DAndA,    // D&A
    DAndM,    // D&M
    DOrA,     // D|A
    DOrM,     // D|M
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comp::Zero => write!(f, "0"),
            Comp::One => write!(f, "1"),
            Comp::NegOne => write!(f, "-1"),
            Comp::D => write!(f, "D"),
            Comp::A => write!(f, "A"),
            Comp::M => write!(f, "M"),
            Comp::NotD => write!(f, "!D"),
            Comp::NotA => write!(f, "!A"),
            Comp::NotM => write!(f, "!M"),
            Comp::NegD => write!(f, "-D"),
            Comp::NegA => write!(f, "-A"),
            Comp::NegM => write!(f, "-M"),
            Comp::DPlusOne => write!(f, "D+1"),
            Comp::APlusOne => write!(f, "A+1"),
            Comp::MPlusOne => write!(f, "M+1"),
            Comp::DMinusOne => write!(f, "D-1"),
            Comp::AMinusOne => write!(f, "A-1"),
            Comp::MMinusOne => write!(f, "M-1"),
            Comp::DPlusA => write!(f, "D+A"),
            Comp::DPlusM => write!(f, "D+M"),
            Comp::DMinusA => write!(f, "D-A"),
            Comp::DMinusM => write!(f, "D-M"),
            Comp::AMinusD => write!(f, "A-D"),
            Comp::MMinusD => write!(f, "M-D"),
            Comp::DAndA => write!(f, "D&A"),
            Comp::DAndM => write!(f, "D&M"),
            Comp::DOrA => write!(f, "D|A"),
            Comp::DOrM => write!(f, "D|M"),
        }
    }
}

/// Jump field of a C-instruction (condition on the comp result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jump {
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jump::JGT => write!(f, "JGT"),
            Jump::JEQ => write!(f, "JEQ"),
            Jump::JGE => write!(f, "JGE"),
            Jump::JLT => write!(f, "JLT"),
            Jump::JNE => write!(f, "JNE"),
            Jump::JLE => write!(f, "JLE"),
            Jump::JMP => write!(f, "JMP"),
        }
    }
}

/// Operand of an A-instruction: a 15-bit constant or a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Addr {
    Const(u16),
    Symbol(String),
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr::Const(value) => write!(f, "{}", value),
            Addr::Symbol(name) => write!(f, "{}", name),
        }
    }
}

/// Hack Assembly Instructions
///
/// This enum represents the instructions and assembly pseudo-instructions
/// the translator emits: A-instructions, C-instructions, jump-target labels,
/// and comments.
#[derive(Debug, Clone, PartialEq)]
pub enum HackInst {
    /// `@addr` - load constant or symbol address into A
    A(Addr),
    /// `dest=comp;jump` - ALU operation with optional store and jump
    C {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
    /// `(NAME)` - label marking the next instruction's address
    Label(String),
    /// `// text` - assembly comment
    Comment(String),
}

impl HackInst {
    /// `@symbol`
    pub fn a(symbol: impl Into<String>) -> Self {
        HackInst::A(Addr::Symbol(symbol.into()))
    }

    /// `@constant`
    pub fn at(value: u16) -> Self {
        HackInst::A(Addr::Const(value))
    }

    /// `dest=comp`
    pub fn assign(dest: Dest, comp: Comp) -> Self {
        HackInst::C {
            dest: Some(dest),
            comp,
            jump: None,
        }
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        HackInst::C {
            dest: None,
            comp,
            jump: Some(jump),
        }
    }

    /// `(name)`
    pub fn label(name: impl Into<String>) -> Self {
        HackInst::Label(name.into())
    }

    /// `// text`
    pub fn comment(text: impl Into<String>) -> Self {
        HackInst::Comment(text.into())
    }
}

impl fmt::Display for HackInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HackInst::A(addr) => write!(f, "@{}", addr),
            HackInst::C { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            HackInst::Label(name) => write!(f, "({})", name),
            HackInst::Comment(text) => write!(f, "// {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_a_instruction_display() {
        assert_eq!(format!("{}", HackInst::at(256)), "@256");
        assert_eq!(format!("{}", HackInst::a("SP")), "@SP");
        assert_eq!(format!("{}", HackInst::a("Foo.3")), "@Foo.3");
    }

    #[test]
    fn test_c_instruction_display() {
        assert_eq!(format!("{}", HackInst::assign(Dest::D, Comp::M)), "D=M");
        assert_eq!(
            format!("{}", HackInst::assign(Dest::M, Comp::DPlusM)),
            "M=D+M"
        );
        assert_eq!(
            format!("{}", HackInst::assign(Dest::AM, Comp::MMinusOne)),
            "AM=M-1"
        );
        assert_eq!(format!("{}", HackInst::jump(Comp::Zero, Jump::JMP)), "0;JMP");
        assert_eq!(format!("{}", HackInst::jump(Comp::D, Jump::JEQ)), "D;JEQ");
    }

    #[test]
    fn test_pseudo_instruction_display() {
        assert_eq!(format!("{}", HackInst::label("END_4")), "(END_4)");
        assert_eq!(format!("{}", HackInst::comment("push constant 7")), "// push constant 7");
    }

    #[test]
    fn test_full_dest_and_jump_tables() {
        assert_eq!(format!("{}", Dest::AMD), "AMD");
        assert_eq!(format!("{}", Jump::JLE), "JLE");
        assert_eq!(format!("{}", Comp::DOrM), "D|M");
        assert_eq!(format!("{}", Comp::NegOne), "-1");
    }
}
