//! Minimal Hack CPU interpreter for execution-level tests.
//!
//! Resolves labels and variable symbols the way the Hack assembler does
//! (predefined registers, labels from a first pass, variables allocated
//! from address 16) and then executes A/C instructions over a RAM array.
//! Semantics follow the reference CPU: an M write targets the address held
//! in A before the instruction executes.

use hvt_codegen::{Addr, Comp, Dest, HackInst, Jump};
use std::collections::HashMap;

pub const RAM_SIZE: usize = 32768;

#[derive(Debug, Clone)]
enum Step {
    At(i16),
    C {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
}

pub struct Machine {
    ram: Vec<i16>,
    d: i16,
    a: i16,
    pc: usize,
    steps: Vec<Step>,
    symbols: HashMap<String, i16>,
}

impl Machine {
    /// Resolve symbols and load the program. Comments and labels occupy no
    /// instruction slots.
    pub fn load(program: &[HackInst]) -> Self {
        let mut symbols = predefined_symbols();

        // first pass: label addresses
        let mut address = 0i16;
        for inst in program {
            match inst {
                HackInst::Label(name) => {
                    symbols.insert(name.clone(), address);
                }
                HackInst::Comment(_) => {}
                _ => address += 1,
            }
        }

        // second pass: resolve operands, allocating variables from 16
        let mut next_variable = 16i16;
        let mut steps = Vec::new();
        for inst in program {
            match inst {
                HackInst::Comment(_) | HackInst::Label(_) => {}
                HackInst::A(Addr::Const(value)) => steps.push(Step::At(*value as i16)),
                HackInst::A(Addr::Symbol(name)) => {
                    let address = *symbols.entry(name.clone()).or_insert_with(|| {
                        let allocated = next_variable;
                        next_variable += 1;
                        allocated
                    });
                    steps.push(Step::At(address));
                }
                HackInst::C { dest, comp, jump } => steps.push(Step::C {
                    dest: *dest,
                    comp: *comp,
                    jump: *jump,
                }),
            }
        }

        Self {
            ram: vec![0; RAM_SIZE],
            d: 0,
            a: 0,
            pc: 0,
            steps,
            symbols,
        }
    }

    pub fn set_ram(&mut self, address: usize, value: i16) {
        self.ram[address] = value;
    }

    pub fn ram_at(&self, address: usize) -> i16 {
        self.ram[address]
    }

    /// Resolved address of a symbol (label, variable, or predefined).
    pub fn symbol(&self, name: &str) -> usize {
        self.symbols[name] as u16 as usize
    }

    /// Execute until the program falls off the end, spins in a
    /// self-targeting halt loop, or exhausts the step budget.
    /// Returns true unless the budget ran out.
    pub fn run(&mut self, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if self.pc >= self.steps.len() {
                return true;
            }
            let before = self.pc;
            self.step();
            // canonical halt idiom: `(HALT) @HALT 0;JMP` jumps back onto
            // its own A-instruction
            if self.pc + 1 == before {
                if let Step::At(target) = &self.steps[self.pc] {
                    if *target as usize == self.pc {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn step(&mut self) {
        match self.steps[self.pc].clone() {
            Step::At(value) => {
                self.a = value;
                self.pc += 1;
            }
            Step::C { dest, comp, jump } => {
                let m_address = self.a as u16 as usize % RAM_SIZE;
                let m = self.ram[m_address];
                let result = eval(comp, self.d, self.a, m);

                if let Some(dest) = dest {
                    let (writes_a, writes_m, writes_d) = match dest {
                        Dest::M => (false, true, false),
                        Dest::D => (false, false, true),
                        Dest::MD => (false, true, true),
                        Dest::A => (true, false, false),
                        Dest::AM => (true, true, false),
                        Dest::AD => (true, false, true),
                        Dest::AMD => (true, true, true),
                    };
                    if writes_m {
                        self.ram[m_address] = result;
                    }
                    if writes_d {
                        self.d = result;
                    }
                    if writes_a {
                        self.a = result;
                    }
                }

                let taken = match jump {
                    None => false,
                    Some(Jump::JGT) => result > 0,
                    Some(Jump::JEQ) => result == 0,
                    Some(Jump::JGE) => result >= 0,
                    Some(Jump::JLT) => result < 0,
                    Some(Jump::JNE) => result != 0,
                    Some(Jump::JLE) => result <= 0,
                    Some(Jump::JMP) => true,
                };
                if taken {
                    // jump target is A before any A-write this cycle
                    self.pc = m_address;
                } else {
                    self.pc += 1;
                }
            }
        }
    }
}

fn eval(comp: Comp, d: i16, a: i16, m: i16) -> i16 {
    match comp {
        Comp::Zero => 0,
        Comp::One => 1,
        Comp::NegOne => -1,
        Comp::D => d,
        Comp::A => a,
        Comp::M => m,
        Comp::NotD => !d,
        Comp::NotA => !a,
        Comp::NotM => !m,
        Comp::NegD => d.wrapping_neg(),
        Comp::NegA => a.wrapping_neg(),
        Comp::NegM => m.wrapping_neg(),
        Comp::DPlusOne => d.wrapping_add(1),
        Comp::APlusOne => a.wrapping_add(1),
        Comp::MPlusOne => m.wrapping_add(1),
        Comp::DMinusOne => d.wrapping_sub(1),
        Comp::AMinusOne => a.wrapping_sub(1),
        Comp::MMinusOne => m.wrapping_sub(1),
        Comp::DPlusA => d.wrapping_add(a),
        Comp::DPlusM => d.wrapping_add(m),
        Comp::DMinusA => d.wrapping_sub(a),
        Comp::DMinusM => d.wrapping_sub(m),
        Comp::AMinusD => a.wrapping_sub(d),
        Comp::MMinusD => m.wrapping_sub(d),
        Comp::DAndA => d & a,
        Comp::DAndM => d & m,
        Comp::DOrA => d | a,
        Comp::DOrM => d | m,
    }
}

fn predefined_symbols() -> HashMap<String, i16> {
    let mut symbols = HashMap::new();
    symbols.insert("SP".to_string(), 0);
    symbols.insert("LCL".to_string(), 1);
    symbols.insert("ARG".to_string(), 2);
    symbols.insert("THIS".to_string(), 3);
    symbols.insert("THAT".to_string(), 4);
    for register in 0..16 {
        symbols.insert(format!("R{}", register), register);
    }
    symbols
}
