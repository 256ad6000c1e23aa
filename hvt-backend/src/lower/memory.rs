//! Memory segment access lowering
//!
//! Effective-address rules:
//! - `local/argument/this/that`: base register holds a pointer,
//!   effective address = *base + offset
//! - `temp`: physical base 5 + offset, 8 slots
//! - `pointer`: offset 0 is THIS itself, offset 1 is THAT itself
//! - `static`: one machine symbol per (unit, offset) pair, `Unit.offset`
//! - `constant`: immediate literal, push only
//!
//! Pops into an addressed segment park the computed effective address in
//! R13 while the value is fetched from the stack.

use super::LowerError;
use crate::command::Segment;
use hvt_codegen::{Comp, Dest, HackInst, MAX_A_CONSTANT};
use log::trace;

/// Physical RAM base of the temp segment
const TEMP_BASE: u16 = 5;
/// Number of temp slots
const TEMP_SLOTS: u16 = 8;

/// Lower `push <segment> <offset>`: read one word, write it to the top of
/// stack, increment SP. Net stack effect +1.
pub fn lower_push(segment: Segment, offset: u16, unit: &str) -> Result<Vec<HackInst>, LowerError> {
    trace!("lower_push: {segment} {offset} in {unit}");
    let mut block = vec![HackInst::comment(format!("push {} {}", segment, offset))];

    match segment {
        Segment::Constant => {
            if offset > MAX_A_CONSTANT {
                return Err(LowerError::ConstantTooLarge(offset));
            }
            block.push(HackInst::at(offset));
            block.push(HackInst::assign(Dest::D, Comp::A));
        }
        Segment::Local | Segment::Argument | Segment::This | Segment::That => {
            if offset > MAX_A_CONSTANT {
                return Err(LowerError::OffsetTooLarge(offset));
            }
            let base = segment.base_symbol().unwrap();
            block.push(HackInst::at(offset));
            block.push(HackInst::assign(Dest::D, Comp::A));
            block.push(HackInst::a(base));
            block.push(HackInst::assign(Dest::A, Comp::DPlusM));
            block.push(HackInst::assign(Dest::D, Comp::M));
        }
        Segment::Temp => {
            block.push(HackInst::at(temp_address(offset)?));
            block.push(HackInst::assign(Dest::D, Comp::M));
        }
        Segment::Pointer => {
            block.push(HackInst::a(pointer_symbol(offset)?));
            block.push(HackInst::assign(Dest::D, Comp::M));
        }
        Segment::Static => {
            block.push(HackInst::a(static_symbol(unit, offset)));
            block.push(HackInst::assign(Dest::D, Comp::M));
        }
    }

    block.extend(push_d());
    Ok(block)
}

/// Lower `pop <segment> <offset>`: decrement SP, read the popped word,
/// write it to the effective address. Net stack effect −1.
pub fn lower_pop(segment: Segment, offset: u16, unit: &str) -> Result<Vec<HackInst>, LowerError> {
    trace!("lower_pop: {segment} {offset} in {unit}");
    let mut block = vec![HackInst::comment(format!("pop {} {}", segment, offset))];

    match segment {
        Segment::Constant => return Err(LowerError::PopConstant),
        Segment::Local | Segment::Argument | Segment::This | Segment::That => {
            if offset > MAX_A_CONSTANT {
                return Err(LowerError::OffsetTooLarge(offset));
            }
            let base = segment.base_symbol().unwrap();
            // R13 = *base + offset, then pop into it
            block.push(HackInst::at(offset));
            block.push(HackInst::assign(Dest::D, Comp::A));
            block.push(HackInst::a(base));
            block.push(HackInst::assign(Dest::A, Comp::DPlusM));
            block.push(HackInst::assign(Dest::D, Comp::A));
            block.push(HackInst::a("R13"));
            block.push(HackInst::assign(Dest::M, Comp::D));
            block.extend(pop_d());
            block.push(HackInst::a("R13"));
            block.push(HackInst::assign(Dest::A, Comp::M));
            block.push(HackInst::assign(Dest::M, Comp::D));
        }
        Segment::Temp => {
            let address = temp_address(offset)?;
            block.extend(pop_d());
            block.push(HackInst::at(address));
            block.push(HackInst::assign(Dest::M, Comp::D));
        }
        Segment::Pointer => {
            let symbol = pointer_symbol(offset)?;
            block.extend(pop_d());
            block.push(HackInst::a(symbol));
            block.push(HackInst::assign(Dest::M, Comp::D));
        }
        Segment::Static => {
            block.extend(pop_d());
            block.push(HackInst::a(static_symbol(unit, offset)));
            block.push(HackInst::assign(Dest::M, Comp::D));
        }
    }

    Ok(block)
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

/// `SP -= 1; D = *SP`
fn pop_d() -> Vec<HackInst> {
    vec![
        HackInst::a("SP"),
        HackInst::assign(Dest::M, Comp::MMinusOne),
        HackInst::assign(Dest::A, Comp::M),
        HackInst::assign(Dest::D, Comp::M),
    ]
}

fn temp_address(offset: u16) -> Result<u16, LowerError> {
    if offset >= TEMP_SLOTS {
        return Err(LowerError::TempOffset(offset));
    }
    Ok(TEMP_BASE + offset)
}

fn pointer_symbol(offset: u16) -> Result<&'static str, LowerError> {
    match offset {
        0 => Ok("THIS"),
        1 => Ok("THAT"),
        _ => Err(LowerError::PointerOffset(offset)),
    }
}

fn static_symbol(unit: &str, offset: u16) -> String {
    format!("{}.{}", unit, offset)
}
