//! # Increment and Decrement Instructions
//!
//! INC/DEC on memory and INX/INY/DEX/DEY on the index registers. All wrap
//! modulo 256 and set Zero and Negative from the result; Carry is untouched.

use crate::registers::Registers;

pub(crate) fn increment(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.set_zn(result);
    result
}

pub(crate) fn decrement(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.set_zn(result);
    result
}

pub(crate) fn inx(regs: &mut Registers) {
    let value = regs.x;
    regs.x = increment(regs, value);
}

pub(crate) fn iny(regs: &mut Registers) {
    let value = regs.y;
    regs.y = increment(regs, value);
}

pub(crate) fn dex(regs: &mut Registers) {
    let value = regs.x;
    regs.x = decrement(regs, value);
}

pub(crate) fn dey(regs: &mut Registers) {
    let value = regs.y;
    regs.y = decrement(regs, value);
}
