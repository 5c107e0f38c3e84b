//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR. Each takes the old value and returns the new one;
//! the CPU writes it back to the accumulator or to memory. Carry receives the
//! bit shifted out; Zero and Negative follow the result.

use crate::registers::{Registers, Status};

pub(crate) fn asl(regs: &mut Registers, value: u8) -> u8 {
    let result = value << 1;
    regs.set_flag(Status::CARRY, value & 0x80 != 0);
    regs.set_zn(result);
    result
}

pub(crate) fn lsr(regs: &mut Registers, value: u8) -> u8 {
    let result = value >> 1;
    regs.set_flag(Status::CARRY, value & 0x01 != 0);
    regs.set_zn(result);
    result
}

/// Rotate left through carry.
pub(crate) fn rol(regs: &mut Registers, value: u8) -> u8 {
    let result = (value << 1) | regs.carry_bit();
    regs.set_flag(Status::CARRY, value & 0x80 != 0);
    regs.set_zn(result);
    result
}

/// Rotate right through carry.
pub(crate) fn ror(regs: &mut Registers, value: u8) -> u8 {
    let result = (value >> 1) | (regs.carry_bit() << 7);
    regs.set_flag(Status::CARRY, value & 0x01 != 0);
    regs.set_zn(result);
    result
}
