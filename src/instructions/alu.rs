//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! - ADC / SBC: add and subtract with carry, binary or BCD
//! - AND / ORA / EOR: bitwise logic into the accumulator
//! - CMP / CPX / CPY: register comparison
//! - BIT: bit test
//!
//! SBC follows the hardware convention: Carry set means "no borrow", so a
//! plain subtraction starts with SEC.

use crate::registers::{Registers, Status};

/// ADC: A = A + M + C.
///
/// Overflow is set when both operands have the same sign and the binary sum
/// has the other one. In decimal mode each nibble is corrected to 0-9 and
/// Carry reports the decimal carry out of the tens digit.
pub(crate) fn adc(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let carry = regs.carry_bit();

    let sum = a as u16 + value as u16 + carry as u16;
    let binary = sum as u8;
    let overflow = (a ^ binary) & (value ^ binary) & 0x80 != 0;

    let (result, carry_out) = if regs.flag(Status::DECIMAL) {
        decimal_add(a, value, carry)
    } else {
        (binary, sum > 0xFF)
    };

    regs.a = result;
    regs.set_flag(Status::CARRY, carry_out);
    regs.set_flag(Status::OVERFLOW, overflow);
    regs.set_zn(result);
}

/// SBC: A = A - M - (1 - C).
///
/// Carry is set when no borrow occurred. In decimal mode the digits are
/// corrected back into 0-9 after subtraction.
pub(crate) fn sbc(regs: &mut Registers, value: u8) {
    let a = regs.a;
    let borrow = 1 - regs.carry_bit();

    let difference = a as i16 - value as i16 - borrow as i16;
    let binary = difference as u8;
    let overflow = (a ^ binary) & (a ^ value) & 0x80 != 0;

    let result = if regs.flag(Status::DECIMAL) {
        decimal_subtract(a, value, borrow)
    } else {
        binary
    };

    regs.a = result;
    regs.set_flag(Status::CARRY, difference >= 0);
    regs.set_flag(Status::OVERFLOW, overflow);
    regs.set_zn(result);
}

fn decimal_add(a: u8, value: u8, carry: u8) -> (u8, bool) {
    let mut lo = (a & 0x0F) + (value & 0x0F) + carry;
    let mut hi = (a >> 4) + (value >> 4);

    if lo > 9 {
        lo -= 10;
        hi += 1;
    }

    let carry_out = hi > 9;
    if carry_out {
        hi -= 10;
    }

    (((hi & 0x0F) << 4) | (lo & 0x0F), carry_out)
}

fn decimal_subtract(a: u8, value: u8, borrow: u8) -> u8 {
    let mut lo = (a & 0x0F) as i8 - (value & 0x0F) as i8 - borrow as i8;
    let mut hi = (a >> 4) as i8 - (value >> 4) as i8;

    if lo < 0 {
        lo += 10;
        hi -= 1;
    }
    if hi < 0 {
        hi += 10;
    }

    (((hi as u8) & 0x0F) << 4) | ((lo as u8) & 0x0F)
}

pub(crate) fn and(regs: &mut Registers, value: u8) {
    regs.a &= value;
    regs.set_zn(regs.a);
}

pub(crate) fn ora(regs: &mut Registers, value: u8) {
    regs.a |= value;
    regs.set_zn(regs.a);
}

pub(crate) fn eor(regs: &mut Registers, value: u8) {
    regs.a ^= value;
    regs.set_zn(regs.a);
}

/// CMP/CPX/CPY: flags from `register - value`, registers unchanged.
///
/// Carry = register >= value, Zero = equal, Negative = bit 7 of the difference.
pub(crate) fn compare(regs: &mut Registers, register: u8, value: u8) {
    regs.set_flag(Status::CARRY, register >= value);
    regs.set_zn(register.wrapping_sub(value));
}

/// BIT: Zero from A & M; Overflow and Negative copied from bits 6 and 7 of M.
pub(crate) fn bit(regs: &mut Registers, value: u8) {
    regs.set_flag(Status::ZERO, regs.a & value == 0);
    regs.set_flag(Status::OVERFLOW, value & 0x40 != 0);
    regs.set_flag(Status::NEGATIVE, value & 0x80 != 0);
}
