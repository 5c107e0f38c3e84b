//! # Load and Transfer Instructions
//!
//! LDA/LDX/LDY and the register-to-register transfers. Every one of them sets
//! Zero and Negative from the value moved, except TXS, which changes no flags.
//! Stores (STA/STX/STY) need no flag logic and are handled by the CPU's
//! operand writer directly.

use crate::registers::Registers;

pub(crate) fn lda(regs: &mut Registers, value: u8) {
    regs.a = value;
    regs.set_zn(value);
}

pub(crate) fn ldx(regs: &mut Registers, value: u8) {
    regs.x = value;
    regs.set_zn(value);
}

pub(crate) fn ldy(regs: &mut Registers, value: u8) {
    regs.y = value;
    regs.set_zn(value);
}

pub(crate) fn tax(regs: &mut Registers) {
    let value = regs.a;
    ldx(regs, value);
}

pub(crate) fn tay(regs: &mut Registers) {
    let value = regs.a;
    ldy(regs, value);
}

pub(crate) fn txa(regs: &mut Registers) {
    let value = regs.x;
    lda(regs, value);
}

pub(crate) fn tya(regs: &mut Registers) {
    let value = regs.y;
    lda(regs, value);
}

pub(crate) fn tsx(regs: &mut Registers) {
    let value = regs.sp;
    ldx(regs, value);
}

pub(crate) fn txs(regs: &mut Registers) {
    regs.sp = regs.x;
}
