//! # Branch Instructions
//!
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC and BVS. Each tests one status flag
//! against an expected value and, on a match, adds the signed 8-bit
//! displacement to the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if the branch is not taken
//! - 3 cycles if taken within the same page
//! - 4 cycles if taken into a different page

use crate::cpu::Operand;
use crate::registers::{Registers, Status};

/// Branches if `flag` equals `expected`.
///
/// PC must already point past the 2-byte instruction. Returns the cycles to
/// add to the base cost: 0 not taken, 1 taken, 2 taken across a page.
pub(crate) fn branch_if(regs: &mut Registers, flag: Status, expected: bool, operand: Operand) -> u8 {
    let Operand::Relative(offset) = operand else {
        return 0;
    };

    if regs.flag(flag) != expected {
        return 0;
    }

    let next = regs.pc;
    let target = next.wrapping_add_signed(offset as i16);
    regs.pc = target;

    if (next & 0xFF00) != (target & 0xFF00) {
        2
    } else {
        1
    }
}
