//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI and BRK, and the push-and-vector sequence shared by BRK
//! and the hardware interrupts.
//!
//! Interrupt entry:
//! 1. Push PC high byte, then low byte
//! 2. Push the status register as stored
//! 3. Set the I (interrupt disable) flag
//! 4. Load PC from the vector

use crate::cpu::{Operand, IRQ_VECTOR};
use crate::memory::MemoryBus;
use crate::registers::Status;
use crate::CPU;

/// Pushes PC and flags, masks further IRQs and jumps through `vector`.
pub(crate) fn interrupt_sequence<M: MemoryBus>(cpu: &mut CPU<M>, vector: u16) {
    cpu.push_word(cpu.registers.pc);
    cpu.push(cpu.registers.p.bits());
    cpu.registers.set_flag(Status::INTERRUPT_DISABLE, true);
    cpu.registers.pc = cpu.memory.read_word(vector);
}

/// JMP: absolute, or indirect through a pointer (page-wrap resolved by the CPU).
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.registers.pc = target;
    }
}

/// JSR: push the address of the instruction's last byte, then jump.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        let return_address = cpu.registers.pc.wrapping_sub(1);
        cpu.push_word(return_address);
        cpu.registers.pc = target;
    }
}

/// RTS: pull the return address and continue one byte past it.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    let return_address = cpu.pull_word();
    cpu.registers.pc = return_address.wrapping_add(1);
}

/// RTI: pull the flags, then the program counter (no adjustment).
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let flags = cpu.pull();
    cpu.registers.p = Status::from_bits_retain(flags);
    cpu.registers.pc = cpu.pull_word();
}

/// BRK: software interrupt.
///
/// PC advances two bytes past the BRK opcode, the maskable interrupt
/// sequence runs through 0xFFFE/0xFFFF (skipped while I is set), and the
/// Break flag is set afterwards so a driver can see that BRK executed.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    // PC already points one past the opcode
    cpu.registers.advance_pc(1);

    if !cpu.registers.flag(Status::INTERRUPT_DISABLE) {
        interrupt_sequence(cpu, IRQ_VECTOR);
    }

    cpu.registers.set_flag(Status::BREAK, true);
}
