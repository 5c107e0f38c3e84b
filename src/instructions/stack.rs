//! # Stack Operations
//!
//! PHA, PHP, PLA and PLP, plus the push/pull primitives used by JSR, RTS,
//! RTI, BRK and interrupt entry.
//!
//! The stack lives at 0x0100-0x01FF and grows downward. A push writes to
//! 0x0100 | SP and then decrements SP; a pull increments SP and then reads.
//! SP wraps within the page in both directions with no overflow detection.

use crate::memory::MemoryBus;
use crate::registers::Status;
use crate::CPU;

impl<M: MemoryBus> CPU<M> {
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(self.registers.stack_address(), value);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.registers.sp = self.registers.sp.wrapping_add(1);
        self.memory.read(self.registers.stack_address())
    }

    /// Pushes a 16-bit value, high byte first.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    /// Pulls a 16-bit value pushed by `push_word`.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }
}

/// PHA: push the accumulator.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.registers.a);
}

/// PHP: push the status register exactly as stored.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.registers.p.bits());
}

/// PLA: pull into the accumulator, setting Zero and Negative.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.pull();
    cpu.registers.a = value;
    cpu.registers.set_zn(value);
}

/// PLP: pull the status register. Every bit is restored as pulled.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.pull();
    cpu.registers.p = Status::from_bits_retain(value);
}
