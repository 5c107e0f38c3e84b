//! # Register Set
//!
//! The 6502 programmer-visible state: accumulator, two index registers, the
//! stack pointer, the processor status register and the program counter.
//!
//! The register set is a plain value owned by the CPU. Operations receive it by
//! exclusive reference and update it through the helpers defined here, so the
//! flag rules live in one place.

use bitflags::bitflags;

/// Base address of the fixed stack page (0x0100-0x01FF).
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer value loaded by reset.
pub const RESET_SP: u8 = 0xFF;

bitflags! {
    /// Processor status register (P), laid out as NV-BDIZC.
    ///
    /// Bit 5 has no meaning to this core. It is never forced on, so a value
    /// pushed by PHP and pulled by PLP round-trips exactly.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry
        const CARRY = 0b0000_0001;
        /// Zero
        const ZERO = 0b0000_0010;
        /// Interrupt disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal mode
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused
        const UNUSED = 0b0010_0000;
        /// Overflow
        const OVERFLOW = 0b0100_0000;
        /// Negative
        const NEGATIVE = 0b1000_0000;
    }
}

/// The complete register set.
///
/// All 8-bit registers wrap modulo 256 and the program counter wraps modulo
/// 65536; every helper that changes a register uses wrapping arithmetic.
///
/// # Examples
///
/// ```
/// use bus6502::{Registers, Status};
///
/// let mut regs = Registers::default();
/// regs.set_zn(0x80);
/// assert!(regs.p.contains(Status::NEGATIVE));
/// assert!(!regs.p.contains(Status::ZERO));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer (offset into the stack page)
    pub sp: u8,
    /// Processor status
    pub p: Status,
    /// Program counter
    pub pc: u16,
}

impl Registers {
    /// Register state defined by a reset: A=X=Y=0, SP=0xFF, only I set.
    ///
    /// The program counter is supplied by the caller from the reset vector.
    pub fn after_reset(pc: u16) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            p: Status::INTERRUPT_DISABLE,
            pc,
        }
    }

    /// Returns true if `flag` is set.
    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }

    /// Sets or clears `flag`.
    pub fn set_flag(&mut self, flag: Status, on: bool) {
        self.p.set(flag, on);
    }

    /// Updates Zero and Negative from `value`, leaving every other flag alone.
    pub fn set_zn(&mut self, value: u8) {
        self.p.set(Status::ZERO, value == 0);
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Carry as an addend (0 or 1).
    pub fn carry_bit(&self) -> u8 {
        u8::from(self.p.contains(Status::CARRY))
    }

    /// Full address of the current top-of-stack slot.
    pub fn stack_address(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }

    /// Advances the program counter by `n` bytes, wrapping at 0xFFFF.
    pub fn advance_pc(&mut self, n: u16) {
        self.pc = self.pc.wrapping_add(n);
    }
}
