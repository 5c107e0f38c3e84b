//! Interrupt sources on the bus.
//!
//! The 6502 has one level-sensitive IRQ line shared by every peripheral. The
//! line is active while ANY attached device reports a pending request, and it
//! stays active until the program acknowledges each source through that
//! device's registers. Nothing is queued.
//!
//! The bus computes the line level (`MemoryBus::irq_active`) by OR-ing the
//! `has_interrupt` results of every attached device that exposes itself
//! through `Device::as_interrupt_device`. A driver polls the level between
//! instructions and calls `CPU::maskable_interrupt` while it is high; the CPU
//! ignores the request while the I flag is set.
//!
//! # Example
//!
//! ```rust
//! use bus6502::{Access, Device, InterruptDevice};
//!
//! struct Timer {
//!     address: u16,
//!     expired: bool,
//! }
//!
//! impl InterruptDevice for Timer {
//!     fn has_interrupt(&self) -> bool {
//!         self.expired
//!     }
//! }
//!
//! impl Device for Timer {
//!     fn claims(&self, addr: u16, _access: Access) -> bool {
//!         addr == self.address
//!     }
//!
//!     fn read(&mut self, _addr: u16) -> u8 {
//!         // Reading the register acknowledges the interrupt
//!         let was = self.expired;
//!         self.expired = false;
//!         u8::from(was)
//!     }
//!
//!     fn write(&mut self, _addr: u16, _value: u8) {}
//!
//!     fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
//!         Some(self)
//!     }
//! }
//!
//! let mut timer = Timer { address: 0xD000, expired: true };
//! assert!(timer.has_interrupt());
//! assert_eq!(timer.read(0xD000), 1);
//! assert!(!timer.has_interrupt());
//! ```

/// A device that can drive the shared IRQ line.
///
/// `has_interrupt` is polled between instructions, so it must be a cheap,
/// side-effect-free query of the current level. Acknowledgement happens
/// through the device's own registers.
pub trait InterruptDevice {
    /// True while this device has an unacknowledged interrupt request.
    fn has_interrupt(&self) -> bool;
}
