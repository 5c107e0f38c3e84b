//! Memory-mapped device support.
//!
//! A device answers for a fixed, possibly overlapping, range of absolute
//! addresses. The `Bus` asks each attached device in turn whether it claims an
//! address for a given access direction and routes the access to the first one
//! that does.
//!
//! # Architecture
//!
//! - **Device trait**: `claims` / `read` / `write` over absolute addresses
//! - **Ownership**: devices live in `Rc<RefCell<_>>` cells owned by whoever
//!   assembles the machine; the bus only keeps `Weak` handles
//! - **Implementations**: `MemoryBlock` (RAM/ROM) and `Acia6551` (serial port)
//!
//! # Example
//!
//! ```rust
//! use bus6502::{shared, Bus, MemoryBlock, MemoryBus};
//!
//! let ram = shared(MemoryBlock::ram(0x0000, 0x7FFF).unwrap());
//! let rom = shared(MemoryBlock::from_bytes(0xFFFC, 0xFFFF, &[0x00, 0x80], true).unwrap());
//!
//! let mut bus = Bus::new();
//! bus.attach(&ram);
//! bus.attach(&rom);
//!
//! bus.write(0x0200, 0x42);
//! assert_eq!(bus.read(0x0200), 0x42);
//! assert_eq!(bus.read_word(0xFFFC), 0x8000);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

pub mod acia;
pub mod block;
pub mod interrupts;

pub use acia::Acia6551;
pub use block::MemoryBlock;
pub use interrupts::InterruptDevice;

/// Direction of a bus access.
///
/// Routing is decided per direction because a read-only device claims its
/// range for reads only, letting writes fall through to a device behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// CPU reads from the device
    Read,
    /// CPU writes to the device
    Write,
}

/// A participant on the bus: storage or a peripheral.
///
/// Addresses passed to every method are absolute. `read` and `write` are only
/// meaningful for addresses the device claims; the bus never calls them
/// otherwise. A device's range is fixed once it is constructed.
///
/// # Examples
///
/// ```rust
/// use bus6502::{Access, Device};
///
/// /// A single register that counts how often it is read.
/// struct ReadCounter {
///     address: u16,
///     count: u8,
/// }
///
/// impl Device for ReadCounter {
///     fn claims(&self, addr: u16, access: Access) -> bool {
///         addr == self.address && access == Access::Read
///     }
///
///     fn read(&mut self, _addr: u16) -> u8 {
///         self.count = self.count.wrapping_add(1);
///         self.count
///     }
///
///     fn write(&mut self, _addr: u16, _value: u8) {}
/// }
///
/// let mut counter = ReadCounter { address: 0xD000, count: 0 };
/// assert!(counter.claims(0xD000, Access::Read));
/// assert!(!counter.claims(0xD000, Access::Write));
/// assert_eq!(counter.read(0xD000), 1);
/// ```
pub trait Device {
    /// True if this device answers `addr` for the given access direction.
    fn claims(&self, addr: u16, access: Access) -> bool;

    /// Reads a claimed address. Reads may have side effects (FIFO pops).
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a claimed address. Read-only storage ignores the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Interrupt-capable devices return themselves here so the bus can poll
    /// their IRQ line.
    fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
        None
    }
}

/// A device cell as owned by a machine configuration.
pub type SharedDevice = Rc<RefCell<dyn Device>>;

/// Wraps a device in the shared cell the bus attaches to.
///
/// The returned handle keeps its concrete type, so the owner can still reach
/// device-specific methods (for example `Acia6551::receive_byte`).
pub fn shared<D: Device>(device: D) -> Rc<RefCell<D>> {
    Rc::new(RefCell::new(device))
}
