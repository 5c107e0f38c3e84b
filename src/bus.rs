//! First-match device bus.
//!
//! The bus keeps an ordered list of non-owning device handles. Every access
//! walks the list from the front and is handled by the first live device that
//! claims the address for that direction. Overlapping ranges are allowed; the
//! attach order decides who wins.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::devices::{Access, Device, SharedDevice};
use crate::memory::MemoryBus;

/// Value returned for a read that no device claims.
pub const UNCLAIMED_READ: u8 = 0x00;

/// Address router over an ordered list of devices.
///
/// The bus never owns its devices: it holds `Weak` handles, and the caller
/// keeps the `Rc` cells alive for as long as they should answer. A handle
/// whose device has been dropped is skipped. Accesses borrow each device's
/// `RefCell` mutably for the duration of the call, so a device must not be
/// borrowed elsewhere while the CPU is stepping.
///
/// # Examples
///
/// ```rust
/// use bus6502::{shared, Bus, MemoryBlock, MemoryBus};
///
/// let low = shared(MemoryBlock::filled(0x0000, 0x00FF, 0xAA, false).unwrap());
/// let wide = shared(MemoryBlock::filled(0x0000, 0x0FFF, 0xBB, false).unwrap());
///
/// let mut bus = Bus::new();
/// bus.attach(&low);
/// bus.attach(&wide);
///
/// assert_eq!(bus.read(0x0010), 0xAA); // first match wins
/// assert_eq!(bus.read(0x0100), 0xBB);
/// assert_eq!(bus.read(0x2000), 0x00); // nobody claims it
/// ```
#[derive(Default)]
pub struct Bus {
    devices: Vec<Weak<RefCell<dyn Device>>>,
}

impl Bus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device to the end of the routing order.
    ///
    /// Attaching the same device twice is allowed and harmless; the second
    /// entry is shadowed by the first.
    pub fn attach<D: Device + 'static>(&mut self, device: &Rc<RefCell<D>>) {
        let device: SharedDevice = device.clone();
        self.attach_shared(&device);
    }

    /// Appends an already type-erased device.
    pub fn attach_shared(&mut self, device: &SharedDevice) {
        self.devices.push(Rc::downgrade(device));
        debug!("bus: attached device #{}", self.devices.len());
    }

    /// Detaches every device. The devices themselves are untouched.
    pub fn clear(&mut self) {
        debug!("bus: cleared {} device(s)", self.devices.len());
        self.devices.clear();
    }

    /// Number of attached entries, including any whose device was dropped.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn live_devices(&self) -> impl Iterator<Item = SharedDevice> + '_ {
        self.devices.iter().filter_map(Weak::upgrade)
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> u8 {
        for device in self.live_devices() {
            let mut device = device.borrow_mut();
            if device.claims(addr, Access::Read) {
                return device.read(addr);
            }
        }
        UNCLAIMED_READ
    }

    fn write(&mut self, addr: u16, value: u8) {
        for device in self.live_devices() {
            let mut device = device.borrow_mut();
            if device.claims(addr, Access::Write) {
                device.write(addr, value);
                return;
            }
        }
    }

    fn irq_active(&self) -> bool {
        self.live_devices().any(|device| {
            let device = device.borrow();
            let pending = device
                .as_interrupt_device()
                .is_some_and(|source| source.has_interrupt());
            pending
        })
    }
}
