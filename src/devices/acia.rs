//! 6551 ACIA serial peripheral.
//!
//! A four-register window with host-side byte queues instead of a real line.
//! The program writes bytes to be transmitted; the host drains them with
//! `pop_transmitted` / `drain_transmitted` and feeds input with `receive_byte`.

use std::collections::VecDeque;

use log::warn;

use super::{Access, Device, InterruptDevice};

/// Data register offset (read: receive, write: transmit).
pub const DATA: u16 = 0;
/// Status register offset (read: status, write: programmed reset).
pub const STATUS: u16 = 1;
/// Command register offset.
pub const COMMAND: u16 = 2;
/// Control register offset.
pub const CONTROL: u16 = 3;

/// Status: transmitter data register empty. Always set.
pub const STATUS_TX_EMPTY: u8 = 0x10;
/// Status: receive data available.
pub const STATUS_RX_FULL: u8 = 0x08;
/// Status: receive queue overflowed.
pub const STATUS_OVERRUN: u8 = 0x04;
/// Status: interrupt pending.
pub const STATUS_IRQ: u8 = 0x80;

/// Control: data terminal ready. Gates transmit and receive.
pub const CONTROL_DTR: u8 = 0x01;
/// Control: raise IRQ when a byte is received.
pub const CONTROL_RX_IRQ: u8 = 0x02;
/// Control: echo received bytes to the transmit queue.
pub const CONTROL_ECHO: u8 = 0x10;

/// Command register value after construction.
pub const COMMAND_INITIAL: u8 = 0x02;

/// Receive queue capacity in bytes.
pub const RX_CAPACITY: usize = 256;

/// 6551 ACIA serial port.
///
/// ## Register Map (offsets from the base address)
///
/// | Offset | Read | Write |
/// |--------|------|-------|
/// | 0 | pop received byte (0 if none) | queue byte for transmit (needs DTR) |
/// | 1 | status | programmed reset |
/// | 2 | command | command |
/// | 3 | control | control |
///
/// Reading the status register acknowledges a pending interrupt.
///
/// # Example
///
/// ```rust
/// use bus6502::devices::acia::{CONTROL_DTR, STATUS_RX_FULL};
/// use bus6502::{Acia6551, Device};
///
/// let mut acia = Acia6551::new(0x7F70);
/// acia.write(0x7F73, CONTROL_DTR);
///
/// acia.receive_byte(b'A');
/// assert_eq!(acia.read(0x7F71) & STATUS_RX_FULL, STATUS_RX_FULL);
/// assert_eq!(acia.read(0x7F70), b'A');
///
/// acia.write(0x7F70, b'!');
/// assert_eq!(acia.pop_transmitted(), Some(b'!'));
/// ```
#[derive(Debug, Clone)]
pub struct Acia6551 {
    base: u16,
    command: u8,
    control: u8,
    receive: VecDeque<u8>,
    transmit: VecDeque<u8>,
    overrun: bool,
    irq_pending: bool,
}

impl Acia6551 {
    /// Creates an ACIA whose registers occupy `base..=base + 3`.
    pub fn new(base: u16) -> Self {
        Self {
            base,
            command: COMMAND_INITIAL,
            control: 0x00,
            receive: VecDeque::with_capacity(RX_CAPACITY),
            transmit: VecDeque::new(),
            overrun: false,
            irq_pending: false,
        }
    }

    /// Base address of the register window.
    pub fn base(&self) -> u16 {
        self.base
    }

    /// Current status register value, without acknowledging the interrupt.
    pub fn status(&self) -> u8 {
        let mut status = STATUS_TX_EMPTY;
        if !self.receive.is_empty() {
            status |= STATUS_RX_FULL;
        }
        if self.overrun {
            status |= STATUS_OVERRUN;
        }
        if self.irq_pending {
            status |= STATUS_IRQ;
        }
        status
    }

    pub fn command(&self) -> u8 {
        self.command
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    fn dtr(&self) -> bool {
        self.control & CONTROL_DTR != 0
    }

    /// Delivers one byte from the host to the program.
    ///
    /// Ignored unless DTR is set. Returns true if the byte was queued. A full
    /// receive queue drops the byte and latches the overrun bit.
    pub fn receive_byte(&mut self, byte: u8) -> bool {
        if !self.dtr() {
            return false;
        }

        if self.control & CONTROL_RX_IRQ != 0 {
            self.irq_pending = true;
        }

        if self.control & CONTROL_ECHO != 0 {
            self.transmit.push_back(byte);
        }

        if self.receive.len() >= RX_CAPACITY {
            warn!("ACIA at 0x{:04X}: receive overrun, dropped 0x{:02X}", self.base, byte);
            self.overrun = true;
            return false;
        }

        self.receive.push_back(byte);
        true
    }

    /// Delivers `bytes` up to (not including) the first NUL.
    ///
    /// Returns how many bytes were queued.
    pub fn receive_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|&&b| self.receive_byte(b))
            .count()
    }

    /// Bytes waiting in the receive queue.
    pub fn receive_len(&self) -> usize {
        self.receive.len()
    }

    /// Bytes the program has transmitted and the host has not yet taken.
    pub fn transmit_len(&self) -> usize {
        self.transmit.len()
    }

    /// Takes the oldest transmitted byte.
    pub fn pop_transmitted(&mut self) -> Option<u8> {
        self.transmit.pop_front()
    }

    /// Takes every transmitted byte, oldest first.
    pub fn drain_transmitted(&mut self) -> Vec<u8> {
        self.transmit.drain(..).collect()
    }

    /// Discards everything in the transmit queue.
    pub fn clear_transmitted(&mut self) {
        self.transmit.clear();
    }

    fn programmed_reset(&mut self) {
        self.receive.clear();
        self.transmit.clear();
        self.overrun = false;
        self.command |= 0x02;
        self.command &= 0xE2;
    }
}

impl Device for Acia6551 {
    fn claims(&self, addr: u16, _access: Access) -> bool {
        addr >= self.base && addr - self.base <= CONTROL
    }

    fn read(&mut self, addr: u16) -> u8 {
        match addr.wrapping_sub(self.base) {
            DATA => self.receive.pop_front().unwrap_or(0x00),
            STATUS => {
                let status = self.status();
                self.irq_pending = false;
                status
            }
            COMMAND => self.command,
            CONTROL => self.control,
            _ => 0x00,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr.wrapping_sub(self.base) {
            DATA => {
                if self.dtr() {
                    self.transmit.push_back(value);
                }
            }
            STATUS => self.programmed_reset(),
            COMMAND => self.command = value,
            CONTROL => self.control = value,
            _ => {}
        }
    }

    fn as_interrupt_device(&self) -> Option<&dyn InterruptDevice> {
        Some(self)
    }
}

impl InterruptDevice for Acia6551 {
    fn has_interrupt(&self) -> bool {
        self.irq_pending
    }
}
