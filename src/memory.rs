//! # Memory Bus Abstraction
//!
//! The CPU reaches every byte of its 16-bit address space through the
//! `MemoryBus` trait. Two implementations ship with the crate:
//!
//! - `FlatMemory`: one 64KB RAM array, used throughout the tests
//! - `Bus`: an ordered list of memory-mapped devices (see the `bus` module)
//!
//! The 6502 has no bus error signal, so neither operation can fail. A read
//! nobody answers yields a defined value and a write nobody accepts vanishes.

/// Byte-wide access to a 16-bit address space.
///
/// `read` takes `&self` so observers (trace output, debuggers) can inspect
/// memory through a shared reference. Implementations whose reads have side
/// effects, such as a serial receive register, use interior mutability.
///
/// # Examples
///
/// ```
/// use bus6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use bus6502::MemoryBus;
///
/// /// 2KB of RAM mirrored across the whole address space.
/// struct MirroredRam {
///     cells: [u8; 0x0800],
/// }
///
/// impl MemoryBus for MirroredRam {
///     fn read(&self, addr: u16) -> u8 {
///         self.cells[(addr & 0x07FF) as usize]
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         self.cells[(addr & 0x07FF) as usize] = value;
///     }
/// }
///
/// let mut ram = MirroredRam { cells: [0; 0x0800] };
/// ram.write(0x0001, 0xAB);
/// assert_eq!(ram.read(0x0801), 0xAB);
/// ```
pub trait MemoryBus {
    /// Reads the byte at `addr`. Must not panic for any address.
    fn read(&self, addr: u16) -> u8;

    /// Writes `value` to `addr`. Must not panic for any address; read-only or
    /// unclaimed locations ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Level of the shared, active-high view of the IRQ line.
    ///
    /// True while at least one attached peripheral has an unacknowledged
    /// interrupt request. The machine driver polls this between instructions.
    /// Plain memories have no interrupt sources.
    ///
    /// ```
    /// use bus6502::{MemoryBus, FlatMemory};
    ///
    /// assert!(!FlatMemory::new().irq_active());
    /// ```
    fn irq_active(&self) -> bool {
        false
    }

    /// Reads a little-endian 16-bit word from `addr` and `addr + 1`.
    ///
    /// The second address wraps from 0xFFFF to 0x0000.
    ///
    /// ```
    /// use bus6502::{MemoryBus, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// assert_eq!(mem.read_word(0xFFFC), 0x8000);
    /// ```
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}

/// Simple 64KB flat memory: every address is writable RAM, initially zero.
///
/// # Examples
///
/// ```
/// use bus6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte
/// memory.write(0x8000, 0xEA); // NOP
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a zero-filled 64KB memory.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    ///
    /// ```
    /// use bus6502::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0600, &[0xA9, 0x01]);
    /// assert_eq!(mem.read(0x0601), 0x01);
    /// ```
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut at = addr;
        for &byte in bytes {
            self.data[at as usize] = byte;
            at = at.wrapping_add(1);
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
