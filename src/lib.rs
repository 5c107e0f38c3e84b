//! # bus6502
//!
//! An NMOS 6502 CPU core driving a first-match, memory-mapped device bus.
//!
//! The CPU reaches memory only through the `MemoryBus` trait. `FlatMemory`
//! is a plain 64KB array for tests and small programs; `Bus` routes every
//! access to the first attached device that claims the address, so RAM, ROM
//! and peripherals can overlap with attach order deciding who answers.
//!
//! ## Quick Start
//!
//! ```rust
//! use bus6502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00); // Reset vector low byte
//! memory.write(0xFFFD, 0x80); // Reset vector high byte
//! memory.load(0x8000, &[0xA9, 0x05, 0x69, 0x03, 0x00]); // LDA #5 ; ADC #3 ; BRK
//!
//! let mut cpu = CPU::new(memory);
//! cpu.reset();
//!
//! while !cpu.flag_b() {
//!     cpu.step();
//! }
//! assert_eq!(cpu.a(), 8);
//! ```
//!
//! ## Building a Machine
//!
//! ```rust
//! use bus6502::{Machine, MemoryBlock, RunConfig};
//!
//! let mut machine = Machine::new();
//! let mut rom = MemoryBlock::filled(0xF000, 0xFFFF, 0xEA, true).unwrap();
//! rom.copy_from(0xF000, &[0xE8, 0x00]).unwrap(); // INX ; BRK
//! rom.copy_from(0xFFFC, &[0x00, 0xF0]).unwrap();
//!
//! machine.attach(MemoryBlock::ram(0x0000, 0xEFFF).unwrap());
//! machine.attach(rom);
//!
//! let summary = machine.run(&RunConfig::default());
//! assert_eq!(machine.cpu().x(), 1);
//! assert_eq!(summary.cycles, 2 + 7);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, reset and interrupts, fetch-decode-execute
//! - `registers` - register set and status flags
//! - `opcodes` - 256-entry opcode table
//! - `addressing` - addressing modes
//! - `memory` - `MemoryBus` trait and `FlatMemory`
//! - `bus` - first-match device bus
//! - `devices` - device trait, memory blocks and the 6551 ACIA
//! - `machine` - ready-made layouts and the run loop
//! - `trace` - per-step trace lines and disassembly
//! - `error` - configuration errors
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger.
//! Invalid opcodes and receive overruns are `warn`, interrupt entry and bus
//! changes are `debug`, per-step trace lines are `trace` and run summaries
//! are `info`.

pub mod addressing;
pub mod bus;
pub mod cpu;
pub mod devices;
pub mod error;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use bus::Bus;
pub use cpu::{RunState, CPU};
pub use devices::{shared, Access, Acia6551, Device, InterruptDevice, MemoryBlock, SharedDevice};
pub use error::{ConfigError, Result};
pub use machine::{Machine, RunConfig, RunSummary};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use registers::{Registers, Status};
pub use trace::TraceLine;
