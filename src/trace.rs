//! Execution trace and one-line disassembly.
//!
//! `TraceLine` is the per-step diagnostic row a driver prints after each
//! `step()`: the register set, the opcode byte at PC and the step's cost.
//! `disassemble` renders the instruction at an address in assembler syntax.
//!
//! Both only read. They go through the `MemoryBus`, so pointing them at a
//! peripheral window with read side effects (a receive FIFO) will still
//! trigger those effects.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::memory::MemoryBus;
use crate::opcodes::OPCODE_TABLE;
use crate::CPU;

/// Snapshot of the core after one step.
///
/// # Examples
///
/// ```
/// use bus6502::trace::TraceLine;
///
/// let line = TraceLine {
///     pc: 0x8000,
///     opcode: 0xA9,
///     a: 0x00,
///     x: 0x00,
///     y: 0x00,
///     sp: 0xFF,
///     p: 0b0000_0100,
///     cycles: 2,
/// };
/// assert_eq!(
///     line.to_string(),
///     "0x8000 (0xA9) | 0x00 | 0x00 | 0x00 | 0xFF | 00000100 | [2]"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLine {
    /// Program counter after the step
    pub pc: u16,
    /// Byte at `pc`, the next opcode to execute
    pub opcode: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    /// Status register, NV-BDIZC
    pub p: u8,
    /// Cycles the step cost
    pub cycles: u8,
}

impl TraceLine {
    /// Captures the current register set and the byte at PC.
    pub fn capture<M: MemoryBus>(cpu: &CPU<M>, cycles: u8) -> Self {
        let regs = cpu.registers();
        Self {
            pc: regs.pc,
            opcode: cpu.memory().read(regs.pc),
            a: regs.a,
            x: regs.x,
            y: regs.y,
            sp: regs.sp,
            p: regs.p.bits(),
            cycles,
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:04X} (0x{:02X}) | 0x{:02X} | 0x{:02X} | 0x{:02X} | 0x{:02X} | {:08b} | [{}]",
            self.pc, self.opcode, self.a, self.x, self.y, self.sp, self.p, self.cycles
        )
    }
}

/// Disassembles the instruction at `address`.
///
/// Returns the text and the instruction length in bytes. Undocumented
/// opcodes render as a `.byte` directive of length 1. Branch targets are
/// shown as absolute addresses.
///
/// # Examples
///
/// ```
/// use bus6502::trace::disassemble;
/// use bus6502::FlatMemory;
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x8000, &[0xA9, 0x42, 0xD0, 0xFC, 0x02]);
///
/// assert_eq!(disassemble(&mem, 0x8000), ("LDA #$42".to_string(), 2));
/// assert_eq!(disassemble(&mem, 0x8002), ("BNE $8000".to_string(), 2));
/// assert_eq!(disassemble(&mem, 0x8004), (".byte $02".to_string(), 1));
/// ```
pub fn disassemble<M: MemoryBus>(memory: &M, address: u16) -> (String, u8) {
    let opcode = memory.read(address);
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.is_documented() {
        return (format!(".byte ${:02X}", opcode), 1);
    }

    let lo = memory.read(address.wrapping_add(1));
    let hi = memory.read(address.wrapping_add(2));
    let operand = format_operand(metadata.addressing_mode, address, lo, hi);

    let text = if operand.is_empty() {
        metadata.mnemonic().to_string()
    } else {
        format!("{} {}", metadata.mnemonic(), operand)
    };

    (text, metadata.size_bytes)
}

fn format_operand(mode: AddressingMode, address: u16, lo: u8, hi: u8) -> String {
    use AddressingMode::*;

    let word = u16::from_le_bytes([lo, hi]);

    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", lo),
        ZeroPage => format!("${:02X}", lo),
        ZeroPageX => format!("${:02X},X", lo),
        ZeroPageY => format!("${:02X},Y", lo),
        Relative => {
            let target = address.wrapping_add(2).wrapping_add_signed(lo as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", lo),
        IndirectY => format!("(${:02X}),Y", lo),
    }
}
