//! Executes a short burst of instructions from arbitrary registers and memory.
//!
//! Any opcode byte, including undocumented ones, must step without panicking.

#![no_main]

use arbitrary::Arbitrary;
use bus6502::{FlatMemory, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw NV-BDIZC byte
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Instruction stream at 0x8000
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Data window at 0x4000 for absolute operands
    data: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
    steps: u8,
    irq: bool,
    nmi: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.data);

    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu.set_a(input.registers.a);
    cpu.set_x(input.registers.x);
    cpu.set_y(input.registers.y);
    cpu.set_sp(input.registers.sp);
    cpu.set_status(input.registers.status);

    if input.nmi {
        cpu.non_maskable_interrupt();
    }
    if input.irq {
        cpu.maskable_interrupt();
    }

    for _ in 0..(input.steps % 32) {
        let before = cpu.cycles();
        let cycles = cpu.step();
        assert!(cycles <= 7);
        assert_eq!(cpu.cycles(), before + u64::from(cycles));
    }
});
