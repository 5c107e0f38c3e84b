//! Runs arbitrary code on a bus with an ACIA and a top-page ROM in front of RAM.
//!
//! Stepping, serial traffic and IRQ servicing must never panic, and writes
//! must never reach the read-only block.

#![no_main]

use arbitrary::Arbitrary;
use bus6502::{shared, Acia6551, Bus, MemoryBlock, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    program: [u8; 64],
    rom: [u8; 64],
    serial_input: Vec<u8>,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let acia = shared(Acia6551::new(0x7F70));
    let ram = shared(MemoryBlock::ram(0x0000, 0xFFFF).expect("valid range"));
    let rom = shared(MemoryBlock::from_bytes(0xFF00, 0xFFFF, &input.rom, true).expect("valid range"));

    ram.borrow_mut()
        .copy_from(0x0200, &input.program)
        .expect("program fits");

    let mut bus = Bus::new();
    bus.attach(&acia);
    bus.attach(&rom);
    bus.attach(&ram);

    let mut cpu = CPU::new(bus);
    cpu.reset();
    cpu.set_pc(0x0200);
    acia.borrow_mut().receive_bytes(&input.serial_input);

    let snapshot = rom.borrow().as_slice().to_vec();
    for _ in 0..input.steps {
        if cpu.memory().irq_active() {
            cpu.maskable_interrupt();
        }
        cpu.step();
    }

    assert_eq!(rom.borrow().as_slice(), snapshot.as_slice());
});
