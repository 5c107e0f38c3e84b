//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check that the core keeps its invariants
//! across the whole input space of registers and operands.

use bus6502::{FlatMemory, MemoryBus, Operation, CPU, OPCODE_TABLE};
use proptest::prelude::*;

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu
}

/// Opcodes that always fall through to the next instruction.
fn straight_line_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            m.is_documented()
                && !matches!(
                    m.mnemonic(),
                    "BCC" | "BCS" | "BEQ" | "BMI" | "BNE" | "BPL" | "BVC" | "BVS" | "JMP" | "JSR"
                        | "RTS" | "RTI" | "BRK"
                )
        })
        .map(|(i, _)| i as u8)
        .collect()
}

/// Every LDA, LDX and LDY encoding.
fn load_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| matches!(m.operation, Operation::Lda | Operation::Ldx | Operation::Ldy))
        .map(|(i, _)| i as u8)
        .collect()
}

/// Memory holding `value` everywhere except the opcode and reset vector, so
/// every addressing mode with X = Y = 0 fetches `value`.
fn setup_flooded(opcode: u8, value: u8) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &vec![value; 0x10000]);
    memory.write(0x8000, opcode);
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu.set_x(0);
    cpu.set_y(0);
    cpu
}

proptest! {
    #[test]
    fn prop_lda_immediate_flags(value: u8) {
        let mut cpu = setup_cpu(&[0xA9, value]);
        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
    }

    #[test]
    fn prop_loads_touch_only_z_and_n(
        index in any::<usize>(),
        value in any::<u8>(),
        status in any::<u8>()
    ) {
        let opcodes = load_opcodes();
        let opcode = opcodes[index % opcodes.len()];
        let mut cpu = setup_flooded(opcode, value);
        cpu.set_status(status);
        cpu.step();

        let loaded = match OPCODE_TABLE[opcode as usize].operation {
            Operation::Lda => cpu.a(),
            Operation::Ldx => cpu.x(),
            _ => cpu.y(),
        };
        prop_assert_eq!(loaded, value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
        prop_assert_eq!(cpu.status() & !0x82, status & !0x82);
    }

    #[test]
    fn prop_zero_page_x_stays_in_page_zero(base: u8, x: u8, value: u8) {
        let mut cpu = setup_cpu(&[0xB5, base]);
        cpu.set_x(x);
        cpu.memory_mut().write(base.wrapping_add(x) as u16, value);

        prop_assert_eq!(cpu.step(), 4);
        prop_assert_eq!(cpu.a(), value);
    }

    #[test]
    fn prop_push_pull_round_trip(value: u8, sp: u8) {
        // PHA ; LDA #$00 ; PLA
        let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
        cpu.set_a(value);
        cpu.set_sp(sp);

        cpu.step();
        cpu.step();
        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn prop_binary_adc_matches_wide_sum(a: u8, m: u8, carry: bool) {
        let mut cpu = setup_cpu(&[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);
        cpu.step();

        let sum = a as u16 + m as u16 + carry as u16;
        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_z(), sum as u8 == 0);

        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    #[test]
    fn prop_sbc_inverts_adc(a: u8, m: u8) {
        // CLC ; ADC #m ; SEC ; SBC #m
        let mut cpu = setup_cpu(&[0x18, 0x69, m, 0x38, 0xE9, m]);
        cpu.set_a(a);
        for _ in 0..4 {
            cpu.step();
        }

        prop_assert_eq!(cpu.a(), a);
    }

    #[test]
    fn prop_compare_carry(register: u8, value: u8) {
        let mut cpu = setup_cpu(&[0xC9, value]);
        cpu.set_a(register);
        cpu.step();

        prop_assert_eq!(cpu.flag_c(), register >= value);
        prop_assert_eq!(cpu.flag_z(), register == value);
        prop_assert_eq!(cpu.a(), register);
    }

    #[test]
    fn prop_straight_line_advances_by_size(
        index in 0usize..151,
        lo in any::<u8>(),
        hi in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>()
    ) {
        let opcodes = straight_line_opcodes();
        let opcode = opcodes[index % opcodes.len()];
        let mut cpu = setup_cpu(&[opcode, lo, hi]);
        cpu.set_x(x);
        cpu.set_y(y);

        let cycles = cpu.step();
        let metadata = &OPCODE_TABLE[opcode as usize];

        prop_assert_eq!(cpu.pc(), 0x8000 + metadata.size_bytes as u16);
        prop_assert!(cycles >= metadata.base_cycles);
        prop_assert!(cycles <= metadata.base_cycles + 1);
        prop_assert_eq!(cpu.cycles(), cycles as u64);
    }

    #[test]
    fn prop_branch_costs(offset: u8, taken: bool) {
        // BEQ offset
        let mut cpu = setup_cpu(&[0xF0, offset]);
        cpu.set_flag_z(taken);
        let cycles = cpu.step();

        let next = 0x8002u16;
        let target = next.wrapping_add(offset as i8 as i16 as u16);
        if taken {
            prop_assert_eq!(cpu.pc(), target);
            let crossed = (next & 0xFF00) != (target & 0xFF00);
            prop_assert_eq!(cycles, if crossed { 4 } else { 3 });
        } else {
            prop_assert_eq!(cpu.pc(), next);
            prop_assert_eq!(cycles, 2);
        }
    }
}
