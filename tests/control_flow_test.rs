//! Branches, jumps, subroutines and the stack.

use bus6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu
}

/// Places `program` at `address`, resets and jumps there.
fn setup_cpu_at(address: u16, program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().load(address, program);
    cpu.set_pc(address);
    cpu
}

// ========== Branches ==========

#[test]
fn test_branch_not_taken_costs_two() {
    // BEQ +5 with Z clear
    let mut cpu = setup_cpu(&[0xF0, 0x05]);
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page_costs_three() {
    // BNE +5
    let mut cpu = setup_cpu(&[0xD0, 0x05]);
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x8007);
}

#[test]
fn test_branch_backwards() {
    // BCS -2 loops onto itself
    let mut cpu = setup_cpu(&[0xB0, 0xFE]);
    cpu.set_flag_c(true);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_branch_taken_across_page_costs_four() {
    // BMI +4 at 0x80FD: next PC 0x80FF, target 0x8103
    let mut cpu = setup_cpu_at(0x80FD, &[0x30, 0x04]);
    cpu.set_flag_n(true);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x8103);
}

#[test]
fn test_every_branch_condition() {
    // (opcode, flag setter, value that takes the branch)
    type Setter = fn(&mut CPU<FlatMemory>, bool);
    let cases: [(u8, Setter, bool); 8] = [
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
    ];

    for (opcode, set_flag, taken) in cases {
        let mut cpu = setup_cpu(&[opcode, 0x10]);
        set_flag(&mut cpu, taken);
        cpu.step();
        assert_eq!(cpu.pc(), 0x8012, "opcode 0x{:02X} should branch", opcode);

        let mut cpu = setup_cpu(&[opcode, 0x10]);
        set_flag(&mut cpu, !taken);
        cpu.step();
        assert_eq!(cpu.pc(), 0x8002, "opcode 0x{:02X} should fall through", opcode);
    }
}

// ========== Jumps ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x12]);
    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu(&[0x6C, 0x00, 0x20]);
    cpu.memory_mut().write(0x2000, 0x78);
    cpu.memory_mut().write(0x2001, 0x56);

    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.pc(), 0x5678);
}

#[test]
fn test_jmp_indirect_page_wrap() {
    // Pointer at 0x20FF takes its high byte from 0x2000, not 0x2100
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x20]);
    cpu.memory_mut().write(0x20FF, 0x34);
    cpu.memory_mut().write(0x2000, 0x12);
    cpu.memory_mut().write(0x2100, 0x99);

    cpu.step();
    assert_eq!(cpu.pc(), 0x1234);
}

// ========== Subroutines ==========

#[test]
fn test_jsr_rts_returns_past_call() {
    // 0x8000: JSR $9000 ; 0x9000: RTS
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90]);
    cpu.memory_mut().write(0x9000, 0x60);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.memory().read(0x01FF), 0x80);
    assert_eq!(cpu.memory().read(0x01FE), 0x02);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_nested_subroutines() {
    // 0x8000: JSR $9000 ; LDX #$01
    // 0x9000: JSR $A000 ; RTS
    // 0xA000: LDA #$2A  ; RTS
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90, 0xA2, 0x01]);
    cpu.memory_mut().load(0x9000, &[0x20, 0x00, 0xA0, 0x60]);
    cpu.memory_mut().load(0xA000, &[0xA9, 0x2A, 0x60]);

    for _ in 0..6 {
        cpu.step();
    }

    assert_eq!(cpu.a(), 0x2A);
    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cpu.sp(), 0xFF);
}

// ========== Stack ==========

#[test]
fn test_pha_pla() {
    // PHA ; LDA #$00 ; PLA
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x9C);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.memory().read(0x01FF), 0x9C);
    cpu.step();
    assert!(cpu.flag_z());

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.a(), 0x9C);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_php_plp_keep_every_bit() {
    // PHP ; PLP
    let mut cpu = setup_cpu(&[0x08, 0x28]);
    cpu.set_status(0b1100_1011);

    cpu.step();
    assert_eq!(cpu.memory().read(0x01FF), 0b1100_1011);

    cpu.set_status(0x00);
    cpu.step();
    assert_eq!(cpu.status(), 0b1100_1011);
}

#[test]
fn test_stack_pointer_wraps_within_page() {
    // PHA with SP=0x00 writes 0x0100 and wraps SP to 0xFF
    let mut cpu = setup_cpu(&[0x48, 0x68]);
    cpu.set_sp(0x00);
    cpu.set_a(0x42);

    cpu.step();
    assert_eq!(cpu.memory().read(0x0100), 0x42);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.step();
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x42);
}

// ========== Flag Instructions ==========

#[test]
fn test_flag_set_and_clear() {
    // SEC ; SED ; SEI ; CLC ; CLD ; CLI ; CLV
    let mut cpu = setup_cpu(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
    cpu.set_flag_v(true);

    for _ in 0..3 {
        assert_eq!(cpu.step(), 2);
    }
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());

    for _ in 0..4 {
        assert_eq!(cpu.step(), 2);
    }
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_i());
    assert!(!cpu.flag_v());
}

#[test]
fn test_nop() {
    let mut cpu = setup_cpu(&[0xEA]);
    let before = cpu.registers();

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.a(), before.a);
    assert_eq!(cpu.status(), before.p.bits());
}
