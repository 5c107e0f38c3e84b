//! Opcode table validation tests
//!
//! Verifies that the opcode metadata table is complete and consistent.

use bus6502::{AddressingMode, Operation, OPCODE_TABLE};

#[test]
fn test_documented_opcode_count() {
    let documented = OPCODE_TABLE.iter().filter(|m| m.is_documented()).count();
    assert_eq!(documented, 151);
}

#[test]
fn test_sizes_follow_addressing_mode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert_eq!(
            metadata.size_bytes,
            1 + metadata.addressing_mode.operand_len(),
            "Opcode 0x{:02X} size mismatch",
            opcode
        );
    }
}

#[test]
fn test_documented_cycles_in_range() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_documented() {
            assert!(
                (2..=7).contains(&metadata.base_cycles),
                "Opcode 0x{:02X} has {} base cycles",
                opcode,
                metadata.base_cycles
            );
        } else {
            assert_eq!(metadata.base_cycles, 0);
            assert_eq!(metadata.mnemonic(), "???");
        }
    }
}

#[test]
fn test_known_entries() {
    let lda = &OPCODE_TABLE[0xB1];
    assert_eq!(lda.operation, Operation::Lda);
    assert_eq!(lda.addressing_mode, AddressingMode::IndirectY);
    assert_eq!(lda.base_cycles, 5);

    let jmp = &OPCODE_TABLE[0x6C];
    assert_eq!(jmp.operation, Operation::Jmp);
    assert_eq!(jmp.addressing_mode, AddressingMode::Indirect);
    assert_eq!(jmp.base_cycles, 5);

    let asl = &OPCODE_TABLE[0x0A];
    assert_eq!(asl.addressing_mode, AddressingMode::Accumulator);
    assert_eq!(asl.size_bytes, 1);

    let inc = &OPCODE_TABLE[0xFE];
    assert_eq!(inc.mnemonic(), "INC");
    assert_eq!(inc.base_cycles, 7);
}

#[test]
fn test_every_branch_is_relative() {
    for opcode in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
        let metadata = &OPCODE_TABLE[opcode];
        assert_eq!(metadata.addressing_mode, AddressingMode::Relative);
        assert_eq!(metadata.base_cycles, 2);
        assert_eq!(metadata.size_bytes, 2);
    }
}

#[test]
fn test_page_penalty_only_on_read_instructions() {
    for metadata in OPCODE_TABLE.iter() {
        if metadata.operation.pays_page_penalty() {
            assert!(
                !matches!(
                    metadata.operation,
                    Operation::Sta | Operation::Stx | Operation::Sty | Operation::Inc | Operation::Asl
                ),
                "{} must not pay the page-cross penalty",
                metadata.mnemonic()
            );
        }
    }
}
