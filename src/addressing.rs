//! # Addressing Modes
//!
//! The 13 NMOS addressing modes. Only the operand shape lives here; the CPU
//! consumes the operand bytes and resolves the effective address.

/// How an instruction locates its operand.
///
/// Operand bytes following the opcode:
///
/// | Bytes | Modes |
/// |-------|-------|
/// | 0 | Implicit, Accumulator |
/// | 1 | Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY |
/// | 2 | Absolute, AbsoluteX, AbsoluteY, Indirect |
///
/// Zero-page indexing and zero-page pointers wrap inside page zero; the
/// absolute forms wrap at 0xFFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// `CLC`, `RTS`
    Implicit,
    /// `ASL A`
    Accumulator,
    /// `LDA #$10`
    Immediate,
    /// `LDA $80`
    ZeroPage,
    /// `LDA $80,X`, address is `(op + X) & 0xFF`
    ZeroPageX,
    /// `LDX $80,Y`, address is `(op + Y) & 0xFF`
    ZeroPageY,
    /// Signed displacement from the next instruction, branches only.
    Relative,
    /// `JMP $1234`
    Absolute,
    /// `LDA $1234,X`
    AbsoluteX,
    /// `LDA $1234,Y`
    AbsoluteY,
    /// `JMP ($1234)`. A pointer at $xxFF takes its high byte from $xx00.
    Indirect,
    /// `LDA ($40,X)`: pointer at `(op + X) & 0xFF`.
    IndirectX,
    /// `LDA ($40),Y`: pointer at `op`, then Y is added to the 16-bit base.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.operand_len(), 0);
    /// assert_eq!(AddressingMode::IndirectY.operand_len(), 1);
    /// assert_eq!(AddressingMode::AbsoluteX.operand_len(), 2);
    /// ```
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// True for the indexed modes that can cross a page and cost a cycle.
    pub const fn can_cross_page(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
        )
    }
}
