//! # 6502 Instruction Implementations
//!
//! Operation semantics, organized by category. The CPU resolves the operand
//! and calls into these modules from its dispatch `match`.
//!
//! Operations that only touch registers are plain functions over
//! `&mut Registers`. Operations that need the stack or a vector take the CPU.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, BIT and the compares
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **branches**: the eight conditional branches
//! - **transfer**: loads and register-to-register transfers
//! - **stack**: PHA, PHP, PLA, PLP and the push/pull primitives
//! - **control**: JMP, JSR, RTS, RTI, BRK and interrupt entry

pub mod alu;
pub mod branches;
pub mod control;
pub mod inc_dec;
pub mod shifts;
pub mod stack;
pub mod transfer;
