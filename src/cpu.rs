//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor and the
//! fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: an owned `Registers` value (A, X, Y, SP, P, PC)
//! - **Run state**: `AwaitingReset` until the first `reset()`, then `Running`
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Memory**: the `MemoryBus` every fetch, load and store goes through
//!
//! ## Execution Model
//!
//! - `step()`: execute one instruction and return its cycle cost
//! - `run_for_cycles()`: execute until a cycle budget is exhausted
//! - `non_maskable_interrupt()` / `maskable_interrupt()`: interrupt entry,
//!   called by the driver between steps
//!
//! Decoding goes through `OPCODE_TABLE`; execution is one exhaustive `match`
//! on `Operation`. Execution never fails: undocumented opcodes are logged,
//! skipped and cost nothing.

use log::{debug, warn};

use crate::addressing::AddressingMode;
use crate::instructions::{alu, branches, control, inc_dec, shifts, stack, transfer};
use crate::memory::MemoryBus;
use crate::opcodes::{Operation, OPCODE_TABLE};
use crate::registers::{Registers, Status};

/// Address of the non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles charged when a driver-requested interrupt is taken.
pub const INTERRUPT_CYCLES: u8 = 7;

/// Lifecycle of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, `reset()` not yet called.
    AwaitingReset,
    /// Reset has happened; the core executes instructions on `step()`.
    Running,
}

/// Resolved operand of the instruction being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Relative(i8),
    Address(u16),
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. The CPU
/// owns its bus value; with `Bus` that value is a list of non-owning device
/// handles, so the devices themselves stay with the caller.
///
/// # Examples
///
/// ```
/// use bus6502::{CPU, FlatMemory, MemoryBus, RunState};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.state(), RunState::AwaitingReset);
///
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(cpu.flag_i());
///
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) registers: Registers,
    pub(crate) cycles: u64,
    pub(crate) state: RunState,
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU over `memory` in the power-on state.
    ///
    /// All registers are zero and the core waits for `reset()`; nothing is
    /// read from memory yet, so devices may still be attached or loaded.
    pub fn new(memory: M) -> Self {
        Self {
            registers: Registers::default(),
            cycles: 0,
            state: RunState::AwaitingReset,
            memory,
        }
    }

    /// Resets the processor.
    ///
    /// A=X=Y=0, SP=0xFF, only the Interrupt Disable flag set, and PC loaded
    /// from the little-endian reset vector at 0xFFFC/0xFFFD. The cycle
    /// counter is left alone.
    pub fn reset(&mut self) {
        let pc = self.memory.read_word(RESET_VECTOR);
        self.registers = Registers::after_reset(pc);
        self.state = RunState::Running;
        debug!("reset: PC=0x{:04X}", pc);
    }

    /// Executes one instruction and returns its cycle cost.
    ///
    /// Documented opcodes cost 2-7 cycles: the table's base cost, plus one
    /// for a read-class instruction whose indexed address crosses a page,
    /// plus one or two for a taken branch. An undocumented opcode is logged
    /// at `warn` level, skipped (PC advances by one) and costs 0 cycles.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFD, 0x80);
    /// mem.load(0x8000, &[0xEA, 0x02]); // NOP, then an undocumented opcode
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.step(), 2);
    /// assert_eq!(cpu.step(), 0);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self) -> u8 {
        if self.state == RunState::AwaitingReset {
            warn!("step() called before reset(), executing from power-on state");
            self.state = RunState::Running;
        }

        let pc = self.registers.pc;
        let opcode = self.fetch_byte();
        let metadata = OPCODE_TABLE[opcode as usize];

        if !metadata.is_documented() {
            warn!("invalid opcode 0x{:02X} at 0x{:04X}", opcode, pc);
            return 0;
        }

        let (operand, page_crossed) = self.resolve(metadata.addressing_mode);

        let mut cycles = metadata.base_cycles;
        if page_crossed && metadata.operation.pays_page_penalty() {
            cycles += 1;
        }
        cycles += self.execute(metadata.operation, operand);

        self.cycles += u64::from(cycles);
        cycles
    }

    /// Runs the CPU for at least `cycle_budget` cycles.
    ///
    /// Returns the cycles actually consumed, which may overshoot the budget by
    /// up to one instruction. Stops early if a full lap of the address space
    /// passes without a single documented opcode.
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFD, 0x80);
    /// mem.load(0x8000, &[0xEA; 16]); // NOPs
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    /// assert_eq!(cpu.run_for_cycles(10), 10);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> u64 {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);
        let mut idle_steps = 0u32;

        while self.cycles < target_cycles {
            if self.step() == 0 {
                idle_steps += 1;
                if idle_steps > 0xFFFF {
                    warn!("no documented opcode in a full address-space lap, stopping");
                    break;
                }
            } else {
                idle_steps = 0;
            }
        }

        self.cycles - start_cycles
    }

    /// Services a non-maskable interrupt.
    ///
    /// Pushes PC (high, then low) and the flags, sets Interrupt Disable and
    /// jumps through the vector at 0xFFFA/0xFFFB. The I flag does not block
    /// it. Adds `INTERRUPT_CYCLES` to the cycle counter.
    pub fn non_maskable_interrupt(&mut self) {
        debug!("NMI at PC=0x{:04X}", self.registers.pc);
        control::interrupt_sequence(self, NMI_VECTOR);
        self.cycles += u64::from(INTERRUPT_CYCLES);
    }

    /// Requests a maskable interrupt.
    ///
    /// Same sequence as `non_maskable_interrupt` through the vector at
    /// 0xFFFE/0xFFFF, but only while Interrupt Disable is clear. Returns true
    /// if the interrupt was taken.
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0xFFFF, 0x90);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset();
    /// assert!(!cpu.maskable_interrupt()); // I is set after reset
    ///
    /// cpu.set_flag_i(false);
    /// assert!(cpu.maskable_interrupt());
    /// assert_eq!(cpu.pc(), 0x9000);
    /// assert!(cpu.flag_i());
    /// ```
    pub fn maskable_interrupt(&mut self) -> bool {
        if self.registers.flag(Status::INTERRUPT_DISABLE) {
            debug!("IRQ ignored, interrupt disable set");
            return false;
        }

        debug!("IRQ at PC=0x{:04X}", self.registers.pc);
        control::interrupt_sequence(self, IRQ_VECTOR);
        self.cycles += u64::from(INTERRUPT_CYCLES);
        true
    }

    // ========== Fetch and Operand Resolution ==========

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let byte = self.memory.read(self.registers.pc);
        self.registers.advance_pc(1);
        byte
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a pointer stored in the zero page; the high byte wraps to 0x00.
    fn read_zero_page_word(&self, addr: u8) -> u16 {
        let lo = self.memory.read(addr as u16);
        let hi = self.memory.read(addr.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }

    /// Consumes the operand bytes of `mode` and resolves them.
    ///
    /// The flag reports whether indexing moved the address into another page.
    fn resolve(&mut self, mode: AddressingMode) -> (Operand, bool) {
        match mode {
            AddressingMode::Implicit => (Operand::Implied, false),
            AddressingMode::Accumulator => (Operand::Accumulator, false),
            AddressingMode::Immediate => (Operand::Immediate(self.fetch_byte()), false),
            AddressingMode::Relative => (Operand::Relative(self.fetch_byte() as i8), false),
            AddressingMode::ZeroPage => (Operand::Address(self.fetch_byte() as u16), false),
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte();
                let addr = base.wrapping_add(self.registers.x);
                (Operand::Address(addr as u16), false)
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte();
                let addr = base.wrapping_add(self.registers.y);
                (Operand::Address(addr as u16), false)
            }
            AddressingMode::Absolute => (Operand::Address(self.fetch_word()), false),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                indexed(base, self.registers.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                indexed(base, self.registers.y)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                // NMOS quirk: the high byte never leaves the pointer's page
                let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let lo = self.memory.read(pointer);
                let hi = self.memory.read(hi_addr);
                (Operand::Address(u16::from_le_bytes([lo, hi])), false)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.registers.x);
                (Operand::Address(self.read_zero_page_word(pointer)), false)
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                indexed(base, self.registers.y)
            }
        }
    }

    /// Value an operand refers to.
    pub(crate) fn load(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.registers.a,
            Operand::Immediate(value) => value,
            Operand::Relative(offset) => offset as u8,
            Operand::Address(addr) => self.memory.read(addr),
            Operand::Implied => 0,
        }
    }

    /// Writes through an operand: the accumulator or a memory address.
    pub(crate) fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.registers.a = value,
            Operand::Address(addr) => self.memory.write(addr, value),
            Operand::Implied | Operand::Immediate(_) | Operand::Relative(_) => {}
        }
    }

    fn read_modify_write(&mut self, operand: Operand, op: fn(&mut Registers, u8) -> u8) {
        let value = self.load(operand);
        let result = op(&mut self.registers, value);
        self.store(operand, result);
    }

    /// Executes `operation` and returns cycles on top of the base cost.
    fn execute(&mut self, operation: Operation, operand: Operand) -> u8 {
        use Operation::*;

        let mut extra = 0;

        match operation {
            // Arithmetic and logic
            Adc => {
                let value = self.load(operand);
                alu::adc(&mut self.registers, value);
            }
            Sbc => {
                let value = self.load(operand);
                alu::sbc(&mut self.registers, value);
            }
            And => {
                let value = self.load(operand);
                alu::and(&mut self.registers, value);
            }
            Ora => {
                let value = self.load(operand);
                alu::ora(&mut self.registers, value);
            }
            Eor => {
                let value = self.load(operand);
                alu::eor(&mut self.registers, value);
            }
            Bit => {
                let value = self.load(operand);
                alu::bit(&mut self.registers, value);
            }
            Cmp => {
                let (a, value) = (self.registers.a, self.load(operand));
                alu::compare(&mut self.registers, a, value);
            }
            Cpx => {
                let (x, value) = (self.registers.x, self.load(operand));
                alu::compare(&mut self.registers, x, value);
            }
            Cpy => {
                let (y, value) = (self.registers.y, self.load(operand));
                alu::compare(&mut self.registers, y, value);
            }

            // Shifts and rotates
            Asl => self.read_modify_write(operand, shifts::asl),
            Lsr => self.read_modify_write(operand, shifts::lsr),
            Rol => self.read_modify_write(operand, shifts::rol),
            Ror => self.read_modify_write(operand, shifts::ror),

            // Increments and decrements
            Inc => self.read_modify_write(operand, inc_dec::increment),
            Dec => self.read_modify_write(operand, inc_dec::decrement),
            Inx => inc_dec::inx(&mut self.registers),
            Iny => inc_dec::iny(&mut self.registers),
            Dex => inc_dec::dex(&mut self.registers),
            Dey => inc_dec::dey(&mut self.registers),

            // Loads, stores and register transfers
            Lda => {
                let value = self.load(operand);
                transfer::lda(&mut self.registers, value);
            }
            Ldx => {
                let value = self.load(operand);
                transfer::ldx(&mut self.registers, value);
            }
            Ldy => {
                let value = self.load(operand);
                transfer::ldy(&mut self.registers, value);
            }
            Sta => self.store(operand, self.registers.a),
            Stx => self.store(operand, self.registers.x),
            Sty => self.store(operand, self.registers.y),
            Tax => transfer::tax(&mut self.registers),
            Tay => transfer::tay(&mut self.registers),
            Txa => transfer::txa(&mut self.registers),
            Tya => transfer::tya(&mut self.registers),
            Tsx => transfer::tsx(&mut self.registers),
            Txs => transfer::txs(&mut self.registers),

            // Branches
            Bcc => extra = branches::branch_if(&mut self.registers, Status::CARRY, false, operand),
            Bcs => extra = branches::branch_if(&mut self.registers, Status::CARRY, true, operand),
            Bne => extra = branches::branch_if(&mut self.registers, Status::ZERO, false, operand),
            Beq => extra = branches::branch_if(&mut self.registers, Status::ZERO, true, operand),
            Bpl => {
                extra = branches::branch_if(&mut self.registers, Status::NEGATIVE, false, operand)
            }
            Bmi => {
                extra = branches::branch_if(&mut self.registers, Status::NEGATIVE, true, operand)
            }
            Bvc => {
                extra = branches::branch_if(&mut self.registers, Status::OVERFLOW, false, operand)
            }
            Bvs => {
                extra = branches::branch_if(&mut self.registers, Status::OVERFLOW, true, operand)
            }

            // Stack
            Pha => stack::execute_pha(self),
            Php => stack::execute_php(self),
            Pla => stack::execute_pla(self),
            Plp => stack::execute_plp(self),

            // Control flow
            Jmp => control::execute_jmp(self, operand),
            Jsr => control::execute_jsr(self, operand),
            Rts => control::execute_rts(self),
            Rti => control::execute_rti(self),
            Brk => control::execute_brk(self),
            Nop => {}

            // Flags
            Clc => self.registers.set_flag(Status::CARRY, false),
            Sec => self.registers.set_flag(Status::CARRY, true),
            Cli => self.registers.set_flag(Status::INTERRUPT_DISABLE, false),
            Sei => self.registers.set_flag(Status::INTERRUPT_DISABLE, true),
            Cld => self.registers.set_flag(Status::DECIMAL, false),
            Sed => self.registers.set_flag(Status::DECIMAL, true),
            Clv => self.registers.set_flag(Status::OVERFLOW, false),

            // Filtered out by `step` before resolution
            Invalid => {}
        }

        extra
    }

    // ========== State Access ==========

    /// Lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Snapshot of the register set.
    pub fn registers(&self) -> Registers {
        self.registers
    }

    /// Replaces the whole register set.
    pub fn set_registers(&mut self, registers: Registers) {
        self.registers = registers;
    }

    /// Shared access to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Exclusive access to the memory bus, for loading programs and test setup.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Total cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.registers.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.registers.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.registers.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 | SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.registers.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    ///
    /// Bit 5 is reported exactly as stored; reset leaves it clear.
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.reset();
    /// assert_eq!(cpu.status(), 0b0000_0100);
    /// ```
    pub fn status(&self) -> u8 {
        self.registers.p.bits()
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.registers.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.registers.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.registers.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.registers.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.registers.flag(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.registers.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.registers.flag(Status::CARRY)
    }

    // ========== Setters (test and embedding use) ==========

    /// Sets the Accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.registers.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.registers.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.registers.y = value;
    }

    /// Sets the Program Counter.
    pub fn set_pc(&mut self, value: u16) {
        self.registers.pc = value;
    }

    /// Sets the Stack Pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.registers.sp = value;
    }

    /// Sets the whole status register from a packed byte.
    pub fn set_status(&mut self, value: u8) {
        self.registers.p = Status::from_bits_retain(value);
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, on: bool) {
        self.registers.set_flag(Status::NEGATIVE, on);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, on: bool) {
        self.registers.set_flag(Status::OVERFLOW, on);
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, on: bool) {
        self.registers.set_flag(Status::BREAK, on);
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, on: bool) {
        self.registers.set_flag(Status::DECIMAL, on);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, on: bool) {
        self.registers.set_flag(Status::INTERRUPT_DISABLE, on);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, on: bool) {
        self.registers.set_flag(Status::ZERO, on);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, on: bool) {
        self.registers.set_flag(Status::CARRY, on);
    }
}

/// Adds an index to a 16-bit base address, reporting a page change.
fn indexed(base: u16, index: u8) -> (Operand, bool) {
    let addr = base.wrapping_add(index as u16);
    (Operand::Address(addr), (base & 0xFF00) != (addr & 0xFF00))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_with_program(program: &[u8]) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        mem.load(0x8000, program);
        let mut cpu = CPU::new(mem);
        cpu.reset();
        cpu
    }

    #[test]
    fn test_new_awaits_reset() {
        let cpu = CPU::new(FlatMemory::new());
        assert_eq!(cpu.state(), RunState::AwaitingReset);
        assert_eq!(cpu.registers(), Registers::default());
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_reset_state() {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x34);
        mem.write(0xFFFD, 0x12);

        let mut cpu = CPU::new(mem);
        cpu.set_a(0x55);
        cpu.set_status(0xFF);
        cpu.reset();

        assert_eq!(cpu.state(), RunState::Running);
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.status(), Status::INTERRUPT_DISABLE.bits());
    }

    #[test]
    fn test_step_before_reset_runs_from_power_on() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0xE8); // INX at PC=0
        let mut cpu = CPU::new(mem);

        assert_eq!(cpu.step(), 2);
        assert_eq!(cpu.state(), RunState::Running);
        assert_eq!(cpu.x(), 1);
        assert_eq!(cpu.pc(), 0x0001);
    }

    #[test]
    fn test_invalid_opcode_skips_one_byte() {
        let mut cpu = cpu_with_program(&[0x02, 0xFF, 0xEA]);
        let before = cpu.registers();

        assert_eq!(cpu.step(), 0);
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.a(), before.a);
        assert_eq!(cpu.status(), before.p.bits());
    }

    #[test]
    fn test_resolve_zero_page_x_wraps() {
        let mut cpu = cpu_with_program(&[0xB5, 0xFF]); // LDA $FF,X
        cpu.set_x(0x02);
        cpu.memory_mut().write(0x0001, 0x77);
        cpu.memory_mut().write(0x0101, 0x11);

        cpu.step();
        assert_eq!(cpu.a(), 0x77);
    }

    #[test]
    fn test_resolve_indirect_x_wraps_in_zero_page() {
        let mut cpu = cpu_with_program(&[0xA1, 0xFE]); // LDA ($FE,X)
        cpu.set_x(0x01);
        cpu.memory_mut().write(0x00FF, 0x00);
        cpu.memory_mut().write(0x0000, 0x30);
        cpu.memory_mut().write(0x3000, 0x5A);

        cpu.step();
        assert_eq!(cpu.a(), 0x5A);
    }

    #[test]
    fn test_resolve_indirect_y_pointer_wraps() {
        let mut cpu = cpu_with_program(&[0xB1, 0xFF]); // LDA ($FF),Y
        cpu.set_y(0x02);
        cpu.memory_mut().write(0x00FF, 0x00);
        cpu.memory_mut().write(0x0000, 0x40);
        cpu.memory_mut().write(0x4002, 0xA5);

        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.a(), 0xA5);
    }

    #[test]
    fn test_indexed_page_cross_detection() {
        assert_eq!(indexed(0x00FF, 0x01), (Operand::Address(0x0100), true));
        assert_eq!(indexed(0x0010, 0x01), (Operand::Address(0x0011), false));
        assert_eq!(indexed(0xFFFF, 0x01), (Operand::Address(0x0000), true));
    }

    #[test]
    fn test_run_for_cycles() {
        let mut cpu = cpu_with_program(&[0xEA; 32]);
        assert_eq!(cpu.run_for_cycles(10), 10);
        assert_eq!(cpu.pc(), 0x8005);
        assert_eq!(cpu.cycles(), 10);
    }

    #[test]
    fn test_run_for_cycles_stops_on_dead_memory() {
        struct Undocumented;

        impl MemoryBus for Undocumented {
            fn read(&self, _addr: u16) -> u8 {
                0x02
            }

            fn write(&mut self, _addr: u16, _value: u8) {}
        }

        let mut cpu = CPU::new(Undocumented);
        cpu.reset();
        assert_eq!(cpu.run_for_cycles(100), 0);
    }

    #[test]
    fn test_non_maskable_interrupt_ignores_i() {
        let mut cpu = cpu_with_program(&[]);
        cpu.memory_mut().write(0xFFFA, 0x00);
        cpu.memory_mut().write(0xFFFB, 0xA0);
        cpu.set_pc(0x8123);
        assert!(cpu.flag_i());

        cpu.non_maskable_interrupt();
        assert_eq!(cpu.pc(), 0xA000);
        assert_eq!(cpu.sp(), 0xFC);
        assert_eq!(cpu.memory().read(0x01FF), 0x81);
        assert_eq!(cpu.memory().read(0x01FE), 0x23);
        assert_eq!(cpu.memory().read(0x01FD), Status::INTERRUPT_DISABLE.bits());
        assert_eq!(cpu.cycles(), 7);
    }

    #[test]
    fn test_maskable_interrupt_blocked_by_i() {
        let mut cpu = cpu_with_program(&[]);
        let before = cpu.registers();

        assert!(!cpu.maskable_interrupt());
        assert_eq!(cpu.registers(), before);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_setters() {
        let mut cpu = cpu_with_program(&[]);
        cpu.set_flag_c(true);
        cpu.set_flag_v(true);
        cpu.set_flag_i(false);
        assert_eq!(cpu.status(), 0b0100_0001);

        cpu.set_status(0xFF);
        assert!(cpu.flag_n() && cpu.flag_b() && cpu.flag_d() && cpu.flag_z());
    }
}
