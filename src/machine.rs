//! Machine configurations and the driver loop.
//!
//! A `Machine` owns its devices, wires them onto a `Bus` in a fixed order and
//! drives the CPU. Two ready-made layouts are provided:
//!
//! - `from_rom_image`: a program image mapped as ROM at the top of memory,
//!   RAM everywhere below it
//! - `serial_terminal`: an ACIA at 0x7F70 in front of 64 KiB of RAM holding
//!   the program, with every vector pointing at its load address
//!
//! Custom layouts start from `Machine::new()` and `attach`.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::bus::Bus;
use crate::cpu::NMI_VECTOR;
use crate::devices::{shared, Acia6551, Device, MemoryBlock, SharedDevice};
use crate::error::{ConfigError, Result};
use crate::memory::MemoryBus;
use crate::trace::TraceLine;
use crate::CPU;

/// Smallest accepted program image: it must hold the reset vector.
pub const IMAGE_MIN_LEN: usize = 4;

/// Largest accepted program image: everything except the zero and stack pages.
pub const IMAGE_MAX_LEN: usize = 0xFFFF - 0x0200;

/// Base address of the ACIA in the serial terminal layout.
pub const SERIAL_ACIA_BASE: u16 = 0x7F70;

/// Options for `Machine::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Stop an iteration after this many instructions even without BRK.
    pub max_instructions: Option<u64>,
    /// How many times to run the program from reset to BRK.
    pub iterations: u32,
    /// Log a `TraceLine` per step and keep them in the summary.
    pub trace: bool,
    /// Poll the bus IRQ line before each step and request an interrupt.
    pub service_irq: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_instructions: None,
            iterations: 1,
            trace: false,
            service_irq: false,
        }
    }
}

/// What a `Machine::run` did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Iterations completed.
    pub iterations: u32,
    /// Instructions executed across all iterations.
    pub instructions: u64,
    /// Cycles consumed across all iterations, interrupt entries included.
    pub cycles: u64,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
    /// True if any iteration stopped at `max_instructions` instead of BRK.
    pub hit_instruction_cap: bool,
    /// Per-step trace, filled only when tracing was requested.
    pub trace: Vec<TraceLine>,
}

impl RunSummary {
    /// Clock frequency the run was equivalent to, in MHz.
    ///
    /// Returns 0.0 for a run too short to measure.
    pub fn effective_mhz(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.cycles as f64 / seconds / 1_000_000.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iteration(s), {} instructions, {} cycles in {:.6}s ({:.3} MHz)",
            self.iterations,
            self.instructions,
            self.cycles,
            self.elapsed.as_secs_f64(),
            self.effective_mhz()
        )
    }
}

/// A complete machine: devices, bus and CPU.
///
/// # Examples
///
/// ```
/// use bus6502::{Machine, RunConfig};
///
/// // LDA #$2A ; BRK at 0xFFF6, followed by the three vectors
/// let mut image = vec![0xA9, 0x2A, 0x00, 0x00];
/// image.extend_from_slice(&[0x00, 0x00, 0xF6, 0xFF, 0x00, 0x00]);
///
/// let mut machine = Machine::from_rom_image(&image).unwrap();
/// let summary = machine.run(&RunConfig::default());
///
/// assert_eq!(machine.cpu().a(), 0x2A);
/// assert_eq!(summary.instructions, 2);
/// ```
pub struct Machine {
    cpu: CPU<Bus>,
    devices: Vec<SharedDevice>,
    acia: Option<Rc<RefCell<Acia6551>>>,
}

impl Machine {
    /// A machine with nothing on the bus.
    pub fn new() -> Self {
        Self {
            cpu: CPU::new(Bus::new()),
            devices: Vec::new(),
            acia: None,
        }
    }

    /// Maps `image` as ROM ending at 0xFFFF with RAM below it.
    ///
    /// The image must be 4 to 0xFDFF bytes long. Its last six bytes are the
    /// NMI, reset and IRQ vectors.
    pub fn from_rom_image(image: &[u8]) -> Result<Self> {
        if image.len() > IMAGE_MAX_LEN {
            return Err(ConfigError::ImageTooLarge {
                len: image.len(),
                max: IMAGE_MAX_LEN,
            });
        }
        if image.len() < IMAGE_MIN_LEN {
            return Err(ConfigError::ImageTooSmall {
                len: image.len(),
                min: IMAGE_MIN_LEN,
            });
        }

        let rom_start = (0x10000 - image.len()) as u16;
        let rom = MemoryBlock::from_bytes(rom_start, 0xFFFF, image, true)?;
        let ram = MemoryBlock::ram(0x0000, rom_start - 1)?;

        let mut machine = Self::new();
        machine.attach(ram);
        machine.attach(rom);
        debug!(
            "ROM image layout: RAM 0x0000-0x{:04X}, ROM 0x{:04X}-0xFFFF",
            rom_start - 1,
            rom_start
        );
        Ok(machine)
    }

    /// Reads a flat binary file and maps it with `from_rom_image`.
    pub fn load_rom_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = fs::read(path)?;
        Self::from_rom_image(&image)
    }

    /// An ACIA at 0x7F70 in front of 64 KiB of RAM.
    ///
    /// `program` is copied to `load_address` and the NMI, reset and IRQ
    /// vectors all point at it. The ACIA is attached first, so its four
    /// registers shadow the RAM underneath.
    pub fn serial_terminal(program: &[u8], load_address: u16) -> Result<Self> {
        let mut ram = MemoryBlock::ram(0x0000, 0xFFFF)?;
        ram.copy_from(load_address, program)?;

        let [lo, hi] = load_address.to_le_bytes();
        ram.copy_from(NMI_VECTOR, &[lo, hi, lo, hi, lo, hi])?;

        let mut machine = Self::new();
        let acia = machine.attach(Acia6551::new(SERIAL_ACIA_BASE));
        machine.attach(ram);
        machine.acia = Some(acia);
        debug!(
            "serial terminal layout: ACIA at 0x{:04X}, {} byte program at 0x{:04X}",
            SERIAL_ACIA_BASE,
            program.len(),
            load_address
        );
        Ok(machine)
    }

    /// Takes ownership of `device` and appends it to the bus.
    ///
    /// Returns a handle so the caller can keep talking to the device.
    pub fn attach<D: Device + 'static>(&mut self, device: D) -> Rc<RefCell<D>> {
        let handle = shared(device);
        self.cpu.memory_mut().attach(&handle);
        self.devices.push(handle.clone());
        handle
    }

    /// Detaches and drops every device.
    pub fn clear_bus(&mut self) {
        self.cpu.memory_mut().clear();
        self.devices.clear();
        self.acia = None;
    }

    /// The serial port, in the `serial_terminal` layout.
    pub fn acia(&self) -> Option<&Rc<RefCell<Acia6551>>> {
        self.acia.as_ref()
    }

    pub fn cpu(&self) -> &CPU<Bus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<Bus> {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        self.cpu.memory()
    }

    /// Resets the CPU through the reset vector.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> u8 {
        self.cpu.step()
    }

    /// Runs the program from reset until it executes BRK.
    ///
    /// Each iteration resets the CPU, then steps until the Break flag is set
    /// or `max_instructions` is reached. Without a cap, a program that never
    /// executes BRK runs forever.
    pub fn run(&mut self, config: &RunConfig) -> RunSummary {
        let mut summary = RunSummary::default();
        let start_cycles = self.cpu.cycles();
        let started = Instant::now();

        for _ in 0..config.iterations.max(1) {
            self.cpu.reset();
            let mut executed = 0u64;

            while !self.cpu.flag_b() {
                if config.max_instructions.is_some_and(|max| executed >= max) {
                    summary.hit_instruction_cap = true;
                    break;
                }

                if config.service_irq && self.cpu.memory().irq_active() {
                    self.cpu.maskable_interrupt();
                }

                let cycles = self.cpu.step();
                executed += 1;

                if config.trace {
                    let line = TraceLine::capture(&self.cpu, cycles);
                    trace!("{}", line);
                    summary.trace.push(line);
                }
            }

            summary.instructions += executed;
            summary.iterations += 1;
        }

        summary.elapsed = started.elapsed();
        summary.cycles = self.cpu.cycles() - start_cycles;
        info!("run complete: {}", summary);
        summary
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
