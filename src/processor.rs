mod logic;

use crate::constants::MEMORY_CELLS;
use crate::memory::Memory;
use crate::register::RegisterFile;
use thiserror::Error;

pub use self::logic::{tick, TickResult};

/// Zero/sign flags, updated by arithmetic, logic and compare instructions.
#[derive(Clone, Copy, Default, Debug)]
pub struct Flags {
    pub zf: bool,
    pub sf: bool,
}

impl Flags {
    pub fn set_from_result(&mut self, result: u16) {
        self.zf = result == 0;
        self.sf = result & 0x8000 != 0;
    }
}

/// Why the emulator stopped running.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExitCode {
    /// A `HALT` instruction executed.
    Halted,
    /// The fetch loop read an all-zero instruction word at the top of
    /// the loop (the safety terminator, or a program that ran off the
    /// end without an explicit `HALT`).
    Terminated,
    /// `DIVIDE`/`MODULO`(-IMM) with a zero divisor.
    DivisionByZero,
    /// The fetched word's opcode byte does not name one of the 36
    /// canonical opcodes.
    InvalidOpcode,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("program of {0} words does not fit in a {} cell memory", MEMORY_CELLS)]
    ProgramTooLarge(usize),
}

/// The register machine: registers, memory, flags and program counter,
/// driven one instruction at a time by [`logic::tick`].
pub struct Processor {
    registers: RegisterFile,
    memory: Memory,
    flags: Flags,
    pc: u16,
}

impl Processor {
    pub fn new() -> Processor {
        Processor {
            registers: RegisterFile::new(),
            memory: Memory::new(),
            flags: Flags::default(),
            pc: 0,
        }
    }

    /// Loads a program given as 32-bit big-endian instruction words.
    /// Splits each into two 16-bit memory cells and appends a `HALT`
    /// safety terminator, per the load phase semantics.
    pub fn load_program(&mut self, words: &[u32]) -> Result<(), Error> {
        if words.len() * 2 + 1 > MEMORY_CELLS {
            return Err(Error::ProgramTooLarge(words.len()));
        }
        self.memory
            .load_program(words, crate::instructions::Opcode::HALT as u8);
        self.pc = 0;
        Ok(())
    }

    pub fn register(&self, id: u8) -> u16 {
        self.registers.get(id)
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    /// Runs the fetch-decode-execute loop to completion.
    pub fn run(&mut self) -> ExitCode {
        loop {
            let high = self.memory.read_word(self.pc);
            let low = self.memory.read_word(self.pc.wrapping_add(1));
            let instruction = ((high as u32) << 16) | (low as u32);

            if instruction == 0 {
                return ExitCode::Terminated;
            }

            self.pc = self.pc.wrapping_add(2);

            let result = tick(
                &mut self.registers,
                &mut self.memory,
                &mut self.flags,
                instruction,
                self.pc,
            );

            self.registers.reset_zero();

            match result {
                TickResult::Next => {}
                TickResult::Jump(target) => self.pc = target,
                TickResult::Stop(exit_code) => return exit_code,
            }
        }
    }
}

impl Default for Processor {
    fn default() -> Processor {
        Processor::new()
    }
}
