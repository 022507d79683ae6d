extern crate num;
#[macro_use]
extern crate num_derive;

pub mod constants;
pub mod instructions;
pub mod memory;
pub mod processor;
pub mod register;

/// A 32-bit instruction word, as stored (big-endian) in a `.bin` file.
pub type Word = u32;

pub use instructions::{Form, Opcode, RegisterId};
pub use memory::{Memory, Storage, StorageMut};
pub use processor::{ExitCode, Processor};
pub use register::RegisterFile;
