//! The `.bin` container format: a bare, header-less sequence of 32-bit
//! big-endian instruction words, one per assembled instruction.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("file length ({0} bytes) is not a multiple of 4")]
    MisalignedLength(usize),
}

/// An assembled program: a flat sequence of 32-bit instruction words in
/// emission order.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Program {
    words: Vec<u32>,
}

impl Program {
    pub fn from_words(words: Vec<u32>) -> Program {
        Program { words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }
}

/// Reads a `.bin` stream: 4-byte big-endian words until EOF.
pub fn read<R: Read>(reader: &mut R) -> Result<Program, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() % 4 != 0 {
        return Err(Error::MisalignedLength(bytes.len()));
    }

    let mut cursor = &bytes[..];
    let mut words = Vec::with_capacity(bytes.len() / 4);
    while !cursor.is_empty() {
        words.push(cursor.read_u32::<BigEndian>()?);
    }

    Ok(Program::from_words(words))
}

/// Writes a `.bin` stream: each word as 4 big-endian bytes, no header,
/// no padding, no footer.
pub fn write<W: Write>(writer: &mut W, program: &Program) -> Result<(), Error> {
    for &word in program.words() {
        writer.write_u32::<BigEndian>(word)?;
    }
    Ok(())
}

pub trait ReadSmisExt: Read {
    fn read_program(&mut self) -> Result<Program, Error>;
}

impl<R: Read + ?Sized> ReadSmisExt for R {
    fn read_program(&mut self) -> Result<Program, Error> {
        read(self)
    }
}

pub trait WriteSmisExt: Write {
    fn write_program(&mut self, program: &Program) -> Result<(), Error>;
}

impl<W: Write + ?Sized> WriteSmisExt for W {
    fn write_program(&mut self, program: &Program) -> Result<(), Error> {
        write(self, program)
    }
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Program, Error> {
    let mut reader = BufReader::new(File::open(path)?);
    read(&mut reader)
}

pub fn write_file<P: AsRef<Path>>(path: P, program: &Program) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, program)
}
