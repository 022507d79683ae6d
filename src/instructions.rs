use crate::constants;
use num::traits::FromPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};

/// The closed set of 36 SMIS opcodes. Discriminants are the canonical
/// opcode numbers and are binding on the binary format: changing one
/// would silently break every existing `.bin` file.
///
/// Mnemonics such as `SHIFT-LEFT` are not valid Rust identifiers, so
/// string parsing goes through the [`MNEMONICS`] table rather than a
/// derive; `FromPrimitive`/`ToPrimitive` give the numeric conversions the
/// disassembler and emulator decode against.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, ToPrimitive, FromPrimitive)]
pub enum Opcode {
    /// `SET rD, #imm` — rD <- imm.
    SET = 1,
    /// `COPY rD, rSrc` — rD <- rSrc.
    COPY = 2,
    /// `ADD rD, rO1, rO2` — rD <- rO1 + rO2 (mod 2^16).
    ADD = 3,
    /// `SUBTRACT rD, rO1, rO2` — rD <- rO1 - rO2 (mod 2^16).
    SUBTRACT = 4,
    /// `MULTIPLY rD, rO1, rO2` — rD <- rO1 * rO2 (mod 2^16).
    MULTIPLY = 5,
    /// `DIVIDE rD, rO1, rO2` — rD <- rO1 / rO2; runtime error if rO2 = 0.
    DIVIDE = 6,
    /// `MODULO rD, rO1, rO2` — rD <- rO1 % rO2; runtime error if rO2 = 0.
    MODULO = 7,
    /// `COMPARE rO1, rO2` — sets flags from rO1 - rO2, writes nothing.
    COMPARE = 8,
    /// `SHIFT-LEFT rD, rO1, rO2` — rD <- rO1 << (rO2 & 0x1F).
    ShiftLeft = 9,
    /// `SHIFT-RIGHT rD, rO1, rO2` — rD <- rO1 >> (rO2 & 0x1F).
    ShiftRight = 10,
    /// `AND rD, rO1, rO2`.
    AND = 11,
    /// `OR rD, rO1, rO2`.
    OR = 12,
    /// `XOR rD, rO1, rO2`.
    XOR = 13,
    /// `NAND rD, rO1, rO2` — rD <- ~(rO1 & rO2) & 0xFFFF.
    NAND = 14,
    /// `NOR rD, rO1, rO2` — rD <- ~(rO1 | rO2) & 0xFFFF.
    NOR = 15,
    /// `NOT rD, rSrc` — rD <- ~rSrc & 0xFFFF.
    NOT = 16,
    /// `ADD-IMM rD, rO1, #imm`.
    AddImm = 17,
    /// `SUBTRACT-IMM rD, rO1, #imm`.
    SubtractImm = 18,
    /// `MULTIPLY-IMM rD, rO1, #imm`.
    MultiplyImm = 19,
    /// `DIVIDE-IMM rD, rO1, #imm`.
    DivideImm = 20,
    /// `MODULO-IMM rD, rO1, #imm`.
    ModuloImm = 21,
    /// `COMPARE-IMM rO1, #imm`.
    CompareImm = 22,
    /// `SHIFT-LEFT-IMM rD, rO1, #imm`.
    ShiftLeftImm = 23,
    /// `SHIFT-RIGHT-IMM rD, rO1, #imm`.
    ShiftRightImm = 24,
    /// `AND-IMM rD, rO1, #imm`.
    AndImm = 25,
    /// `OR-IMM rD, rO1, #imm`.
    OrImm = 26,
    /// `XOR-IMM rD, rO1, #imm`.
    XorImm = 27,
    /// `NAND-IMM rD, rO1, #imm`.
    NandImm = 28,
    /// `NOR-IMM rD, rO1, #imm`.
    NorImm = 29,
    /// `LOAD rD, rB, #offset` — rD <- memory\[rB + offset\].
    LOAD = 30,
    /// `STORE rS, rB, #offset` — memory\[rB + offset\] <- rS.
    STORE = 31,
    /// `JUMP target` — PC <- target.
    JUMP = 32,
    /// `JUMP-IF-ZERO target` — PC <- target if ZF.
    JumpIfZero = 33,
    /// `JUMP-IF-NOTZERO target` — PC <- target if !ZF.
    JumpIfNotZero = 34,
    /// `JUMP-LINK target` — RLR <- PC (post-increment); PC <- target.
    JumpLink = 35,
    /// Stops the emulator.
    HALT = 36,
}

impl Opcode {
    pub fn form(self) -> Form {
        use Opcode::*;
        match self {
            SET => Form::Set,
            COPY | NOT => Form::CopyNot,
            ADD | SUBTRACT | MULTIPLY | DIVIDE | MODULO | ShiftLeft | ShiftRight | AND | OR
            | XOR | NAND | NOR => Form::R,
            COMPARE => Form::Compare,
            AddImm | SubtractImm | MultiplyImm | DivideImm | ModuloImm | ShiftLeftImm
            | ShiftRightImm | AndImm | OrImm | XorImm | NandImm | NorImm | LOAD | STORE => {
                Form::I
            }
            CompareImm => Form::CompareImm,
            JUMP | JumpIfZero | JumpIfNotZero | JumpLink => Form::J,
            HALT => Form::Halt,
        }
    }
}

/// The eight instruction shapes named in the form table: how many
/// operands an assembly line must have, and how the word's fields are
/// populated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Form {
    /// Three registers: `op | rD | rO1 | rO2 | 0`.
    R,
    /// Two registers + immediate: `op | rD | rO1 | imm`.
    I,
    /// One label operand: `op | 0 | 0 | target`.
    J,
    /// `SET rD, #imm`: `op | rD | 0 | imm`.
    Set,
    /// `COPY`/`NOT rD, rSrc`: `op | rD | rSrc | 0 | 0`.
    CopyNot,
    /// `COMPARE rO1, rO2`: `op | 0 | rO1 | rO2 | 0`.
    Compare,
    /// `COMPARE-IMM rO1, #imm`: `op | 0 | rO1 | imm`.
    CompareImm,
    /// `HALT`: `op | 0 | 0 | 0 | 0`.
    Halt,
}

impl Form {
    /// Number of assembly-level operands this form takes.
    pub fn arity(self) -> usize {
        match self {
            Form::R => 3,
            Form::I => 3,
            Form::J => 1,
            Form::Set => 2,
            Form::CopyNot => 2,
            Form::Compare => 2,
            Form::CompareImm => 2,
            Form::Halt => 0,
        }
    }
}

/// Named bit-field accessors over a raw instruction word, shared by the
/// assembler's encoder and the disassembler's decoder so both agree on
/// the same layout without duplicating the mask/offset arithmetic.
pub fn encode(opcode: u8, reg_a: u8, reg_b: u8, reg_c: u8, imm16: u16) -> u32 {
    ((opcode as u32) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK
        | ((reg_a as u32) << constants::REG_A_OFFSET) & constants::REG_A_MASK
        | ((reg_b as u32) << constants::REG_B_OFFSET) & constants::REG_B_MASK
        | ((reg_c as u32) << constants::REG_C_OFFSET) & constants::REG_C_MASK
        | (imm16 as u32) & constants::IMMEDIATE_MASK
}

pub fn field_opcode(word: u32) -> u8 {
    ((word & constants::OPCODE_MASK) >> constants::OPCODE_OFFSET) as u8
}

pub fn field_reg_a(word: u32) -> u8 {
    ((word & constants::REG_A_MASK) >> constants::REG_A_OFFSET) as u8
}

pub fn field_reg_b(word: u32) -> u8 {
    ((word & constants::REG_B_MASK) >> constants::REG_B_OFFSET) as u8
}

pub fn field_reg_c(word: u32) -> u8 {
    ((word & constants::REG_C_MASK) >> constants::REG_C_OFFSET) as u8
}

pub fn field_imm16(word: u32) -> u16 {
    (word & constants::IMMEDIATE_MASK) as u16
}

/// Register R0-R15 with the four named aliases.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterId(pub u8);

impl RegisterId {
    pub const RZR: RegisterId = RegisterId(constants::REG_ZR);
    pub const RLR: RegisterId = RegisterId(constants::REG_RLR);
    pub const RBP: RegisterId = RegisterId(constants::REG_RBP);
    pub const RSP: RegisterId = RegisterId(constants::REG_RSP);

    /// Renders as the alias (`RZR`/`RSP`/`RBP`/`RLR`) for 0/15/14/13,
    /// `R<n>` otherwise.
    pub fn name(self) -> String {
        match self.0 {
            constants::REG_ZR => "RZR".to_string(),
            constants::REG_RSP => "RSP".to_string(),
            constants::REG_RBP => "RBP".to_string(),
            constants::REG_RLR => "RLR".to_string(),
            n => format!("R{}", n),
        }
    }
}

/// Single static table mapping mnemonic to opcode, replacing the
/// chained-string-comparison dispatch of the ad-hoc original.
pub const MNEMONICS: &[(&str, Opcode)] = &[
    ("SET", Opcode::SET),
    ("COPY", Opcode::COPY),
    ("ADD", Opcode::ADD),
    ("SUBTRACT", Opcode::SUBTRACT),
    ("MULTIPLY", Opcode::MULTIPLY),
    ("DIVIDE", Opcode::DIVIDE),
    ("MODULO", Opcode::MODULO),
    ("COMPARE", Opcode::COMPARE),
    ("SHIFT-LEFT", Opcode::ShiftLeft),
    ("SHIFT-RIGHT", Opcode::ShiftRight),
    ("AND", Opcode::AND),
    ("OR", Opcode::OR),
    ("XOR", Opcode::XOR),
    ("NAND", Opcode::NAND),
    ("NOR", Opcode::NOR),
    ("NOT", Opcode::NOT),
    ("ADD-IMM", Opcode::AddImm),
    ("SUBTRACT-IMM", Opcode::SubtractImm),
    ("MULTIPLY-IMM", Opcode::MultiplyImm),
    ("DIVIDE-IMM", Opcode::DivideImm),
    ("MODULO-IMM", Opcode::ModuloImm),
    ("COMPARE-IMM", Opcode::CompareImm),
    ("SHIFT-LEFT-IMM", Opcode::ShiftLeftImm),
    ("SHIFT-RIGHT-IMM", Opcode::ShiftRightImm),
    ("AND-IMM", Opcode::AndImm),
    ("OR-IMM", Opcode::OrImm),
    ("XOR-IMM", Opcode::XorImm),
    ("NAND-IMM", Opcode::NandImm),
    ("NOR-IMM", Opcode::NorImm),
    ("LOAD", Opcode::LOAD),
    ("STORE", Opcode::STORE),
    ("JUMP", Opcode::JUMP),
    ("JUMP-IF-ZERO", Opcode::JumpIfZero),
    ("JUMP-IF-NOTZERO", Opcode::JumpIfNotZero),
    ("JUMP-LINK", Opcode::JumpLink),
    ("HALT", Opcode::HALT),
];

/// Case-sensitive exact-match mnemonic lookup, per the assembler's
/// lexical rules.
pub fn opcode_for_mnemonic(mnemonic: &str) -> Option<Opcode> {
    MNEMONICS
        .iter()
        .find(|(name, _)| *name == mnemonic)
        .map(|(_, opcode)| *opcode)
}

/// Canonical mnemonic text for an opcode, as rendered by the
/// disassembler.
pub fn mnemonic_for(opcode: Opcode) -> &'static str {
    MNEMONICS
        .iter()
        .find(|(_, op)| *op == opcode)
        .map(|(name, _)| *name)
        .expect("every Opcode variant has a MNEMONICS entry")
}

/// Decodes a raw opcode byte into an [`Opcode`], if it names one of the
/// 36 canonical numbers.
pub fn opcode_from_u8(value: u8) -> Option<Opcode> {
    FromPrimitive::from_u8(value)
}
