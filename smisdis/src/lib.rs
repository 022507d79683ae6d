//! Disassembler for the SMIS instruction set.
//!
//! [`disassemble`] reverses [`smisasm::assemble`](../smisasm/fn.assemble.html):
//! given a program's instruction words, it reconstructs jump labels from
//! observed J-type targets (pass 1) and renders each word back to
//! canonical mnemonic form (pass 2), sharing `smis`'s bit-field
//! accessors and `Opcode`/mnemonic table with the assembler so both
//! agree on one encoding layout.

use smis::instructions::{field_imm16, field_opcode, field_reg_a, field_reg_b, field_reg_c};
use smis::instructions::{mnemonic_for, opcode_from_u8, Form, Opcode};
use smis::RegisterId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("instruction {index}: byte {opcode:#04x} does not name one of the 36 canonical opcodes")]
    UnknownOpcode { index: usize, opcode: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;

const JUMP_OPCODES: [Opcode; 4] = [
    Opcode::JUMP,
    Opcode::JumpIfZero,
    Opcode::JumpIfNotZero,
    Opcode::JumpLink,
];

/// Pass 1: scan every word's opcode; for J-type instructions, register
/// their target address in the symbol table under a synthetic
/// `Label_<k>` name if it isn't already known. `k` is the 0-based
/// insertion order in which distinct targets are first encountered.
fn discover_labels(words: &[u32]) -> HashMap<u16, String> {
    let mut labels = HashMap::new();
    let mut next_index = 0usize;

    for &word in words {
        let opcode = match opcode_from_u8(field_opcode(word)) {
            Some(opcode) => opcode,
            None => continue,
        };
        if !JUMP_OPCODES.contains(&opcode) {
            continue;
        }
        let target = field_imm16(word);
        labels.entry(target).or_insert_with(|| {
            let name = format!("Label_{}", next_index);
            next_index += 1;
            name
        });
    }

    labels
}

/// Pass 2: re-read the words, emitting a blank line and `<name>:` ahead
/// of any address the symbol table names (except address 0), then one
/// rendered instruction line per word.
pub fn disassemble(words: &[u32]) -> Result<String> {
    let labels = discover_labels(words);
    let mut output = String::new();
    let mut address: u16 = 0;

    for (index, &word) in words.iter().enumerate() {
        if let Some(name) = labels.get(&address) {
            if address != 0 {
                output.push('\n');
            }
            output.push_str(name);
            output.push_str(":\n");
        }

        let opcode = opcode_from_u8(field_opcode(word)).ok_or(Error::UnknownOpcode {
            index,
            opcode: field_opcode(word),
        })?;

        output.push_str(&render(opcode, word, &labels));
        output.push('\n');

        address = address.wrapping_add(2);
    }

    // A label may legally point one past the last instruction (a label
    // with nothing after it); the loop above only visits addresses that
    // hold a rendered word, so that final address needs its own check.
    if let Some(name) = labels.get(&address) {
        if address != 0 {
            output.push('\n');
        }
        output.push_str(name);
        output.push_str(":\n");
    }

    Ok(output)
}

fn reg_name(id: u8) -> String {
    RegisterId(id).name()
}

fn render(opcode: Opcode, word: u32, labels: &HashMap<u16, String>) -> String {
    let mnemonic = mnemonic_for(opcode);
    let reg_a = field_reg_a(word);
    let reg_b = field_reg_b(word);
    let reg_c = field_reg_c(word);
    let imm16 = field_imm16(word);

    match opcode.form() {
        Form::R => format!(
            "{} {} {} {}",
            mnemonic,
            reg_name(reg_a),
            reg_name(reg_b),
            reg_name(reg_c)
        ),
        Form::CopyNot => format!("{} {} {}", mnemonic, reg_name(reg_a), reg_name(reg_b)),
        // Registers are taken from fields B and C; field A is unused for COMPARE.
        Form::Compare => format!("{} {} {}", mnemonic, reg_name(reg_b), reg_name(reg_c)),
        Form::I => format!(
            "{} {} {} #{}",
            mnemonic,
            reg_name(reg_a),
            reg_name(reg_b),
            imm16
        ),
        Form::Set => format!("{} {} #{}", mnemonic, reg_name(reg_a), imm16),
        Form::CompareImm => format!("{} {} #{}", mnemonic, reg_name(reg_b), imm16),
        Form::J => {
            let label = labels
                .get(&imm16)
                .expect("pass 1 registered every J-type target");
            format!("{} {}", mnemonic, label)
        }
        Form::Halt => mnemonic.to_string(),
    }
}
