//! Pass 2: re-scan the classified lines and encode each instruction word,
//! resolving J-type label operands against the symbol table pass 1
//! built.

use crate::error::{Error, Result};
use crate::int_util::{parse_immediate, parse_register};
use crate::labels::SymbolTable;
use crate::source_map::{SourceMap, SourceMapItem};
use crate::{LineKind, SourceLine};
use smis::instructions::{encode, opcode_for_mnemonic, Form};

pub fn encode_program(
    lines: &[SourceLine<'_>],
    symbols: &SymbolTable<'_>,
) -> Result<(Vec<u32>, SourceMap)> {
    let mut words = Vec::new();
    let mut source_map = Vec::new();

    for line in lines {
        let (mnemonic, operands) = match &line.kind {
            LineKind::Instruction { mnemonic, operands } => (*mnemonic, operands),
            _ => continue,
        };

        words.push(encode_instruction(line, mnemonic, operands, symbols)?);
        source_map.push(SourceMapItem {
            start_line: line.number,
            line_count: 1,
        });
    }

    Ok((words, source_map))
}

fn encode_instruction(
    line: &SourceLine<'_>,
    mnemonic: &str,
    operands: &[&str],
    symbols: &SymbolTable<'_>,
) -> Result<u32> {
    let fail = |reason: String| Error::Assemble {
        line: line.number,
        text: line.text.to_string(),
        reason,
    };

    let opcode =
        opcode_for_mnemonic(mnemonic).ok_or_else(|| fail(format!("unknown mnemonic `{}`", mnemonic)))?;
    let form = opcode.form();

    if operands.len() != form.arity() {
        return Err(fail(format!(
            "`{}` takes {} operand(s), found {}",
            mnemonic,
            form.arity(),
            operands.len()
        )));
    }

    let reg = |token: &str| -> Result<u8> {
        parse_register(token).ok_or_else(|| fail(format!("`{}` is not a valid register", token)))
    };
    let imm = |token: &str| -> Result<u16> {
        let value = parse_immediate(token)
            .ok_or_else(|| fail(format!("`{}` is not a valid immediate", token)))?;
        if value > 0xFFFF {
            return Err(fail(format!("immediate {} is out of range 0..65535", value)));
        }
        Ok(value as u16)
    };
    let target = |token: &str| -> Result<u16> {
        symbols
            .get(token)
            .copied()
            .ok_or_else(|| fail(format!("undefined label `{}`", token)))
    };

    let word = match form {
        Form::R => {
            let reg_d = reg(operands[0])?;
            let reg_o1 = reg(operands[1])?;
            let reg_o2 = reg(operands[2])?;
            encode(opcode as u8, reg_d, reg_o1, reg_o2, 0)
        }
        Form::I => {
            let reg_d = reg(operands[0])?;
            let reg_o1 = reg(operands[1])?;
            let imm16 = imm(operands[2])?;
            encode(opcode as u8, reg_d, reg_o1, 0, imm16)
        }
        Form::J => {
            let addr = target(operands[0])?;
            encode(opcode as u8, 0, 0, 0, addr)
        }
        Form::Set => {
            let reg_d = reg(operands[0])?;
            let imm16 = imm(operands[1])?;
            encode(opcode as u8, reg_d, 0, 0, imm16)
        }
        Form::CopyNot => {
            let reg_d = reg(operands[0])?;
            let reg_src = reg(operands[1])?;
            encode(opcode as u8, reg_d, reg_src, 0, 0)
        }
        Form::Compare => {
            let reg_o1 = reg(operands[0])?;
            let reg_o2 = reg(operands[1])?;
            encode(opcode as u8, 0, reg_o1, reg_o2, 0)
        }
        Form::CompareImm => {
            let reg_o1 = reg(operands[0])?;
            let imm16 = imm(operands[1])?;
            encode(opcode as u8, 0, reg_o1, 0, imm16)
        }
        Form::Halt => encode(opcode as u8, 0, 0, 0, 0),
    };

    Ok(word)
}

#[cfg(test)]
mod test {
    use crate::assemble;

    #[test]
    fn worked_example_add_three_registers() {
        let (words, _) = assemble("ADD R1 R2 R3\n").unwrap();
        assert_eq!(words, vec![0x0312_3000]);
    }

    #[test]
    fn worked_example_set_with_immediate() {
        let (words, _) = assemble("SET R4 #42\n").unwrap();
        assert_eq!(words, vec![0x0140_002A]);
    }

    #[test]
    fn worked_example_jump_to_a_later_label() {
        let program = "JUMP loop\nHALT\nHALT\nloop:\nHALT\n";
        let (words, _) = assemble(program).unwrap();
        assert_eq!(words[0], 0x2000_0006);
    }

    #[test]
    fn unknown_mnemonic_is_a_fatal_error() {
        assert!(assemble("FROBNICATE R1\n").is_err());
    }

    #[test]
    fn wrong_arity_is_a_fatal_error() {
        assert!(assemble("ADD R1 R2\n").is_err());
    }

    #[test]
    fn undefined_label_is_a_fatal_error() {
        assert!(assemble("JUMP nowhere\n").is_err());
    }

    #[test]
    fn out_of_range_immediate_is_a_fatal_error() {
        assert!(assemble("SET R1 #70000\n").is_err());
    }

    #[test]
    fn compare_and_halt_have_no_destination_register() {
        let (words, _) = assemble("COMPARE R1 R2\nHALT\n").unwrap();
        assert_eq!(smis::instructions::field_reg_a(words[0]), 0);
    }
}
