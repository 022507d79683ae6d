//! Pass 1: build the symbol table by scanning classified lines in order,
//! recording each label against the address of the instruction that
//! follows it.

use crate::error::{Error, Result};
use crate::{LineKind, SourceLine};
use std::collections::HashMap;

pub type SymbolTable<'i> = HashMap<&'i str, u16>;

pub fn build_symbol_table<'i>(lines: &[SourceLine<'i>]) -> Result<SymbolTable<'i>> {
    let mut symbols = SymbolTable::new();
    let mut address: u32 = 0;

    for line in lines {
        match &line.kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Label(name) => {
                if symbols.insert(name, address as u16).is_some() {
                    return Err(Error::Assemble {
                        line: line.number,
                        text: line.text.to_string(),
                        reason: format!("label `{}` is already defined", name),
                    });
                }
            }
            LineKind::Instruction { .. } => {
                address += 2;
            }
        }
    }

    Ok(symbols)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{collect_lines, parser::Rule, parser::SmisParser};
    use pest::Parser;

    fn symbols_for(input: &str) -> Result<SymbolTable> {
        let program = SmisParser::parse(Rule::program, input).unwrap().next().unwrap();
        let lines = collect_lines(input, program);
        build_symbol_table(&lines)
    }

    #[test]
    fn label_points_at_the_next_instruction() {
        let symbols = symbols_for("start:\nADD R1 R2 R3\nJUMP start\n").unwrap();
        assert_eq!(symbols.get("start"), Some(&0));
    }

    #[test]
    fn labels_after_instructions_advance_with_address_counter() {
        let symbols = symbols_for("SET R1 #1\nloop:\nADD R1 R1 R1\nJUMP loop\n").unwrap();
        assert_eq!(symbols.get("loop"), Some(&2));
    }

    #[test]
    fn duplicate_labels_are_a_fatal_error() {
        let result = symbols_for("a:\nHALT\na:\nHALT\n");
        assert!(result.is_err());
    }

    #[test]
    fn blank_and_comment_lines_do_not_advance_the_address_counter() {
        let symbols = symbols_for("// comment\n\nhere:\nHALT\n").unwrap();
        assert_eq!(symbols.get("here"), Some(&0));
    }
}
