//! Assembler for the SMIS instruction set.
//!
//! [`assemble`] turns a text stream of SMIS assembly into the sequence of
//! 32-bit instruction words that make up a `.bin` file, alongside a
//! [`SourceMap`] associating each emitted word with the source line it
//! came from.
//!
//! Parsing uses [pest], against the grammar in `src/grammar.pest`.
//! Assembly is two-pass, per the form table: pass 1 ([`labels`]) builds
//! the symbol table, pass 2 ([`instructions`]) encodes each instruction,
//! resolving label operands against it.
//!
//! [pest]: https://docs.rs/pest/

mod error;
mod instructions;
mod int_util;
mod labels;
mod parser;
mod source_map;


pub use error::{Error, Result};
pub use parser::{Rule, SmisParser};
pub use source_map::{SourceMap, SourceMapItem};

use pest::iterators::Pair;
use pest::Parser;

/// What a classified source line contains.
pub(crate) enum LineKind<'i> {
    Blank,
    Comment,
    Label(&'i str),
    Instruction {
        mnemonic: &'i str,
        operands: Vec<&'i str>,
    },
}

/// A line of source, tagged with its 1-based number and raw text for
/// error reporting.
pub(crate) struct SourceLine<'i> {
    pub number: u32,
    pub text: &'i str,
    pub kind: LineKind<'i>,
}

/// Assembles a complete SMIS program.
pub fn assemble(input: &str) -> Result<(Vec<u32>, SourceMap)> {
    let program = SmisParser::parse(Rule::program, input)?.next().unwrap();
    let lines = collect_lines(input, program);

    let symbols = labels::build_symbol_table(&lines)?;
    instructions::encode_program(&lines, &symbols)
}

/// Classifies each `line` pair produced by the grammar, pairing it with
/// its raw text. When the source ends with a trailing newline the
/// grammar's mandatory trailing `line` matches one phantom blank line
/// past the last real one; `raw_lines.get` falls back to an empty string
/// for it, which is harmless since a blank line carries no content.
pub(crate) fn collect_lines<'i>(input: &'i str, program: Pair<'i, Rule>) -> Vec<SourceLine<'i>> {
    let raw_lines: Vec<&str> = input.lines().collect();

    program
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::line)
        .enumerate()
        .map(|(index, line_pair)| {
            let number = index as u32 + 1;
            let text = raw_lines.get(index).copied().unwrap_or("");
            let kind = match line_pair.into_inner().next() {
                Some(inner) => classify(inner),
                None => LineKind::Blank,
            };
            SourceLine { number, text, kind }
        })
        .collect()
}

fn classify(inner: Pair<'_, Rule>) -> LineKind<'_> {
    match inner.as_rule() {
        Rule::comment => LineKind::Comment,
        Rule::blank => LineKind::Blank,
        Rule::label => {
            let name = inner.into_inner().next().unwrap().as_str();
            LineKind::Label(name)
        }
        Rule::instruction => {
            let mut parts = inner.into_inner();
            let mnemonic = parts.next().unwrap().as_str();
            let operands = parts.map(|operand| operand.as_str()).collect();
            LineKind::Instruction { mnemonic, operands }
        }
        _ => unreachable!("a line contains only comment, label, instruction or blank"),
    }
}
