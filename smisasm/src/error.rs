use crate::Rule;
use thiserror::Error;

/// A fatal assembly error. Lexical and syntactic failures the grammar
/// itself rejects surface as `Parse`; everything the grammar accepts but
/// §4.1's form table or symbol table rejects (unknown mnemonic, bad
/// arity, malformed operand, out-of-range immediate, undefined or
/// duplicate label) surfaces as `Assemble`, tagged with the 1-based
/// source line and the offending text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {0}")]
    Parse(#[from] pest::error::Error<Rule>),

    #[error("line {line}: {reason}\n    {text}")]
    Assemble {
        line: u32,
        text: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
