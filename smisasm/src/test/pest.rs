use crate::{Rule, SmisParser};
use ::pest::*;

#[test]
fn comment() {
    parses_to! {
        parser: SmisParser,
        input: "// hello world",
        rule: Rule::comment,
        tokens: [comment(0, 14)]
    };
}

#[test]
fn mnemonic() {
    parses_to! {
        parser: SmisParser,
        input: "SHIFT-LEFT-IMM",
        rule: Rule::mnemonic,
        tokens: [mnemonic(0, 14)]
    };
}

#[test]
fn label() {
    parses_to! {
        parser: SmisParser,
        input: "loop:",
        rule: Rule::label,
        tokens: [label(0, 5, [name(0, 4)])]
    };
}

#[test]
fn instruction_with_three_operands() {
    parses_to! {
        parser: SmisParser,
        input: "ADD R1 R2 R3",
        rule: Rule::instruction,
        tokens: [instruction(0, 12, [
            mnemonic(0, 3),
            operand(4, 6),
            operand(7, 9),
            operand(10, 12)
        ])]
    };
}

#[test]
fn whitespace_only_line_matches_blank_not_instruction() {
    parses_to! {
        parser: SmisParser,
        input: "  ",
        rule: Rule::blank,
        tokens: [blank(0, 2)]
    };
}

#[test]
fn whitespace_only_line_is_accepted_at_the_program_level() {
    assert!(SmisParser::parse(Rule::program, "HALT\n  \nHALT\n").is_ok());
}

#[test]
fn double_space_is_rejected_at_the_program_level() {
    // `instruction` has no EOI anchor, so it happily matches the "ADD R1"
    // prefix and stops; the second space only becomes a parse error once
    // `program` demands the line be followed by a NEWLINE or EOI.
    assert!(SmisParser::parse(Rule::program, "ADD R1  R2 R3").is_err());
}

#[test]
fn halt_takes_no_operands() {
    parses_to! {
        parser: SmisParser,
        input: "HALT",
        rule: Rule::instruction,
        tokens: [instruction(0, 4, [ mnemonic(0, 4) ])]
    };
}

#[test]
fn program_with_label_comment_and_instruction() {
    let src = "// header\nstart:\nADD R1 R2 R3\nJUMP start";

    parses_to! {
        parser: SmisParser,
        input: src,
        rule: Rule::program,
        tokens: [ program(0, 40, [
            line(0, 9, [ comment(0, 9) ]),
            line(10, 16, [ label(10, 16, [ name(10, 15) ]) ]),
            line(17, 29, [ instruction(17, 29, [
                mnemonic(17, 20),
                operand(21, 23),
                operand(24, 26),
                operand(27, 29)
            ]) ]),
            line(30, 40, [ instruction(30, 40, [
                mnemonic(30, 34),
                operand(35, 40)
            ]) ]),
            EOI(40, 40)
        ]) ]
    };
}
