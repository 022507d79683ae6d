//! Integration-level checks of label discovery and rendering across a
//! multi-label program, beyond the single-instruction cases covered by
//! `smisdis`'s own unit tests.

use smis::instructions::{encode, Opcode};

#[test]
fn two_distinct_forward_targets_get_distinct_synthetic_names() {
    let words = [
        encode(Opcode::JUMP as u8, 0, 0, 0, 4),           // 0: -> addr 4
        encode(Opcode::JumpIfZero as u8, 0, 0, 0, 6),     // 2: -> addr 6
        encode(Opcode::HALT as u8, 0, 0, 0, 0),           // 4
        encode(Opcode::HALT as u8, 0, 0, 0, 0),           // 6
    ];
    let text = smisdis::disassemble(&words).unwrap();

    assert!(text.contains("JUMP Label_0\n"));
    assert!(text.contains("JUMP-IF-ZERO Label_1\n"));
    assert!(text.contains("\nLabel_0:\n"));
    assert!(text.contains("\nLabel_1:\n"));
}

#[test]
fn a_label_at_address_zero_has_no_leading_blank_line() {
    let words = [
        encode(Opcode::JUMP as u8, 0, 0, 0, 0), // loops to itself
    ];
    let text = smisdis::disassemble(&words).unwrap();
    assert!(text.starts_with("Label_0:\n"));
    assert!(!text.starts_with('\n'));
}

#[test]
fn a_label_one_past_the_last_instruction_is_rendered_and_reassembles() {
    // JUMP end\nHALT\nend:\n — the label has no instruction after it.
    let words = [
        encode(Opcode::JUMP as u8, 0, 0, 0, 4),
        encode(Opcode::HALT as u8, 0, 0, 0, 0),
    ];
    let text = smisdis::disassemble(&words).unwrap();
    assert!(text.contains("Label_0:\n"));

    let reassembled = smisasm::assemble(&text).unwrap().0;
    assert_eq!(reassembled, words);
}

#[test]
fn instruction_count_matches_rendered_non_label_line_count() {
    let words = [
        encode(Opcode::SET as u8, 1, 0, 0, 1),
        encode(Opcode::JUMP as u8, 0, 0, 0, 0),
    ];
    let text = smisdis::disassemble(&words).unwrap();
    let instruction_lines = text
        .lines()
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .count();
    assert_eq!(instruction_lines, words.len());
}
