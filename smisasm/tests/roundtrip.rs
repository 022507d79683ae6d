//! Assemble -> disassemble -> reassemble round-trip, per the round-trip
//! property: `assemble(disassemble(assemble(P))) == assemble(P)`.

use smisasm::assemble;

fn words_of(source: &str) -> Vec<u32> {
    assemble(source).unwrap().0
}

fn round_trip_bytes_match(source: &str) {
    let original = words_of(source);
    let disassembled = smisdis::disassemble(&original).unwrap();
    let reassembled = words_of(&disassembled);
    assert_eq!(
        reassembled, original,
        "reassembling the disassembly of:\n{}\nproduced:\n{}\nwhich differs from the original",
        source, disassembled
    );
}

#[test]
fn scenario_loop_with_backward_jump_round_trips() {
    round_trip_bytes_match("start:\nADD R1 R2 R3\nJUMP start\n");
}

#[test]
fn program_exercising_every_instruction_form_round_trips() {
    let source = "\
SET R1 #5\n\
SET R2 #3\n\
COPY R3 R1\n\
NOT R4 R3\n\
ADD R5 R1 R2\n\
SUBTRACT R5 R1 R2\n\
MULTIPLY R5 R1 R2\n\
DIVIDE R5 R1 R2\n\
MODULO R5 R1 R2\n\
COMPARE R1 R2\n\
SHIFT-LEFT R5 R1 R2\n\
SHIFT-RIGHT R5 R1 R2\n\
AND R5 R1 R2\n\
OR R5 R1 R2\n\
XOR R5 R1 R2\n\
NAND R5 R1 R2\n\
NOR R5 R1 R2\n\
ADD-IMM R5 R1 #1\n\
SUBTRACT-IMM R5 R1 #1\n\
MULTIPLY-IMM R5 R1 #1\n\
DIVIDE-IMM R5 R1 #1\n\
MODULO-IMM R5 R1 #1\n\
COMPARE-IMM R1 #1\n\
SHIFT-LEFT-IMM R5 R1 #1\n\
SHIFT-RIGHT-IMM R5 R1 #1\n\
AND-IMM R5 R1 #1\n\
OR-IMM R5 R1 #1\n\
XOR-IMM R5 R1 #1\n\
NAND-IMM R5 R1 #1\n\
NOR-IMM R5 R1 #1\n\
LOAD R5 R1 #0\n\
STORE R5 R1 #0\n\
forward:\n\
JUMP forward\n\
JUMP-IF-ZERO forward\n\
JUMP-IF-NOTZERO forward\n\
JUMP-LINK forward\n\
HALT\n";
    round_trip_bytes_match(source);
}

#[test]
fn duplicate_jump_targets_survive_the_round_trip() {
    round_trip_bytes_match("JUMP a\nJUMP a\na:\nHALT\n");
}

#[test]
fn a_label_with_no_trailing_instruction_round_trips() {
    round_trip_bytes_match("JUMP end\nHALT\nend:\n");
}

#[test]
fn assembling_the_same_source_twice_is_deterministic() {
    let source = "start:\nADD R1 R2 R3\nJUMP start\n";
    assert_eq!(words_of(source), words_of(source));
}
