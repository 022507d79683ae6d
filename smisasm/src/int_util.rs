//! Decimal-only token parsing for register and immediate operands.
//!
//! The teacher assembler's multi-radix (`0x`/`0o`/`0b`) integer literals
//! have no counterpart here: per `getImmediateVal` in
//! `original_source/Assembler/smisasm.c`, SMIS immediates are decimal
//! only.

use smis::constants::{REG_RBP, REG_RLR, REG_RSP, REG_ZR};

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a register token: one of the four literal aliases, or `R`
/// followed by a decimal integer in 0..15.
pub fn parse_register(token: &str) -> Option<u8> {
    match token {
        "RZR" => return Some(REG_ZR),
        "RSP" => return Some(REG_RSP),
        "RBP" => return Some(REG_RBP),
        "RLR" => return Some(REG_RLR),
        _ => {}
    }

    let digits = token.strip_prefix('R')?;
    if !all_digits(digits) {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    if value <= 15 {
        Some(value as u8)
    } else {
        None
    }
}

/// Parses an immediate token: `#` followed by a decimal integer. Range
/// checking against 0..65535 is left to the caller, since an out-of-range
/// value is a semantic error distinct from a malformed token.
pub fn parse_immediate(token: &str) -> Option<u32> {
    let digits = token.strip_prefix('#')?;
    if !all_digits(digits) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aliases_parse_to_their_fixed_numbers() {
        assert_eq!(parse_register("RZR"), Some(0));
        assert_eq!(parse_register("RSP"), Some(15));
        assert_eq!(parse_register("RBP"), Some(14));
        assert_eq!(parse_register("RLR"), Some(13));
    }

    #[test]
    fn numbered_registers_parse_within_range() {
        assert_eq!(parse_register("R0"), Some(0));
        assert_eq!(parse_register("R15"), Some(15));
        assert_eq!(parse_register("R16"), None);
        assert_eq!(parse_register("R"), None);
        assert_eq!(parse_register("Rx"), None);
    }

    #[test]
    fn immediates_are_decimal_only() {
        assert_eq!(parse_immediate("#42"), Some(42));
        assert_eq!(parse_immediate("#0"), Some(0));
        assert_eq!(parse_immediate("#0x2A"), None);
        assert_eq!(parse_immediate("42"), None);
        assert_eq!(parse_immediate("#"), None);
    }
}
