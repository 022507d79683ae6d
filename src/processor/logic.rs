use super::Flags;
use crate::instructions::{field_imm16, field_opcode, field_reg_a, field_reg_b, field_reg_c};
use crate::instructions::{opcode_from_u8, Form, Opcode};
use crate::memory::StorageMut;
use crate::register::RegisterFile;
use crate::processor::ExitCode;

/// What the run loop should do after one executed instruction.
pub enum TickResult {
    /// Continue at the next sequential address.
    Next,
    /// Continue at an absolute target address.
    Jump(u16),
    /// Stop the emulator.
    Stop(ExitCode),
}

/// Decodes and executes a single instruction word. Pure function: all
/// machine state is threaded through explicitly, none of it lives in a
/// global.
///
/// `pc` is the program counter value *after* the fetch-phase increment,
/// which is exactly the value `JUMP-LINK` must store into RLR.
pub fn tick(
    registers: &mut RegisterFile,
    memory: &mut dyn StorageMut,
    flags: &mut Flags,
    instruction: u32,
    pc: u16,
) -> TickResult {
    let opcode = match opcode_from_u8(field_opcode(instruction)) {
        Some(opcode) => opcode,
        None => return TickResult::Stop(ExitCode::InvalidOpcode),
    };

    let reg_a = field_reg_a(instruction);
    let reg_b = field_reg_b(instruction);
    let reg_c = field_reg_c(instruction);
    let imm16 = field_imm16(instruction);

    match opcode.form() {
        Form::Halt => TickResult::Stop(ExitCode::Halted),

        Form::Set => {
            registers.set(reg_a, imm16);
            TickResult::Next
        }

        Form::CopyNot => {
            let src = registers.get(reg_b);
            let value = match opcode {
                Opcode::COPY => src,
                Opcode::NOT => !src,
                _ => unreachable!("CopyNot form is only COPY and NOT"),
            };
            registers.set(reg_a, value);
            if opcode == Opcode::NOT {
                flags.set_from_result(value);
            }
            TickResult::Next
        }

        Form::Compare => {
            let a = registers.get(reg_b);
            let b = registers.get(reg_c);
            flags.set_from_result(a.wrapping_sub(b));
            TickResult::Next
        }

        Form::CompareImm => {
            let a = registers.get(reg_b);
            flags.set_from_result(a.wrapping_sub(imm16));
            TickResult::Next
        }

        Form::R => {
            let a = registers.get(reg_b);
            let b = registers.get(reg_c);
            match alu(opcode, a, b) {
                Ok(result) => {
                    registers.set(reg_a, result);
                    flags.set_from_result(result);
                    TickResult::Next
                }
                Err(exit_code) => TickResult::Stop(exit_code),
            }
        }

        Form::I => match opcode {
            Opcode::LOAD => {
                let base = registers.get(reg_b);
                let address = base.wrapping_add(imm16);
                let value = memory.read_word(address);
                registers.set(reg_a, value);
                TickResult::Next
            }
            Opcode::STORE => {
                let base = registers.get(reg_b);
                let address = base.wrapping_add(imm16);
                let value = registers.get(reg_a);
                memory.write_word(address, value);
                TickResult::Next
            }
            _ => {
                let a = registers.get(reg_b);
                match alu(opcode, a, imm16) {
                    Ok(result) => {
                        registers.set(reg_a, result);
                        flags.set_from_result(result);
                        TickResult::Next
                    }
                    Err(exit_code) => TickResult::Stop(exit_code),
                }
            }
        },

        Form::J => {
            let target = imm16;
            match opcode {
                Opcode::JUMP => TickResult::Jump(target),
                Opcode::JumpIfZero => {
                    if flags.zf {
                        TickResult::Jump(target)
                    } else {
                        TickResult::Next
                    }
                }
                Opcode::JumpIfNotZero => {
                    if !flags.zf {
                        TickResult::Jump(target)
                    } else {
                        TickResult::Next
                    }
                }
                Opcode::JumpLink => {
                    registers.set(crate::constants::REG_RLR, pc);
                    TickResult::Jump(target)
                }
                _ => unreachable!("J form is only the four jump opcodes"),
            }
        }
    }
}

/// Shared arithmetic/logic core for both the R-type (register, register)
/// and I-type (register, immediate) variants of the same operation:
/// the right-hand operand is already resolved to a plain `u16` by the
/// caller, so ADD and ADD-IMM share this one implementation.
fn alu(opcode: Opcode, a: u16, b: u16) -> Result<u16, ExitCode> {
    Ok(match opcode {
        Opcode::ADD | Opcode::AddImm => a.wrapping_add(b),
        Opcode::SUBTRACT | Opcode::SubtractImm => a.wrapping_sub(b),
        Opcode::MULTIPLY | Opcode::MultiplyImm => a.wrapping_mul(b),
        Opcode::DIVIDE | Opcode::DivideImm => {
            if b == 0 {
                return Err(ExitCode::DivisionByZero);
            }
            a.wrapping_div(b)
        }
        Opcode::MODULO | Opcode::ModuloImm => {
            if b == 0 {
                return Err(ExitCode::DivisionByZero);
            }
            a.wrapping_rem(b)
        }
        // The register-operand form masks the shift amount to 5 bits
        // before the >=16-yields-zero rule applies (so e.g. a shift
        // amount of 32, whose bottom 5 bits are 0, is a no-op shift
        // rather than a zeroing one); the immediate form uses the
        // immediate directly.
        Opcode::ShiftLeft => shift_left(a, b & 0x1F),
        Opcode::ShiftLeftImm => shift_left(a, b),
        Opcode::ShiftRight => shift_right(a, b & 0x1F),
        Opcode::ShiftRightImm => shift_right(a, b),
        Opcode::AND | Opcode::AndImm => a & b,
        Opcode::OR | Opcode::OrImm => a | b,
        Opcode::XOR | Opcode::XorImm => a ^ b,
        Opcode::NAND | Opcode::NandImm => !(a & b),
        Opcode::NOR | Opcode::NorImm => !(a | b),
        _ => unreachable!("alu() is only called for R and I arithmetic/logic forms"),
    })
}

/// Shifts by 16 or more yield zero; a `u16 << 16` would otherwise be
/// undefined behavior in Rust, so the bound is checked explicitly.
fn shift_left(value: u16, amount: u16) -> u16 {
    if amount >= 16 {
        0
    } else {
        value << amount
    }
}

fn shift_right(value: u16, amount: u16) -> u16 {
    if amount >= 16 {
        0
    } else {
        value >> amount
    }
}
