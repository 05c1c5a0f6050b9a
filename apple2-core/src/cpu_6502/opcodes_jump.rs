//! Branch, jump, subroutine, interrupt-return, and flag opcodes.

use crate::constants::InterruptVectors;
use crate::cpu_6502::{Cpu6502, StatusFlag};
use crate::opcodes::Mode;

/// Shared branch logic. `condition` is the test for this specific branch
/// opcode (e.g. the zero flag for BEQ). A taken branch costs one extra
/// cycle, plus a further cycle if it crosses a page boundary; a branch not
/// taken still has to consume its one-byte operand.
fn branch(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8, condition: bool) {
    if condition {
        cpu.bump_cycles(1);
        let address = cpu.get_operand_address(mode, extra_cycle);
        cpu.pc = address;
    } else {
        cpu.next_u8();
    }
}

/// BPL - Branch if Positive
pub fn bpl(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, !cpu.is_status_flag_set(StatusFlag::Negative));
}

/// BMI - Branch if Minus
pub fn bmi(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, cpu.is_status_flag_set(StatusFlag::Negative));
}

/// BVC - Branch if Overflow Clear
pub fn bvc(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, !cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// BVS - Branch if Overflow Set
pub fn bvs(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// BCC - Branch if Carry Clear
pub fn bcc(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, !cpu.is_status_flag_set(StatusFlag::Carry));
}

/// BCS - Branch if Carry Set
pub fn bcs(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, cpu.is_status_flag_set(StatusFlag::Carry));
}

/// BNE - Branch if Not Equal
pub fn bne(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, !cpu.is_status_flag_set(StatusFlag::Zero));
}

/// BEQ - Branch if Equal
pub fn beq(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    branch(cpu, mode, extra_cycle, cpu.is_status_flag_set(StatusFlag::Zero));
}

/// BRK - Force Interrupt. Pushes PC+1 (already advanced past the one-byte
/// opcode, then skipping the signature byte that follows it) and status
/// with the break bit set, then jumps through the IRQ/BRK vector.
pub fn brk(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    let status = cpu.pushed_status(true);
    cpu.push_stack_u16(cpu.pc.wrapping_add(1));
    cpu.push_stack_u8(status);
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
    cpu.set_status_flag(StatusFlag::Decimal, false);
    cpu.pc = cpu.read_vector(InterruptVectors::IrqBrkVector);
}

/// RTI - Return from Interrupt. The unused bit of the restored status
/// always reads back as 1; the break bit is whatever was on the stack.
pub fn rti(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.p = cpu.pull_stack_u8() | (StatusFlag::Unused as u8);
    cpu.pc = cpu.pull_stack_u16();
}

/// JSR - Jump to Subroutine. Pushes the address of the last byte of the
/// JSR instruction, not the address of the next instruction; RTS adds the
/// missing 1 back.
pub fn jsr(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let address = cpu.get_operand_address(mode, extra_cycle);
    cpu.push_stack_u16(cpu.pc.wrapping_sub(1));
    cpu.pc = address;
}

/// RTS - Return from Subroutine
pub fn rts(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    let address = cpu.pull_stack_u16();
    cpu.pc = address.wrapping_add(1);
}

/// JMP - Jump. In `Mode::Indirect` this inherits the page-wrap bug baked
/// into `get_operand_address`.
pub fn jmp(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    cpu.pc = cpu.get_operand_address(mode, extra_cycle);
}

/// BIT - Bit Test. Zero comes from A & M; Negative and Overflow come
/// straight from bits 7 and 6 of the memory operand, not from the AND.
pub fn bit(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.set_status_flag(StatusFlag::Zero, (cpu.a & value) == 0);
    cpu.set_status_flag(StatusFlag::Negative, value & 0x80 != 0);
    cpu.set_status_flag(StatusFlag::Overflow, value & 0x40 != 0);
}

/// CLC - Clear Carry Flag
pub fn clc(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::Carry, false);
}

/// SEC - Set Carry Flag
pub fn sec(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::Carry, true);
}

/// CLD - Clear Decimal Mode
pub fn cld(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::Decimal, false);
}

/// SED - Set Decimal Flag
pub fn sed(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::Decimal, true);
}

/// CLI - Clear Interrupt Disable
pub fn cli(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, false);
}

/// SEI - Set Interrupt Disable
pub fn sei(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
}

/// CLV - Clear Overflow Flag
pub fn clv(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.set_status_flag(StatusFlag::Overflow, false);
}

/// NOP - No Operation. Also stands in for every undocumented opcode byte.
pub fn nop(_cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {}
