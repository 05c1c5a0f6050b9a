//! Register transfer, load/store, and stack opcodes.

use crate::cpu_6502::{Cpu6502, StatusFlag};
use crate::opcodes::Mode;

/// LDA - Load Accumulator
pub fn lda(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.a = value;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// STA - Store Accumulator
pub fn sta(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let address = cpu.get_operand_address(mode, extra_cycle);
    cpu.write_u8(address, cpu.a);
}

/// LDX - Load X Register
pub fn ldx(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.x = value;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// STX - Store X Register
pub fn stx(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let address = cpu.get_operand_address(mode, extra_cycle);
    cpu.write_u8(address, cpu.x);
}

/// LDY - Load Y Register
pub fn ldy(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.y = value;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// STY - Store Y Register
pub fn sty(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let address = cpu.get_operand_address(mode, extra_cycle);
    cpu.write_u8(address, cpu.y);
}

/// TAX - Transfer Accumulator to X
pub fn tax(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// TXA - Transfer X to Accumulator
pub fn txa(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// TAY - Transfer Accumulator to Y
pub fn tay(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// TYA - Transfer Y to Accumulator
pub fn tya(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// TSX - Transfer Stack Pointer to X
pub fn tsx(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// TXS - Transfer X to Stack Pointer. Unlike every other transfer, this one
/// does not touch the zero or negative flags: S is not a general register.
pub fn txs(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.s = cpu.x;
}

/// PLA - Pull Accumulator from the stack
pub fn pla(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.a = cpu.pull_stack_u8();
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// PHA - Push Accumulator onto the stack
pub fn pha(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.push_stack_u8(cpu.a);
}

/// PLP - Pull Processor Status from the stack. The unused bit always reads
/// back as 1, regardless of what was pushed.
pub fn plp(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.p = cpu.pull_stack_u8() | (StatusFlag::Unused as u8);
}

/// PHP - Push Processor Status onto the stack. The break and unused bits are
/// always pushed as 1, no matter their current value in P.
pub fn php(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    let status = cpu.pushed_status(true);
    cpu.push_stack_u8(status);
}
