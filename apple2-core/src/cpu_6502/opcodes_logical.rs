//! Arithmetic, comparison, and shift/rotate opcodes.

use crate::cpu_6502::{Cpu6502, StatusFlag};
use crate::opcodes::Mode;

/// Binary addition with carry, plus the BCD correction used when the decimal
/// flag is set. ADC and SBC both bottom out here; SBC pre-massages its
/// operand (one's complement, and a decimal pre-subtraction) so that it can
/// share this routine with ADC.
///
/// The BCD correction is the folded bit-twiddling form rather than a
/// nibble-by-nibble adjustment: it produces the same result with no
/// branching on the low/high nibble.
fn add_with_carry(cpu: &mut Cpu6502, operand: u8) {
    let carry_in = cpu.get_carry() as u16;
    let binary_sum: u16 = cpu.a as u16 + operand as u16 + carry_in;

    // V reflects the binary sum even in decimal mode; this is a well known
    // quirk of the NMOS 6502's decimal mode. Z and N, however, reflect the
    // final (BCD-corrected) accumulator.
    cpu.update_overflow_flag(operand, binary_sum as u8);

    let mut result16 = binary_sum;
    if cpu.is_status_flag_set(StatusFlag::Decimal) {
        result16 = result16.wrapping_add(
            (((result16.wrapping_add(0x66)) ^ cpu.a as u16 ^ operand as u16) >> 3 & 0x22) * 3,
        );
    }
    cpu.update_carry_flag(result16);
    cpu.set_status_flag(StatusFlag::Zero, result16 as u8 == 0);
    cpu.set_status_flag(StatusFlag::Negative, result16 as u8 & 0x80 != 0);
    cpu.a = result16 as u8;
}

/// ADC - Add with Carry
pub fn adc(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, operand) = cpu.get_address_and_operand(mode, extra_cycle);
    add_with_carry(cpu, operand);
}

/// SBC - Subtract with Carry
pub fn sbc(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, raw_operand) = cpu.get_address_and_operand(mode, extra_cycle);
    let mut operand = raw_operand ^ 0xFF;
    if cpu.is_status_flag_set(StatusFlag::Decimal) {
        operand = operand.wrapping_sub(0x66);
    }
    add_with_carry(cpu, operand);
}

/// ORA - Logical Inclusive OR
pub fn ora(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.a |= value;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// AND - Logical AND
pub fn and(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.a &= value;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// EOR - Exclusive OR
pub fn eor(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    cpu.a ^= value;
    cpu.update_zero_and_negative_flag(cpu.a);
}

fn compare(cpu: &mut Cpu6502, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    cpu.set_status_flag(StatusFlag::Carry, register >= value);
    cpu.set_status_flag(StatusFlag::Zero, register == value);
    cpu.set_status_flag(StatusFlag::Negative, result & 0x80 != 0);
}

/// CMP - Compare Accumulator
pub fn cmp(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    compare(cpu, cpu.a, value);
}

/// CPX - Compare X Register
pub fn cpx(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    compare(cpu, cpu.x, value);
}

/// CPY - Compare Y Register
pub fn cpy(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (_, value) = cpu.get_address_and_operand(mode, extra_cycle);
    compare(cpu, cpu.y, value);
}

/// DEC - Decrement Memory
pub fn dec(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, value) = cpu.get_address_and_operand(mode, extra_cycle);
    let result = value.wrapping_sub(1);
    cpu.write_u8(address, result);
    cpu.update_zero_and_negative_flag(result);
}

/// DEX - Decrement X Register
pub fn dex(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// DEY - Decrement Y Register
pub fn dey(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// INC - Increment Memory
pub fn inc(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, value) = cpu.get_address_and_operand(mode, extra_cycle);
    let result = value.wrapping_add(1);
    cpu.write_u8(address, result);
    cpu.update_zero_and_negative_flag(result);
}

/// INX - Increment X Register
pub fn inx(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// INY - Increment Y Register
pub fn iny(cpu: &mut Cpu6502, _mode: Mode, _extra_cycle: u8) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// ASL - Arithmetic Shift Left
pub fn asl(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, operand) = cpu.get_address_and_maybe_operand(mode, extra_cycle);
    let result = operand << 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x80 != 0);
    cpu.update_zero_and_negative_flag(result);
    match address {
        Some(address) => cpu.write_u8(address, result),
        None => cpu.a = result,
    }
}

/// ROL - Rotate Left
pub fn rol(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, operand) = cpu.get_address_and_maybe_operand(mode, extra_cycle);
    let carry_in = cpu.get_carry();
    let result = (operand << 1) | carry_in;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x80 != 0);
    cpu.update_zero_and_negative_flag(result);
    match address {
        Some(address) => cpu.write_u8(address, result),
        None => cpu.a = result,
    }
}

/// LSR - Logical Shift Right
pub fn lsr(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, operand) = cpu.get_address_and_maybe_operand(mode, extra_cycle);
    let result = operand >> 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x01 != 0);
    cpu.update_zero_and_negative_flag(result);
    match address {
        Some(address) => cpu.write_u8(address, result),
        None => cpu.a = result,
    }
}

/// ROR - Rotate Right
pub fn ror(cpu: &mut Cpu6502, mode: Mode, extra_cycle: u8) {
    let (address, operand) = cpu.get_address_and_maybe_operand(mode, extra_cycle);
    let carry_in = cpu.get_carry();
    let result = (operand >> 1) | (carry_in << 7);
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x01 != 0);
    cpu.update_zero_and_negative_flag(result);
    match address {
        Some(address) => cpu.write_u8(address, result),
        None => cpu.a = result,
    }
}
