#![macro_use]

use crate::bus::{Bus, LanguageCardKind};
use crate::cpu_6502::*;

pub const P: u8 = RESET_STATUS_FLAG;
pub const C: u8 = StatusFlag::Carry as u8;
pub const Z: u8 = StatusFlag::Zero as u8;
pub const I: u8 = StatusFlag::InterruptDisable as u8;
pub const D: u8 = StatusFlag::Decimal as u8;
pub const B: u8 = StatusFlag::Break as u8;
pub const T: u8 = StatusFlag::Unused as u8;
pub const V: u8 = StatusFlag::Overflow as u8;
pub const N: u8 = StatusFlag::Negative as u8;

/// Where test programs are loaded. Chosen to sit well clear of the zero
/// page and the hardware stack, so tests that exercise PHA/JSR don't
/// clobber their own program bytes.
const START: u16 = 0x0300;

/// Load `bytes` into RAM at `START`, point the program counter at it, and
/// run until the program counter leaves that span. There is no assembler
/// in this crate — test programs are written directly as opcode bytes —
/// so unlike the teacher's `run_program`, this takes raw bytes rather than
/// assembly text.
pub fn run_bytes(bytes: &[u8]) -> Cpu6502 {
    let bus = Bus::new_shared_bus(LanguageCardKind::None);
    {
        let mut bus_mut = bus.borrow_mut();
        for (offset, byte) in bytes.iter().enumerate() {
            bus_mut.ram_mut()[START as usize + offset] = *byte;
        }
    }
    let mut cpu = Cpu6502::new(bus);
    cpu.pc = START;
    let end = START + bytes.len() as u16;
    while cpu.pc < end {
        cpu.tick();
    }
    cpu
}

/// Run two's complement on a u8.
pub fn negative(n: u8) -> u8 {
    !n + 1
}

pub fn assert_register_a(bytes: &[u8], value: u8, status: u8) {
    let cpu = run_bytes(bytes);
    if cpu.a != value {
        panic!(
            "\n{:?}\nExpected register A to be {:#x} ({:#b}) but it was {:#x} ({:#b})",
            bytes, value, value, cpu.a, cpu.a
        );
    }
    assert_status(&cpu, status);
}

pub fn assert_register_x(bytes: &[u8], value: u8, status: u8) {
    let cpu = run_bytes(bytes);
    if cpu.x != value {
        panic!(
            "\n{:?}\nExpected register X to be {:#x} ({:#b}) but it was {:#x} ({:#b})",
            bytes, value, value, cpu.x, cpu.x
        );
    }
    assert_status(&cpu, status);
}

pub fn assert_register_y(bytes: &[u8], value: u8, status: u8) {
    let cpu = run_bytes(bytes);
    if cpu.y != value {
        panic!(
            "\n{:?}\nExpected register Y to be {:#x} ({:#b}) but it was {:#x} ({:#b})",
            bytes, value, value, cpu.y, cpu.y
        );
    }
    assert_status(&cpu, status);
}

pub fn assert_status(cpu: &Cpu6502, value: u8) {
    let mut result = String::new();

    let expected_carry = value & StatusFlag::Carry as u8 == StatusFlag::Carry as u8;
    let expected_zero = value & StatusFlag::Zero as u8 == StatusFlag::Zero as u8;
    let expected_interruptdisable =
        value & StatusFlag::InterruptDisable as u8 == StatusFlag::InterruptDisable as u8;
    let expected_decimal = value & StatusFlag::Decimal as u8 == StatusFlag::Decimal as u8;
    let expected_overflow = value & StatusFlag::Overflow as u8 == StatusFlag::Overflow as u8;
    let expected_negative = value & StatusFlag::Negative as u8 == StatusFlag::Negative as u8;

    let actual_carry = cpu.is_status_flag_set(StatusFlag::Carry);
    let actual_zero = cpu.is_status_flag_set(StatusFlag::Zero);
    let actual_interruptdisable = cpu.is_status_flag_set(StatusFlag::InterruptDisable);
    let actual_decimal = cpu.is_status_flag_set(StatusFlag::Decimal);
    let actual_overflow = cpu.is_status_flag_set(StatusFlag::Overflow);
    let actual_negative = cpu.is_status_flag_set(StatusFlag::Negative);

    if expected_carry != actual_carry {
        result.push_str(&format!(
            "Expected StatusFlag::Carry to be {} but received {}\n",
            expected_carry, actual_carry
        ));
    }
    if expected_zero != actual_zero {
        result.push_str(&format!(
            "Expected StatusFlag::Zero to be {} but received {}\n",
            expected_zero, actual_zero
        ));
    }
    if expected_interruptdisable != actual_interruptdisable {
        result.push_str(&format!(
            "Expected StatusFlag::InterruptDisable to be {} but received {}\n",
            expected_interruptdisable, actual_interruptdisable
        ));
    }
    if expected_decimal != actual_decimal {
        result.push_str(&format!(
            "Expected StatusFlag::Decimal to be {} but received {}\n",
            expected_decimal, actual_decimal
        ));
    }
    if expected_overflow != actual_overflow {
        result.push_str(&format!(
            "Expected StatusFlag::Overflow to be {} but received {}\n",
            expected_overflow, actual_overflow
        ));
    }
    if expected_negative != actual_negative {
        result.push_str(&format!(
            "Expected StatusFlag::Negative to be {} but received {}\n",
            expected_negative, actual_negative
        ));
    }

    // The unused bit always reads back as 1, and Break is only meaningful on
    // a byte pushed to the stack, not on the live P register, so neither is
    // compared against the live register here.
    let mask = !(StatusFlag::Unused as u8) & !(StatusFlag::Break as u8);
    if (cpu.p & mask) != (value & mask) {
        panic!(
            "\nExpected cpu status 0b{:08b} to match 0b{:08b}\n{}",
            cpu.p, value, result
        );
    }
}

#[macro_export]
macro_rules! register_a {
    ($name:ident, $a:expr, $p:expr, $bytes:expr) => {
        #[test]
        pub fn $name() {
            assert_register_a($bytes, $a, $p);
        }
    };
}

#[macro_export]
macro_rules! register_x {
    ($name:ident, $x:expr, $p:expr, $bytes:expr) => {
        #[test]
        fn $name() {
            assert_register_x($bytes, $x, $p);
        }
    };
}

#[macro_export]
macro_rules! register_y {
    ($name:ident, $y:expr, $p:expr, $bytes:expr) => {
        #[test]
        fn $name() {
            assert_register_y($bytes, $y, $p);
        }
    };
}

#[macro_export]
macro_rules! zero_page {
    ($name:ident, [$addr:expr, $expected:expr], $bytes:expr) => {
        #[test]
        fn $name() {
            let cpu = run_bytes($bytes);
            let actual = cpu.bus.borrow_mut().read_u8($addr);
            if actual != $expected {
                panic!(
                    "\n{:?}\nExpected zero page address {:#x} to contain {:#x} ({:#b}) but it was {:#x} ({:#b})",
                    $bytes, $addr, $expected, $expected, actual, actual
                );
            }
        }
    };
}

#[macro_export]
macro_rules! status {
    ($name:ident, $p:expr, $bytes:expr) => {
        #[test]
        fn $name() {
            let cpu = run_bytes($bytes);
            assert_status(&cpu, $p);
        }
    };
}
