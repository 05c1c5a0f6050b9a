//! Runs Klaus Dormann's 6502 functional test suite
//! (https://github.com/Klaus2m5/6502_functional_tests) against the CPU.
//! It exercises every documented opcode and addressing mode far more
//! thoroughly than the hand-written unit tests in `cpu_6502::test` can, by
//! running until it either traps in the success loop at $3469 or gets
//! stuck anywhere else (a failure, since the binary is itself built to
//! self-check and loop in place the moment something is wrong).
//!
//! Not vendored: point `AD2_6502_FUNCTIONAL_TEST` at a local copy of the
//! assembled `6502_functional_test.bin` (load address $0000) to run it.
//!
//! `cargo test --test functional_test -- --ignored`

use apple2_core::bus::LanguageCardKind;
use apple2_core::machine::Machine;
use std::env;
use std::fs;

const LOAD_ADDRESS: u16 = 0x0000;
const START_ADDRESS: u16 = 0x0400;
const SUCCESS_ADDRESS: u16 = 0x3469;

#[test]
#[ignore]
fn klaus_dormann_functional_test() {
    let path = env::var("AD2_6502_FUNCTIONAL_TEST")
        .expect("set AD2_6502_FUNCTIONAL_TEST to the path of 6502_functional_test.bin");
    let image = fs::read(&path).expect("failed to read the functional test binary");

    let mut machine = Machine::new(LanguageCardKind::None);
    {
        let bus = machine.bus.clone();
        let mut bus = bus.borrow_mut();
        let ram = bus.ram_mut();
        for (offset, byte) in image.iter().enumerate() {
            ram[LOAD_ADDRESS as usize + offset] = *byte;
        }
    }
    machine.goto(START_ADDRESS);

    let mut previous_pc = machine.cpu.pc;
    loop {
        machine.exec(1000);
        let pc = machine.cpu.pc;
        if pc == SUCCESS_ADDRESS {
            break;
        }
        if pc == previous_pc {
            panic!(
                "trapped at ${:04x} instead of the success address ${:04x}",
                pc, SUCCESS_ADDRESS
            );
        }
        previous_pc = pc;
    }
}
