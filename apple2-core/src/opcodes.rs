use crate::cpu_6502::opcodes_jump::*;
use crate::cpu_6502::opcodes_logical::*;
use crate::cpu_6502::opcodes_move::*;
use crate::cpu_6502::Cpu6502;

/// The 13 addressing modes documented for the 6502. `Mode::Implicit` also
/// stands in for the catch-all "undefined opcode" case: no operand is
/// fetched, and the associated operation function is a 2-cycle no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Absolute,
    AbsoluteIndexedX,
    AbsoluteIndexedY,
    Accumulator,
    Immediate,
    Implicit,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
}

pub type OperationFn = fn(&mut Cpu6502, Mode, u8);

/// A decoded instruction: its addressing mode, its execute function, the
/// fixed base cycle cost, and whether a page-crossing read through this
/// opcode incurs one additional cycle.
#[derive(Clone, Copy)]
pub struct Decoded {
    pub mode: Mode,
    pub operation: OperationFn,
    pub base_cycles: u8,
    pub extra_cycle: u8,
}

macro_rules! op {
    ($mode:ident, $f:expr, $cycles:expr) => {
        Decoded {
            mode: Mode::$mode,
            operation: $f,
            base_cycles: $cycles,
            extra_cycle: 0,
        }
    };
    ($mode:ident, $f:expr, $cycles:expr, +1) => {
        Decoded {
            mode: Mode::$mode,
            operation: $f,
            base_cycles: $cycles,
            extra_cycle: 1,
        }
    };
}

/// Decode one opcode byte. Bytes that are not one of the 151 documented
/// 6502 opcodes fall through to the catch-all arm: a 2-cycle no-op in
/// `Mode::Implicit`.
///
/// http://www.6502.org/tutorials/6502opcodes.html
/// http://obelisk.me.uk/6502/reference.html
pub fn decode(opcode: u8) -> Decoded {
    match opcode {
        // ---- Load / store ----
        0xA9 => op!(Immediate, lda, 2),
        0xA5 => op!(ZeroPage, lda, 3),
        0xB5 => op!(ZeroPageX, lda, 4),
        0xAD => op!(Absolute, lda, 4),
        0xBD => op!(AbsoluteIndexedX, lda, 4, +1),
        0xB9 => op!(AbsoluteIndexedY, lda, 4, +1),
        0xA1 => op!(IndirectX, lda, 6),
        0xB1 => op!(IndirectY, lda, 5, +1),

        0x85 => op!(ZeroPage, sta, 3),
        0x95 => op!(ZeroPageX, sta, 4),
        0x8D => op!(Absolute, sta, 4),
        0x9D => op!(AbsoluteIndexedX, sta, 5),
        0x99 => op!(AbsoluteIndexedY, sta, 5),
        0x81 => op!(IndirectX, sta, 6),
        0x91 => op!(IndirectY, sta, 6),

        0xA2 => op!(Immediate, ldx, 2),
        0xA6 => op!(ZeroPage, ldx, 3),
        0xB6 => op!(ZeroPageY, ldx, 4),
        0xAE => op!(Absolute, ldx, 4),
        0xBE => op!(AbsoluteIndexedY, ldx, 4, +1),

        0x86 => op!(ZeroPage, stx, 3),
        0x96 => op!(ZeroPageY, stx, 4),
        0x8E => op!(Absolute, stx, 4),

        0xA0 => op!(Immediate, ldy, 2),
        0xA4 => op!(ZeroPage, ldy, 3),
        0xB4 => op!(ZeroPageX, ldy, 4),
        0xAC => op!(Absolute, ldy, 4),
        0xBC => op!(AbsoluteIndexedX, ldy, 4, +1),

        0x84 => op!(ZeroPage, sty, 3),
        0x94 => op!(ZeroPageX, sty, 4),
        0x8C => op!(Absolute, sty, 4),

        0xAA => op!(Implicit, tax, 2),
        0x8A => op!(Implicit, txa, 2),
        0xA8 => op!(Implicit, tay, 2),
        0x98 => op!(Implicit, tya, 2),
        0xBA => op!(Implicit, tsx, 2),
        0x9A => op!(Implicit, txs, 2),
        0x68 => op!(Implicit, pla, 4),
        0x48 => op!(Implicit, pha, 3),
        0x28 => op!(Implicit, plp, 4),
        0x08 => op!(Implicit, php, 3),

        // ---- Logical / arithmetic ----
        0x09 => op!(Immediate, ora, 2),
        0x05 => op!(ZeroPage, ora, 3),
        0x15 => op!(ZeroPageX, ora, 4),
        0x0D => op!(Absolute, ora, 4),
        0x1D => op!(AbsoluteIndexedX, ora, 4, +1),
        0x19 => op!(AbsoluteIndexedY, ora, 4, +1),
        0x01 => op!(IndirectX, ora, 6),
        0x11 => op!(IndirectY, ora, 5, +1),

        0x29 => op!(Immediate, and, 2),
        0x25 => op!(ZeroPage, and, 3),
        0x35 => op!(ZeroPageX, and, 4),
        0x2D => op!(Absolute, and, 4),
        0x3D => op!(AbsoluteIndexedX, and, 4, +1),
        0x39 => op!(AbsoluteIndexedY, and, 4, +1),
        0x21 => op!(IndirectX, and, 6),
        0x31 => op!(IndirectY, and, 5, +1),

        0x49 => op!(Immediate, eor, 2),
        0x45 => op!(ZeroPage, eor, 3),
        0x55 => op!(ZeroPageX, eor, 4),
        0x4D => op!(Absolute, eor, 4),
        0x5D => op!(AbsoluteIndexedX, eor, 4, +1),
        0x59 => op!(AbsoluteIndexedY, eor, 4, +1),
        0x41 => op!(IndirectX, eor, 6),
        0x51 => op!(IndirectY, eor, 5, +1),

        0x69 => op!(Immediate, adc, 2),
        0x65 => op!(ZeroPage, adc, 3),
        0x75 => op!(ZeroPageX, adc, 4),
        0x6D => op!(Absolute, adc, 4),
        0x7D => op!(AbsoluteIndexedX, adc, 4, +1),
        0x79 => op!(AbsoluteIndexedY, adc, 4, +1),
        0x61 => op!(IndirectX, adc, 6),
        0x71 => op!(IndirectY, adc, 5, +1),

        0xE9 => op!(Immediate, sbc, 2),
        0xE5 => op!(ZeroPage, sbc, 3),
        0xF5 => op!(ZeroPageX, sbc, 4),
        0xED => op!(Absolute, sbc, 4),
        0xFD => op!(AbsoluteIndexedX, sbc, 4, +1),
        0xF9 => op!(AbsoluteIndexedY, sbc, 4, +1),
        0xE1 => op!(IndirectX, sbc, 6),
        0xF1 => op!(IndirectY, sbc, 5, +1),

        0xC9 => op!(Immediate, cmp, 2),
        0xC5 => op!(ZeroPage, cmp, 3),
        0xD5 => op!(ZeroPageX, cmp, 4),
        0xCD => op!(Absolute, cmp, 4),
        0xDD => op!(AbsoluteIndexedX, cmp, 4, +1),
        0xD9 => op!(AbsoluteIndexedY, cmp, 4, +1),
        0xC1 => op!(IndirectX, cmp, 6),
        0xD1 => op!(IndirectY, cmp, 5, +1),

        0xE0 => op!(Immediate, cpx, 2),
        0xE4 => op!(ZeroPage, cpx, 3),
        0xEC => op!(Absolute, cpx, 4),

        0xC0 => op!(Immediate, cpy, 2),
        0xC4 => op!(ZeroPage, cpy, 3),
        0xCC => op!(Absolute, cpy, 4),

        0xC6 => op!(ZeroPage, dec, 5),
        0xD6 => op!(ZeroPageX, dec, 6),
        0xCE => op!(Absolute, dec, 6),
        0xDE => op!(AbsoluteIndexedX, dec, 7),
        0xCA => op!(Implicit, dex, 2),
        0x88 => op!(Implicit, dey, 2),

        0xE6 => op!(ZeroPage, inc, 5),
        0xF6 => op!(ZeroPageX, inc, 6),
        0xEE => op!(Absolute, inc, 6),
        0xFE => op!(AbsoluteIndexedX, inc, 7),
        0xE8 => op!(Implicit, inx, 2),
        0xC8 => op!(Implicit, iny, 2),

        0x0A => op!(Accumulator, asl, 2),
        0x06 => op!(ZeroPage, asl, 5),
        0x16 => op!(ZeroPageX, asl, 6),
        0x0E => op!(Absolute, asl, 6),
        0x1E => op!(AbsoluteIndexedX, asl, 7),

        0x2A => op!(Accumulator, rol, 2),
        0x26 => op!(ZeroPage, rol, 5),
        0x36 => op!(ZeroPageX, rol, 6),
        0x2E => op!(Absolute, rol, 6),
        0x3E => op!(AbsoluteIndexedX, rol, 7),

        0x4A => op!(Accumulator, lsr, 2),
        0x46 => op!(ZeroPage, lsr, 5),
        0x56 => op!(ZeroPageX, lsr, 6),
        0x4E => op!(Absolute, lsr, 6),
        0x5E => op!(AbsoluteIndexedX, lsr, 7),

        0x6A => op!(Accumulator, ror, 2),
        0x66 => op!(ZeroPage, ror, 5),
        0x76 => op!(ZeroPageX, ror, 6),
        0x6E => op!(Absolute, ror, 6),
        0x7E => op!(AbsoluteIndexedX, ror, 7),

        // ---- Jump / flag ----
        0x10 => op!(Relative, bpl, 2, +1),
        0x30 => op!(Relative, bmi, 2, +1),
        0x50 => op!(Relative, bvc, 2, +1),
        0x70 => op!(Relative, bvs, 2, +1),
        0x90 => op!(Relative, bcc, 2, +1),
        0xB0 => op!(Relative, bcs, 2, +1),
        0xD0 => op!(Relative, bne, 2, +1),
        0xF0 => op!(Relative, beq, 2, +1),

        0x00 => op!(Implicit, brk, 7),
        0x40 => op!(Implicit, rti, 6),
        0x20 => op!(Absolute, jsr, 6),
        0x60 => op!(Implicit, rts, 6),
        0x4C => op!(Absolute, jmp, 3),
        0x6C => op!(Indirect, jmp, 5),

        0x24 => op!(ZeroPage, bit, 3),
        0x2C => op!(Absolute, bit, 4),

        0x18 => op!(Implicit, clc, 2),
        0x38 => op!(Implicit, sec, 2),
        0xD8 => op!(Implicit, cld, 2),
        0xF8 => op!(Implicit, sed, 2),
        0x58 => op!(Implicit, cli, 2),
        0x78 => op!(Implicit, sei, 2),
        0xB8 => op!(Implicit, clv, 2),
        0xEA => op!(Implicit, nop, 2),

        // Everything else is undocumented on a 6502. Treat it as a 2-cycle no-op.
        _ => op!(Implicit, nop, 2),
    }
}
