use crate::bus::SharedBus;
use crate::constants::{memory_range, InterruptVectors};
use crate::opcodes::{self, Mode};

pub mod opcodes_jump;
pub mod opcodes_logical;
pub mod opcodes_move;

#[cfg(test)]
mod test_helpers;

// Test must be after test_helpers, rust format tries to move things around.
#[cfg(test)]
mod test;

pub const RESET_STATUS_FLAG: u8 = 0b0011_0100;

#[rustfmt::skip]
pub enum StatusFlag {
  Carry            = 0b0000_0001,
  Zero             = 0b0000_0010,
  InterruptDisable = 0b0000_0100,
  Decimal          = 0b0000_1000,
  Break            = 0b0001_0000,
  Unused           = 0b0010_0000,
  Overflow         = 0b0100_0000,
  Negative         = 0b1000_0000,
}

/// This struct implements the MOS Technology 6502 central processing unit, as
/// wired into an Apple II Plus: no decimal-mode lockout, no RDY line, and the
/// memory-mapped behavior of the address space lives entirely on the far side
/// of `bus`.
///
/// http://www.6502.org/
/// https://en.wikipedia.org/wiki/MOS_Technology_6502
/// http://wiki.nesdev.com/w/index.php/CPU
pub struct Cpu6502 {
    // The bus is what holds all the memory access for the program.
    pub bus: SharedBus,
    // "A" register - The accumulator. Typical results of operations are stored here.
    // In combination with the status register, supports using the status register for
    // carrying, overflow detection, and so on.
    pub a: u8,
    /// "X" register.
    /// Used for several addressing modes. They can be used as loop counters easily, using
    /// INC/DEC and branch instructions. Not being the accumulator, they have limited
    /// addressing modes themselves when loading and saving.
    pub x: u8,
    /// "Y" register.
    pub y: u8,

    /// "PC" - Program counter.
    pub pc: u16,

    /// "S" - Stack pointer.
    ///
    /// The 6502 has hardware support for a stack implemented using a 256-byte array
    /// whose location is hardcoded at page 0x01 (0x0100-0x01FF), using the S register
    /// for a stack pointer. The 6502 uses a descending stack (it grows downwards).
    /// https://wiki.nesdev.com/w/index.php/Stack
    pub s: u8,

    /// "P" - Status register.
    ///
    /// http://wiki.nesdev.com/w/index.php/Status_flags
    ///
    ///   7  bit  0
    /// ---- ----
    /// NVUB DIZC
    /// |||| ||||
    /// |||| |||+- Carry
    /// |||| ||+-- Zero
    /// |||| |+--- Interrupt Disable
    /// |||| +---- Decimal
    /// |||+------ Break (only meaningful on the byte pushed by BRK/PHP)
    /// ||+------- Unused, always reads back as 1
    /// |+-------- Overflow
    /// +--------- Negative
    pub p: u8,

    /// Monotonic count of clock cycles the CPU has executed since `new()`. Never
    /// reset; `exec` compares against this to know when its budget is spent.
    pub cycles: u64,
}

impl Cpu6502 {
    pub fn new(bus: SharedBus) -> Cpu6502 {
        let pc = bus
            .borrow_mut()
            .read_u16(InterruptVectors::ResetVector as u16);

        Cpu6502 {
            bus,
            a: 0,
            x: 0,
            y: 0,
            pc,
            s: 0xFF,
            p: RESET_STATUS_FLAG,
            cycles: 0,
        }
    }

    /// Increment the program counter and read the next u8 value following
    /// the current pc.
    fn next_u8(&mut self) -> u8 {
        let value = self.bus.borrow_mut().read_u8(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Increment the program counter and read the next u16 value following
    /// the current pc.
    fn next_u16(&mut self) -> u16 {
        let value = self.bus.borrow_mut().read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    fn read_u8(&mut self, addr: u16) -> u8 {
        self.bus.borrow_mut().read_u8(addr)
    }

    fn write_u8(&mut self, addr: u16, value: u8) {
        self.bus.borrow_mut().write_u8(addr, value);
    }

    fn read_vector(&mut self, vector: InterruptVectors) -> u16 {
        self.bus.borrow_mut().read_u16(vector as u16)
    }

    /// Dereference a 16-bit pointer with the 6502's famous JMP ($xxFF) bug:
    /// the high byte is fetched from the start of the *same* page as the low
    /// byte, rather than the start of the next one.
    fn read_u16_bugged(&mut self, pointer: u16) -> u16 {
        let lo = self.read_u8(pointer) as u16;
        let hi_address = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
        let hi = self.read_u8(hi_address) as u16;
        lo | (hi << 8)
    }

    /// Run the CPU for at least `budget` cycles, always completing the
    /// instruction in progress, and return the resulting program counter.
    pub fn exec(&mut self, budget: u64) -> u16 {
        let target = self.cycles.wrapping_add(budget);
        while self.cycles < target {
            self.tick();
        }
        self.pc
    }

    /// The source for the comments on the modes is coming from:
    /// http://www.emulator101.com/6502-addressing-modes.html
    fn get_operand_address(&mut self, mode: Mode, page_boundary_cycle: u8) -> u16 {
        match mode {
            // Absolute addressing specifies the memory location explicitly in the two bytes
            // following the opcode.
            Mode::Absolute => self.next_u16(),
            Mode::AbsoluteIndexedX => {
                let base_address = self.next_u16();
                let offset_address = base_address.wrapping_add(self.x as u16);
                self.incur_extra_cycle_on_page_boundary(
                    base_address,
                    offset_address,
                    page_boundary_cycle,
                );
                offset_address
            }
            Mode::AbsoluteIndexedY => {
                let base_address = self.next_u16();
                let offset_address = base_address.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(
                    base_address,
                    offset_address,
                    page_boundary_cycle,
                );
                offset_address
            }
            Mode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            Mode::Implicit => {
                panic!("Attempting to get the operand address for an implicit-mode opcode.")
            }
            Mode::Accumulator => {
                panic!("The accumulator has no address.")
            }
            // The pointer dereference carries the page-wrap hardware bug; only
            // JMP uses this mode, so the bug is only ever observable there.
            Mode::Indirect => {
                let pointer = self.next_u16();
                self.read_u16_bugged(pointer)
            }
            // Both halves of the pointer wrap within the zero page.
            Mode::IndirectX => {
                let zp = self.next_u8().wrapping_add(self.x);
                let lo = self.read_u8(zp as u16) as u16;
                let hi = self.read_u8(zp.wrapping_add(1) as u16) as u16;
                lo | (hi << 8)
            }
            // Only the pointer fetch wraps within the zero page; the sum with Y
            // is free to cross into the next page.
            Mode::IndirectY => {
                let zp = self.next_u8();
                let lo = self.read_u8(zp as u16) as u16;
                let hi = self.read_u8(zp.wrapping_add(1) as u16) as u16;
                let base_address = lo | (hi << 8);
                let offset_address = base_address.wrapping_add(self.y as u16);
                self.incur_extra_cycle_on_page_boundary(
                    base_address,
                    offset_address,
                    page_boundary_cycle,
                );
                offset_address
            }
            // Relative addressing is only used for branch operations. The byte
            // after the opcode is a signed branch offset.
            Mode::Relative => {
                let relative_offset = self.next_u8() as i8;
                let base_address = self.pc;
                let offset_address = base_address.wrapping_add(relative_offset as u16);
                self.incur_extra_cycle_on_page_boundary(
                    base_address,
                    offset_address,
                    page_boundary_cycle,
                );
                offset_address
            }
            Mode::ZeroPage => self.next_u8() as u16,
            // 6502 bug: zero-page indexing never leaves the zero page, even if
            // the addition overflows a u8.
            Mode::ZeroPageX => (self.next_u8().wrapping_add(self.x)) as u16,
            Mode::ZeroPageY => (self.next_u8().wrapping_add(self.y)) as u16,
        }
    }

    fn get_address_and_maybe_operand(
        &mut self,
        mode: Mode,
        extra_cycle: u8,
    ) -> (Option<u16>, u8) {
        if mode == Mode::Accumulator {
            return (None, self.a);
        }
        let address = self.get_operand_address(mode, extra_cycle);
        let value = self.read_u8(address);
        (Some(address), value)
    }

    fn get_address_and_operand(&mut self, mode: Mode, extra_cycle: u8) -> (u16, u8) {
        let address = self.get_operand_address(mode, extra_cycle);
        let value = self.read_u8(address);
        (address, value)
    }

    fn incur_extra_cycle_on_page_boundary(
        &mut self,
        base_address: u16,
        offset_address: u16,
        extra_cycles: u8,
    ) {
        let [_, base_page] = base_address.to_le_bytes();
        let [_, offset_page] = offset_address.to_le_bytes();
        if base_page != offset_page {
            self.bump_cycles(extra_cycles as u64);
        }
    }

    /// Advance the cycle counter and mirror it onto the bus, which needs its
    /// own view of elapsed cycles for paddle decay and speaker-click timing.
    pub(crate) fn bump_cycles(&mut self, extra: u64) {
        self.cycles = self.cycles.wrapping_add(extra);
        self.bus.borrow_mut().cycles = self.cycles;
    }

    /// Execute exactly one instruction.
    pub fn tick(&mut self) {
        let opcode = self.next_u8();
        let decoded = opcodes::decode(opcode);

        self.bump_cycles(decoded.base_cycles as u64);
        (decoded.operation)(self, decoded.mode, decoded.extra_cycle);
    }

    /// These flags are commonly set together.
    fn update_zero_and_negative_flag(&mut self, value: u8) {
        self.set_status_flag(StatusFlag::Zero, value == 0);
        self.set_status_flag(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    /// ADC and SBC operate on 9 bits. 8 of them are the register A, while the last bit
    /// is the carry flag. Store this 9th bit onto the status flag.
    fn update_carry_flag(&mut self, result: u16) {
        self.set_status_flag(StatusFlag::Carry, result & 0b1_0000_0000 != 0);
    }

    /// Overflow for ADC and SBC indicates if we overflow from bit 6 to bit 7 of the u8,
    /// and change the meaning of a number from being negative or positive.
    fn update_overflow_flag(&mut self, operand: u8, result: u8) {
        let bit_7_mask = 0b1000_0000;
        let does_overflow =
            (bit_7_mask & !(self.a ^ operand) & (self.a ^ result)) == bit_7_mask;
        self.set_status_flag(StatusFlag::Overflow, does_overflow);
    }

    fn set_status_flag(&mut self, status_flag: StatusFlag, value: bool) {
        if value {
            self.p |= status_flag as u8;
        } else {
            self.p &= !(status_flag as u8);
        }
    }

    fn get_carry(&self) -> u8 {
        self.p & (StatusFlag::Carry as u8)
    }

    fn is_status_flag_set(&self, status_flag: StatusFlag) -> bool {
        let flag = status_flag as u8;
        self.p & flag == flag
    }

    /// This function implements pushing to the stack. See the "S" register for more details.
    fn push_stack_u8(&mut self, value: u8) {
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.write_u8(address, value);
        self.s = self.s.wrapping_sub(1);
    }

    /// This function implements pulling from the stack. See the "S" register for more details.
    fn pull_stack_u8(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.read_u8(address)
    }

    fn push_stack_u16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // High byte first, since the stack grows down and RTS/RTI expect to
        // pull the low byte first.
        self.push_stack_u8(hi);
        self.push_stack_u8(lo);
    }

    fn pull_stack_u16(&mut self) -> u16 {
        let lo = self.pull_stack_u8() as u16;
        let hi = self.pull_stack_u8() as u16;
        lo | (hi << 8)
    }

    /// Pushed status bytes always carry the unused bit set; `break_flag`
    /// additionally sets the B bit, which BRK and PHP do but hardware
    /// interrupts don't.
    fn pushed_status(&self, break_flag: bool) -> u8 {
        let mut status = self.p | (StatusFlag::Unused as u8);
        if break_flag {
            status |= StatusFlag::Break as u8;
        } else {
            status &= !(StatusFlag::Break as u8);
        }
        status
    }

    /// Reset entry point: called once at power-on, and available to replay a
    /// machine reset at any later time.
    pub fn reset(&mut self) {
        self.s = 0xFD;
        self.p = (self.p | StatusFlag::InterruptDisable as u8 | StatusFlag::Unused as u8)
            & !(StatusFlag::Decimal as u8);
        self.pc = self.read_vector(InterruptVectors::ResetVector);
        self.bump_cycles(7);
    }

    /// Maskable interrupt. A no-op while the interrupt-disable flag is set.
    pub fn irq(&mut self) {
        if self.is_status_flag_set(StatusFlag::InterruptDisable) {
            return;
        }
        let status = self.pushed_status(false);
        self.push_stack_u16(self.pc);
        self.push_stack_u8(status);
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.pc = self.read_vector(InterruptVectors::IrqBrkVector);
        self.bump_cycles(7);
    }

    /// Non-maskable interrupt. Always taken, regardless of the interrupt-disable flag.
    pub fn nmi(&mut self) {
        let status = self.pushed_status(false);
        self.push_stack_u16(self.pc);
        self.push_stack_u8(status);
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.pc = self.read_vector(InterruptVectors::NonMaskableInterrupt);
        self.bump_cycles(7);
    }
}
