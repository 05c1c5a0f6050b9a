use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{
    memory_range, LANGUAGE_CARD_BANK2_SIZE, LANGUAGE_CARD_BANK_SIZE, ROM_SIZE, SLOT6_PROM_SIZE,
};
use crate::io::Dispatcher;

/// `Bus` is always accessed through a shared, reference-counted cell: the
/// CPU, the I/O dispatcher, and a future debugger all need their own handle
/// to the same memory.
pub type SharedBus = Rc<RefCell<Bus>>;

/// Whether the Language Card extension is installed, and which variant.
/// `Card16k` is the only variant implemented; it is the common case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCardKind {
    None,
    Card16k,
}

/// The 64 KiB address space of an Apple II Plus, plus the memory that backs
/// it: 48 KiB of linear RAM, 12 KiB of ROM (or Language Card RAM when
/// switched in), a 256-byte slot-6 boot PROM, and the soft-switch/Disk II
/// dispatcher.
pub struct Bus {
    ram: [u8; memory_range::RAM.size() as usize],
    rom: [u8; ROM_SIZE],
    slot6_prom: [u8; SLOT6_PROM_SIZE],
    /// Language Card bank 1, covering the full $D000-$FFFF window.
    lc_bank1: [u8; LANGUAGE_CARD_BANK_SIZE],
    /// Language Card bank 2, covering only the $D000-$DFFF alternate window.
    lc_bank2: [u8; LANGUAGE_CARD_BANK2_SIZE],
    language_card_kind: LanguageCardKind,
    pub io: Dispatcher,
    /// Mirrors the CPU's monotonic cycle counter; used by the Dispatcher for
    /// paddle decay timing. Kept in sync once per CPU tick rather than
    /// threaded through every bus access.
    pub cycles: u64,
}

impl Bus {
    pub fn new_shared_bus(language_card_kind: LanguageCardKind) -> SharedBus {
        Rc::new(RefCell::new(Bus {
            ram: [0; memory_range::RAM.size() as usize],
            rom: [0; ROM_SIZE],
            slot6_prom: [0; SLOT6_PROM_SIZE],
            lc_bank1: [0; LANGUAGE_CARD_BANK_SIZE],
            lc_bank2: [0; LANGUAGE_CARD_BANK2_SIZE],
            language_card_kind,
            io: Dispatcher::new(),
            cycles: 0,
        }))
    }

    pub fn load_rom(&mut self, bytes: [u8; ROM_SIZE]) {
        self.rom = bytes;
    }

    pub fn load_slot6_prom(&mut self, bytes: [u8; SLOT6_PROM_SIZE]) {
        self.slot6_prom = bytes;
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut [u8] {
        &mut self.ram
    }

    /// Read one byte off the bus. Several soft-switch reads are
    /// side-effecting (keyboard strobe, Disk II nibble advance, paddle
    /// countdown), which is why this takes `&mut self` rather than `&self`.
    pub fn read_u8(&mut self, addr: u16) -> u8 {
        if memory_range::RAM.contains(addr) {
            return self.ram[addr as usize];
        }
        if memory_range::SLOT6_PROM.contains(addr) {
            return self.slot6_prom[(addr - memory_range::SLOT6_PROM.min) as usize];
        }
        if memory_range::IO.contains(addr) {
            return self.io.read(addr, self.cycles);
        }
        if memory_range::ROM_OR_LANGUAGE_CARD.contains(addr) {
            return self.read_rom_or_language_card(addr);
        }
        // Unmapped slot ROM space outside slot 6; reads as open-bus zero.
        0
    }

    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read_u8(addr) as u16;
        let hi = self.read_u8(addr.wrapping_add(1)) as u16;
        lo | (hi << 8)
    }

    pub fn write_u8(&mut self, addr: u16, value: u8) {
        if memory_range::RAM.contains(addr) {
            self.ram[addr as usize] = value;
            return;
        }
        if memory_range::IO.contains(addr) {
            self.io.write(addr, value, self.cycles);
            return;
        }
        if memory_range::ROM_OR_LANGUAGE_CARD.contains(addr) {
            self.write_language_card(addr, value);
        }
        // Writes to the slot-6 PROM or unmapped space are dropped; there is
        // no RAM backing ROM space unless the Language Card is enabled.
    }

    pub fn write_u16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_u8(addr, lo);
        self.write_u8(addr.wrapping_add(1), hi);
    }

    fn read_rom_or_language_card(&self, addr: u16) -> u8 {
        if self.language_card_kind == LanguageCardKind::None || !self.io.language_card.read_enable
        {
            return self.rom[(addr - memory_range::ROM_OR_LANGUAGE_CARD.min) as usize];
        }
        if self.io.language_card.bank2_selected && memory_range::LANGUAGE_CARD_BANK2.contains(addr)
        {
            return self.lc_bank2[(addr - memory_range::LANGUAGE_CARD_BANK2.min) as usize];
        }
        self.lc_bank1[(addr - memory_range::ROM_OR_LANGUAGE_CARD.min) as usize]
    }

    fn write_language_card(&mut self, addr: u16, value: u8) {
        if self.language_card_kind == LanguageCardKind::None || !self.io.language_card.write_enable
        {
            return;
        }
        if self.io.language_card.bank2_selected && memory_range::LANGUAGE_CARD_BANK2.contains(addr)
        {
            self.lc_bank2[(addr - memory_range::LANGUAGE_CARD_BANK2.min) as usize] = value;
            return;
        }
        self.lc_bank1[(addr - memory_range::ROM_OR_LANGUAGE_CARD.min) as usize] = value;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ram_round_trips() {
        let bus = Bus::new_shared_bus(LanguageCardKind::None);
        bus.borrow_mut().write_u8(0x0200, 0x42);
        assert_eq!(bus.borrow_mut().read_u8(0x0200), 0x42);
    }

    #[test]
    fn rom_is_read_only_without_language_card() {
        let bus = Bus::new_shared_bus(LanguageCardKind::None);
        bus.borrow_mut().load_rom([0xAA; ROM_SIZE]);
        bus.borrow_mut().write_u8(0xD000, 0x11);
        assert_eq!(bus.borrow_mut().read_u8(0xD000), 0xAA);
    }

    #[test]
    fn language_card_write_requires_write_enable() {
        let bus = Bus::new_shared_bus(LanguageCardKind::Card16k);
        bus.borrow_mut().load_rom([0xAA; ROM_SIZE]);
        // ROMONLY2: read-enable, but write disabled.
        bus.borrow_mut().read_u8(0xC082);
        bus.borrow_mut().write_u8(0xD000, 0x55);
        assert_eq!(bus.borrow_mut().read_u8(0xD000), 0xAA);
    }

    #[test]
    fn language_card_write_enables_after_two_reads_of_a_write_switch() {
        let bus = Bus::new_shared_bus(LanguageCardKind::Card16k);
        bus.borrow_mut().load_rom([0xAA; ROM_SIZE]);
        // Two consecutive reads of LC1RW ($C08B) arm then commit write-enable.
        bus.borrow_mut().read_u8(0xC08B);
        bus.borrow_mut().read_u8(0xC08B);
        bus.borrow_mut().write_u8(0xD010, 0x77);
        assert_eq!(bus.borrow_mut().read_u8(0xD010), 0x77);
    }
}
