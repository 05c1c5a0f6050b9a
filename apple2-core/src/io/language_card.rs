/// The Language Card soft switches at $C080-$C08F. Every address is mirrored
/// four bytes up ($C080 and $C084 are the same switch), and every access —
/// read or write — updates the state, which is why `access` takes whether
/// this particular touch was itself a write.
///
/// Grounded on `original_source/reinetteII+.c`'s `LCBK2`/`LCRD`/`LCWR`/`LCWFF`
/// globals and their switch statement over `$C080`-`$C08F`.
#[derive(Default)]
pub struct LanguageCard {
    /// True when reads at $D000-$FFFF are served from Language Card RAM
    /// instead of ROM.
    pub read_enable: bool,
    /// True when writes at $D000-$FFFF land in Language Card RAM.
    pub write_enable: bool,
    /// True when the $D000-$DFFF alternate 4 KiB bank is selected.
    pub bank2_selected: bool,
    /// Armed by a read of a WR/RW switch, disarmed by a write to one.
    /// Write-enable only commits once the flip-flop is found armed on a
    /// later access — the documented "two consecutive reads" idiom.
    write_flip_flop: bool,
}

impl LanguageCard {
    pub fn new() -> LanguageCard {
        LanguageCard::default()
    }

    pub fn access(&mut self, addr: u16, is_write_access: bool) {
        // Mask off the mirror bits; only the low nibble selects the switch.
        match addr & 0x000F {
            0x0 | 0x4 => {
                // LC2RD
                self.bank2_selected = true;
                self.read_enable = true;
                self.write_enable = false;
                self.write_flip_flop = false;
            }
            0x1 | 0x5 => {
                // LC2WR
                self.bank2_selected = true;
                self.read_enable = false;
                self.write_enable |= self.write_flip_flop;
                self.write_flip_flop = !is_write_access;
            }
            0x2 | 0x6 => {
                // ROMONLY2
                self.bank2_selected = true;
                self.read_enable = false;
                self.write_enable = false;
                self.write_flip_flop = false;
            }
            0x3 | 0x7 => {
                // LC2RW
                self.bank2_selected = true;
                self.read_enable = true;
                self.write_enable |= self.write_flip_flop;
                self.write_flip_flop = !is_write_access;
            }
            0x8 | 0xC => {
                // LC1RD
                self.bank2_selected = false;
                self.read_enable = true;
                self.write_enable = false;
                self.write_flip_flop = false;
            }
            0x9 | 0xD => {
                // LC1WR
                self.bank2_selected = false;
                self.read_enable = false;
                self.write_enable |= self.write_flip_flop;
                self.write_flip_flop = !is_write_access;
            }
            0xA | 0xE => {
                // ROMONLY1
                self.bank2_selected = false;
                self.read_enable = false;
                self.write_enable = false;
                self.write_flip_flop = false;
            }
            0xB | 0xF => {
                // LC1RW
                self.bank2_selected = false;
                self.read_enable = true;
                self.write_enable |= self.write_flip_flop;
                self.write_flip_flop = !is_write_access;
            }
            _ => unreachable!("addr & 0x000F is always in 0..16"),
        }
    }
}
