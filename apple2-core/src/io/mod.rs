pub mod language_card;
pub mod paddle;

use crate::log;
use language_card::LanguageCard;
use paddle::Paddle;

use crate::disk2::Disk2;

/// The soft-switch page, $C000-$C0FF, and everything it dispatches to:
/// the keyboard latch, the speaker, game-paddle decay, the Language Card,
/// and — through its own `$C0E0`-`$C0EF` window — the Disk II controller
/// in slot 6.
///
/// Addresses this dispatcher does not recognize read back as an
/// implementation-defined zero; nothing panics on an unmapped soft switch.
pub struct Dispatcher {
    pub language_card: LanguageCard,
    pub disk2: Disk2,

    /// Raw byte the host last wrote representing a keypress (ASCII with
    /// bit 7 set, by host convention; the core does not interpret it).
    pub kbd: u8,
    /// Whether a keystroke is waiting to be read at $C000.
    strobe: bool,

    pub pb0: bool,
    pub pb1: bool,
    pub pb2: bool,
    paddles: [Paddle; 4],
    paddle_positions: [u8; 4],

    pub muted: bool,
    pub monochrome: bool,
    audio_tick: Option<Box<dyn FnMut(u64)>>,
    /// Cycle count of the last speaker toggle, so the callback can be
    /// handed cycles-since-last-toggle instead of an absolute count.
    last_toggle_cycle: Option<u64>,

    /// $C050/$C051: graphics vs. text mode.
    pub text: bool,
    /// $C052/$C053: whether the bottom 4 text lines overlay the graphics page.
    pub mixed: bool,
    /// $C054/$C055: which of the two display pages is active, 1 or 2.
    pub page: u8,
    /// $C056/$C057: lo-res vs. hi-res graphics.
    pub hires: bool,
}

impl Dispatcher {
    pub fn new() -> Dispatcher {
        Dispatcher {
            language_card: LanguageCard::new(),
            disk2: Disk2::new(),
            kbd: 0,
            strobe: false,
            pb0: false,
            pb1: false,
            pb2: false,
            paddles: [
                Paddle::new(),
                Paddle::new(),
                Paddle::new(),
                Paddle::new(),
            ],
            paddle_positions: [0; 4],
            muted: false,
            monochrome: false,
            audio_tick: None,
            last_toggle_cycle: None,
            text: false,
            mixed: false,
            page: 1,
            hires: false,
        }
    }

    pub fn set_audio_tick(&mut self, callback: Box<dyn FnMut(u64)>) {
        self.audio_tick = Some(callback);
    }

    /// The host writes a key's code point directly into the latch; this is
    /// what $C000/$C010 reads expose.
    pub fn set_key(&mut self, code: u8) {
        self.kbd = code;
        self.strobe = true;
    }

    pub fn set_paddle_position(&mut self, paddle: usize, position: u8) {
        self.paddle_positions[paddle] = position;
    }

    /// $C020/$C030/$C033: toggle SPKR. The callback is handed cycles
    /// elapsed since the previous toggle, not the absolute cycle count, so
    /// a host can size the waveform sample it queues.
    fn click_speaker(&mut self, current_cycle: u64) {
        let elapsed = current_cycle.saturating_sub(self.last_toggle_cycle.unwrap_or(current_cycle));
        self.last_toggle_cycle = Some(current_cycle);
        if self.muted {
            return;
        }
        if let Some(tick) = self.audio_tick.as_mut() {
            tick(elapsed);
        }
    }

    pub fn read(&mut self, addr: u16, current_cycle: u64) -> u8 {
        match addr {
            0xC000 => {
                let value = self.kbd & 0x7F | if self.strobe { 0x80 } else { 0x00 };
                value
            }
            0xC010 => {
                self.strobe = false;
                self.kbd
            }
            0xC020 | 0xC030 | 0xC033 => {
                self.click_speaker(current_cycle);
                0
            }
            0xC050..=0xC057 => {
                self.set_video_mode(addr);
                0
            }
            0xC061 => bit7(self.pb0),
            0xC062 => bit7(self.pb1),
            0xC063 => bit7(self.pb2),
            0xC064..=0xC067 => {
                let index = (addr - 0xC064) as usize;
                bit7(self.paddles[index].is_counting(current_cycle))
            }
            0xC070..=0xC07F => {
                self.trigger_paddles(current_cycle);
                0
            }
            0xC080..=0xC08F => {
                self.language_card.access(addr, false);
                0
            }
            0xC0E0..=0xC0E7 => {
                self.disk2.phase_control(addr);
                0
            }
            0xC0E8 => {
                self.disk2.motor_off();
                0
            }
            0xC0E9 => {
                self.disk2.motor_on();
                0
            }
            0xC0EA => {
                self.disk2.select_drive(0);
                0
            }
            0xC0EB => {
                self.disk2.select_drive(1);
                0
            }
            0xC0EC => self.disk2.access_data(false, 0),
            0xC0EE => {
                self.disk2.set_read_mode();
                bit7(self.disk2.current_drive_is_read_only())
            }
            0xC0EF => {
                self.disk2.set_write_mode();
                0
            }
            _ => 0,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8, current_cycle: u64) {
        match addr {
            0xC010 => self.strobe = false,
            0xC020 | 0xC030 | 0xC033 => self.click_speaker(current_cycle),
            0xC050..=0xC057 => self.set_video_mode(addr),
            0xC070..=0xC07F => self.trigger_paddles(current_cycle),
            0xC080..=0xC08F => self.language_card.access(addr, true),
            0xC0E0..=0xC0E7 => self.disk2.phase_control(addr),
            0xC0E8 => self.disk2.motor_off(),
            0xC0E9 => self.disk2.motor_on(),
            0xC0EA => self.disk2.select_drive(0),
            0xC0EB => self.disk2.select_drive(1),
            0xC0EC => {
                self.disk2.access_data(true, value);
            }
            0xC0EE => self.disk2.set_read_mode(),
            0xC0EF => self.disk2.set_write_mode(),
            _ => {}
        }
    }

    /// $C050-$C057: each pair is a CLR/SET switch for one video-mode flag.
    /// The even address of a pair clears, the odd address sets.
    fn set_video_mode(&mut self, addr: u16) {
        match addr {
            0xC050 => self.text = false,
            0xC051 => self.text = true,
            0xC052 => self.mixed = false,
            0xC053 => self.mixed = true,
            0xC054 => self.page = 1,
            0xC055 => self.page = 2,
            0xC056 => self.hires = false,
            0xC057 => self.hires = true,
            _ => unreachable!("addr is always in 0xC050..=0xC057"),
        }
    }

    fn trigger_paddles(&mut self, current_cycle: u64) {
        for (index, paddle) in self.paddles.iter_mut().enumerate() {
            paddle.trigger(self.paddle_positions[index], current_cycle);
        }
        log::log("io: paddles triggered");
    }
}

fn bit7(set: bool) -> u8 {
    if set {
        0x80
    } else {
        0x00
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keyboard_latch_round_trips_and_strobe_clears_on_c010() {
        let mut io = Dispatcher::new();
        io.set_key(0xC1); // 'A' with bit 7 set
        assert_eq!(io.read(0xC000, 0), 0xC1);
        assert_eq!(io.read(0xC010, 0), 0xC1);
        // Strobe cleared: bit 7 is gone from a subsequent $C000 read.
        assert_eq!(io.read(0xC000, 0), 0x41);
    }

    #[test]
    fn video_mode_switches_track_text_mixed_page_hires_independently() {
        let mut io = Dispatcher::new();
        io.write(0xC051, 0, 0); // TEXT on
        io.write(0xC053, 0, 0); // MIXED on
        io.write(0xC055, 0, 0); // PAGE2
        io.write(0xC057, 0, 0); // HIRES on
        assert!(io.text);
        assert!(io.mixed);
        assert_eq!(io.page, 2);
        assert!(io.hires);

        io.write(0xC050, 0, 0); // TEXT off
        assert!(!io.text);
        // Other flags are untouched by an unrelated switch.
        assert!(io.mixed);
        assert_eq!(io.page, 2);
        assert!(io.hires);
    }

    #[test]
    fn c0ee_reports_whether_the_current_disk_is_write_protected() {
        let mut io = Dispatcher::new();
        io.disk2.load_disk(0, vec![0u8; crate::constants::disk2::IMAGE_SIZE], true);
        assert_eq!(io.read(0xC0EE, 0), 0x80);

        io.disk2.load_disk(0, vec![0u8; crate::constants::disk2::IMAGE_SIZE], false);
        assert_eq!(io.read(0xC0EE, 0), 0x00);
    }
}
