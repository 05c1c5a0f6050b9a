use crate::bus::{Bus, LanguageCardKind, SharedBus};
use crate::cpu_6502::Cpu6502;

/// Owns the whole emulated machine: the shared bus and the CPU that drives
/// it. This replaces the process-wide statics of
/// `original_source/reinetteII+.c` (`KBD`, `SPKR`, `LCRD`, `phases[2][4]`,
/// and friends) with one ordinary value a host can create more than one of,
/// following the teacher's `Emulator`/`NesCore` shape.
///
/// `Machine` is `!Send`/`!Sync` because `SharedBus` is `Rc<RefCell<Bus>>`,
/// not `Arc<Mutex<_>>`. A host that wants to run more than one `Machine`
/// across threads owns its own synchronization; this crate does not
/// provide one, matching its single-threaded, cooperative-scheduling
/// design.
pub struct Machine {
    pub bus: SharedBus,
    pub cpu: Cpu6502,
}

impl Machine {
    pub fn new(language_card_kind: LanguageCardKind) -> Machine {
        let bus = Bus::new_shared_bus(language_card_kind);
        let cpu = Cpu6502::new(std::rc::Rc::clone(&bus));
        Machine { bus, cpu }
    }

    /// Run for at least `budget` cycles, always finishing the instruction in
    /// progress, and return the resulting program counter.
    pub fn exec(&mut self, budget: u64) -> u16 {
        self.cpu.exec(budget)
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    pub fn irq(&mut self) {
        self.cpu.irq();
    }

    pub fn nmi(&mut self) {
        self.cpu.nmi();
    }

    pub fn brk(&mut self) {
        crate::cpu_6502::opcodes_jump::brk(&mut self.cpu, crate::opcodes::Mode::Implicit, 0);
    }

    /// Force the program counter to an arbitrary address, bypassing the
    /// usual fetch/decode/execute cycle. Useful for a debugger, or for
    /// jumping straight into a loaded test program.
    pub fn goto(&mut self, addr: u16) {
        self.cpu.pc = addr;
    }

    pub fn ram(&self) -> Vec<u8> {
        self.bus.borrow().ram().to_vec()
    }

    pub fn load_rom(&mut self, bytes: [u8; crate::constants::ROM_SIZE]) {
        self.bus.borrow_mut().load_rom(bytes);
    }

    pub fn load_slot6_prom(&mut self, bytes: [u8; crate::constants::SLOT6_PROM_SIZE]) {
        self.bus.borrow_mut().load_slot6_prom(bytes);
    }

    pub fn load_disk(&mut self, drive: usize, nibbles: Vec<u8>, read_only: bool) {
        self.bus
            .borrow_mut()
            .io
            .disk2
            .load_disk(drive, nibbles, read_only);
    }

    pub fn disk_image(&self, drive: usize) -> Vec<u8> {
        self.bus.borrow().io.disk2.disk_image(drive).to_vec()
    }

    /// Host convention: write an ASCII byte with bit 7 set, matching the
    /// encoding `original_source/reinetteII+.c` uses for its keymap (e.g.
    /// `a` -> `0xC1`, Return -> `0x8D`). This crate does not interpret the
    /// byte; it is just latched and exposed at $C000/$C010.
    pub fn set_key(&mut self, code: u8) {
        self.bus.borrow_mut().io.set_key(code);
    }

    pub fn set_pushbutton(&mut self, index: usize, pressed: bool) {
        let mut bus = self.bus.borrow_mut();
        match index {
            0 => bus.io.pb0 = pressed,
            1 => bus.io.pb1 = pressed,
            2 => bus.io.pb2 = pressed,
            _ => {}
        }
    }

    pub fn set_paddle_position(&mut self, paddle: usize, position: u8) {
        self.bus.borrow_mut().io.set_paddle_position(paddle, position);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.bus.borrow_mut().io.muted = muted;
    }

    pub fn set_monochrome(&mut self, monochrome: bool) {
        self.bus.borrow_mut().io.monochrome = monochrome;
    }

    pub fn set_audio_tick(&mut self, callback: Box<dyn FnMut(u64)>) {
        self.bus.borrow_mut().io.set_audio_tick(callback);
    }

    /// Video-mode flags a host needs to know how to interpret the RAM it
    /// pulls for display: text vs. graphics, mixed mode, which of the two
    /// display pages is live, and lo-res vs. hi-res.
    pub fn video_mode(&self) -> (bool, bool, u8, bool) {
        let io = &self.bus.borrow().io;
        (io.text, io.mixed, io.page, io.hires)
    }
}
