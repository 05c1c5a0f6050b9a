use crate::constants::disk2::{DRIVE_COUNT, IMAGE_SIZE, MAX_HALF_TRACK, NIBBLES_PER_TRACK, TRACK_COUNT};
use crate::log;

/// One floppy drive: its stepper motor position, its raw nibble image, and
/// the read/write head's current offset into the currently-selected track.
struct Drive {
    motor_on: bool,
    half_track: i16,
    /// Which of the four stepper phases is currently energized.
    phase_on: [bool; 4],
    /// Phase state one access ago.
    phase_before: [bool; 4],
    /// Phase state two accesses ago. This is the slot the half-track step
    /// condition actually tests — not `phase_before` — which is the
    /// subtlety that makes this stepper model behave like real Disk II
    /// firmware's four-phase cogging sequence instead of a naive one-step
    /// lookback.
    phase_before_before: [bool; 4],
    nibble_position: u16,
    nibbles: Vec<u8>,
    read_only: bool,
}

impl Drive {
    fn new() -> Drive {
        Drive {
            motor_on: false,
            half_track: 0,
            phase_on: [false; 4],
            phase_before: [false; 4],
            phase_before_before: [false; 4],
            nibble_position: 0,
            nibbles: vec![0; IMAGE_SIZE],
            read_only: false,
        }
    }

    fn track(&self) -> usize {
        (((self.half_track + 1) / 2) as usize).min(TRACK_COUNT - 1)
    }
}

/// The Disk II controller wired into slot 6: two drives sharing one stepper
/// and one data register, selected by the $C0E8-$C0EB soft switches.
///
/// Grounded on `original_source/reinetteII+.c`'s `stepMotor`/`setDrv`
/// functions.
pub struct Disk2 {
    drives: [Drive; DRIVE_COUNT],
    current_drive: usize,
    write_mode: bool,
}

impl Disk2 {
    pub fn new() -> Disk2 {
        Disk2 {
            drives: [Drive::new(), Drive::new()],
            current_drive: 0,
            write_mode: false,
        }
    }

    pub fn load_disk(&mut self, drive: usize, nibbles: Vec<u8>, read_only: bool) {
        self.drives[drive].nibbles = nibbles;
        self.drives[drive].read_only = read_only;
        self.drives[drive].nibble_position = 0;
    }

    pub fn disk_image(&self, drive: usize) -> &[u8] {
        &self.drives[drive].nibbles
    }

    /// $C0EE's read value: whether the currently selected drive's image is
    /// write-protected.
    pub fn current_drive_is_read_only(&self) -> bool {
        self.drives[self.current_drive].read_only
    }

    pub fn motor_on(&mut self) {
        self.drives[self.current_drive].motor_on = true;
    }

    pub fn motor_off(&mut self) {
        self.drives[self.current_drive].motor_on = false;
    }

    /// $C0EA/$C0EB: select a drive. The newly selected drive inherits
    /// either drive's running motor state, and the deselected drive's
    /// motor is forced off — exactly `setDrv`'s behavior, which lets
    /// firmware turn the motor on before it has chosen a drive.
    pub fn select_drive(&mut self, drive: usize) {
        let other = 1 - drive;
        let inherited = self.drives[drive].motor_on || self.drives[other].motor_on;
        self.drives[drive].motor_on = inherited;
        self.drives[other].motor_on = false;
        self.current_drive = drive;
        log::log(&format!("disk2: drive {} selected", drive));
    }

    pub fn set_read_mode(&mut self) {
        self.write_mode = false;
    }

    pub fn set_write_mode(&mut self) {
        self.write_mode = true;
    }

    /// $C0E0-$C0E7: energize or de-energize one of the four stepper phases.
    pub fn phase_control(&mut self, addr: u16) {
        let phase = ((addr >> 1) & 0x3) as usize;
        let turning_on = addr & 1 == 1;
        let drive = &mut self.drives[self.current_drive];

        drive.phase_before_before[phase] = drive.phase_before[phase];
        drive.phase_before[phase] = drive.phase_on[phase];

        if turning_on {
            let next = (phase + 1) & 3;
            let prev = (phase + 3) & 3;
            let before = drive.half_track;
            if drive.phase_before_before[next] {
                drive.half_track = (drive.half_track - 1).max(0);
            }
            if drive.phase_before_before[prev] {
                drive.half_track = (drive.half_track + 1).min(MAX_HALF_TRACK);
            }
            drive.phase_on[phase] = true;
            drive.nibble_position = 0;
            if drive.half_track != before {
                log::log(&format!(
                    "disk2: drive {} stepped to half-track {}",
                    self.current_drive, drive.half_track
                ));
            }
        } else {
            drive.phase_on[phase] = false;
        }
    }

    /// $C0EC: the data register. A read returns the nibble under the head
    /// and advances it; a write does the same but stores a nibble instead,
    /// unless the disk is read-only or the controller is in read mode.
    pub fn access_data(&mut self, is_write: bool, value: u8) -> u8 {
        let drive_index = self.current_drive;
        let write_mode = self.write_mode;
        let drive = &mut self.drives[drive_index];
        let track = drive.track();
        let index = track * NIBBLES_PER_TRACK as usize + drive.nibble_position as usize;

        let result = if write_mode && is_write && !drive.read_only {
            drive.nibbles[index] = value;
            value
        } else {
            drive.nibbles[index]
        };

        drive.nibble_position = (drive.nibble_position + 1) % NIBBLES_PER_TRACK;
        result
    }
}
