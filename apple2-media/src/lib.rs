//! Host-facing loaders for the fixed-size binary blobs `apple2-core` takes:
//! the 12 KiB system ROM, the 256-byte slot-6 Disk II boot PROM, and raw
//! `.nib` disk images. `apple2-core` itself is infallible and never touches
//! a filesystem; reading one of these files and handing the core a value it
//! can't reject is this crate's entire job.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use apple2_core::constants::disk2::IMAGE_SIZE;
use apple2_core::constants::{ROM_SIZE, SLOT6_PROM_SIZE};

#[derive(Debug)]
pub enum MediaError {
    Io(io::Error),
    WrongSize { expected: usize, actual: usize },
}

impl From<io::Error> for MediaError {
    fn from(error: io::Error) -> Self {
        MediaError::Io(error)
    }
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MediaError::Io(error) => write!(f, "{}", error),
            MediaError::WrongSize { expected, actual } => write!(
                f,
                "expected a file of exactly {} bytes, but it was {} bytes",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for MediaError {}

fn read_exact_file(path: &Path, expected: usize) -> Result<Vec<u8>, MediaError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    if bytes.len() != expected {
        return Err(MediaError::WrongSize {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Load a 12 KiB system ROM image, destined for `Machine::load_rom`.
pub fn load_rom_file(path: &Path) -> Result<[u8; ROM_SIZE], MediaError> {
    let bytes = read_exact_file(path, ROM_SIZE)?;
    let mut rom = [0u8; ROM_SIZE];
    rom.copy_from_slice(&bytes);
    Ok(rom)
}

/// Load the 256-byte slot-6 Disk II boot PROM, destined for
/// `Machine::load_slot6_prom`.
pub fn load_slot6_prom_file(path: &Path) -> Result<[u8; SLOT6_PROM_SIZE], MediaError> {
    let bytes = read_exact_file(path, SLOT6_PROM_SIZE)?;
    let mut prom = [0u8; SLOT6_PROM_SIZE];
    prom.copy_from_slice(&bytes);
    Ok(prom)
}

/// Load a raw `.nib` disk image: 35 tracks of 0x1A00 nibbles each, with no
/// header. Returned as a `Vec<u8>` since `Disk2::load_disk` takes ownership
/// of it directly.
pub fn load_nib_file(path: &Path) -> Result<Vec<u8>, MediaError> {
    read_exact_file(path, IMAGE_SIZE)
}

/// Write a nibble buffer read back from `Machine::disk_image` to a `.nib`
/// file. `nibbles` must be exactly `IMAGE_SIZE` bytes; this is a host
/// programming error, not a condition a user's disk image can trigger, so
/// it panics rather than returning a variant for it.
pub fn save_nib_file(path: &Path, nibbles: &[u8]) -> Result<(), MediaError> {
    assert_eq!(
        nibbles.len(),
        IMAGE_SIZE,
        "a disk image must be exactly {} bytes",
        IMAGE_SIZE
    );
    let mut file = File::create(path)?;
    file.write_all(nibbles)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("apple2-media-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn load_rom_file_rejects_the_wrong_size() {
        let path = temp_path("short-rom.bin");
        fs::write(&path, vec![0u8; ROM_SIZE - 1]).unwrap();
        let result = load_rom_file(&path);
        fs::remove_file(&path).ok();
        match result {
            Err(MediaError::WrongSize { expected, actual }) => {
                assert_eq!(expected, ROM_SIZE);
                assert_eq!(actual, ROM_SIZE - 1);
            }
            _ => panic!("expected a WrongSize error"),
        }
    }

    #[test]
    fn rom_round_trips_through_disk() {
        let path = temp_path("rom.bin");
        fs::write(&path, vec![0xAAu8; ROM_SIZE]).unwrap();
        let rom = load_rom_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(rom, [0xAA; ROM_SIZE]);
    }

    #[test]
    fn nib_image_round_trips_through_disk() {
        let path = temp_path("disk.nib");
        let mut image = vec![0u8; IMAGE_SIZE];
        image[0] = 0xFF;
        image[IMAGE_SIZE - 1] = 0xAA;
        save_nib_file(&path, &image).unwrap();
        let loaded = load_nib_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, image);
    }
}
