use std::{
    fs::{self, OpenOptions},
    io::Write,
};

pub fn init_log() {
    match fs::File::create("log.txt") {
        Ok(_) => {}
        // Potential errors are that the file already exists, so just ignore it.
        Err(_) => {}
    };
}

/// Log for when stdout is taken. Silently does nothing if `init_log` was
/// never called — the Disk II controller and Language Card dispatcher log
/// unconditionally, including from unit tests that never open a log file.
pub fn log(text: &str) {
    let file = OpenOptions::new().write(true).append(true).open("log.txt");

    if let Ok(mut file) = file {
        let _ = file.write_all(text.as_bytes());
        let _ = file.write_all("\n".as_bytes());
    }
}
