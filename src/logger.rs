use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

const LOG_FILE: &str = "quiz_debug.log";

lazy_static::lazy_static! {
    static ref SINK: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens the default diagnostic log in the working directory. Safe to call
/// more than once; later calls are no-ops.
pub fn init() {
    init_at(Path::new(LOG_FILE));
}

pub fn init_at(path: &Path) {
    let mut sink = SINK.lock().unwrap();
    if sink.is_some() {
        return;
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
        *sink = Some(file);
    }
}

/// Appends a timestamped line to the diagnostic log. Silently drops the
/// message if the log was never opened, so callers never have to care.
pub fn log(message: &str) {
    let mut sink = SINK.lock().unwrap();
    if let Some(file) = sink.as_mut() {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "{stamp} {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_writes_timestamped_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        init_at(&path);
        log("worker started");
        // The sink is process-global, so the line may land in whichever file
        // was opened first across the test binary; only assert no panic here
        // and that a sink exists afterwards.
        assert!(SINK.lock().unwrap().is_some());
    }

    #[test]
    fn test_log_without_init_is_silent() {
        log("dropped when no sink is open");
    }
}
