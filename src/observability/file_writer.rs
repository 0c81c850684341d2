//! Rotating log file used as the `fmt` layer's writer.
//!
//! The active file is rotated once it would grow past a size limit. Backups are
//! numbered: `<file>.1` is the newest, and anything beyond the retention count is
//! removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Size at which the log file is rotated (10 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept next to the active one.
const MAX_BACKUP_FILES: usize = 3;

struct LogState {
    /// Opened on first write.
    file: Option<File>,
    size: u64,
}

/// Thread-safe, size-rotated, append-only log file.
pub(crate) struct RotatingLogFile {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    state: Mutex<LogState>,
}

impl RotatingLogFile {
    pub(crate) fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub(crate) const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            state: Mutex::new(LogState { file: None, size: 0 }),
        }
    }

    fn backup_path(&self, generation: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(format!(".{generation}"));
        PathBuf::from(name)
    }

    /// Shifts `<file>.N` to `<file>.N+1`, dropping the oldest, then moves the
    /// active file to `<file>.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_exists(&self.file_path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for generation in (1..self.max_backups).rev() {
            let from = self.backup_path(generation);
            if from.exists() {
                fs::rename(&from, self.backup_path(generation + 1))?;
            }
        }

        match fs::rename(&self.file_path, self.backup_path(1)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn open(&self, state: &mut LogState) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;
        state.size = file.metadata().map(|m| m.len()).unwrap_or(0);
        state.file = Some(file);
        Ok(())
    }
}

fn remove_if_exists(path: &std::path::Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Write for &RotatingLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}"))
        })?;

        if state.file.is_none() {
            self.open(&mut state)?;
        }

        if state.size > 0 && state.size + buf.len() as u64 > self.max_bytes {
            state.file = None;
            self.rotate()?;
            self.open(&mut state)?;
        }

        let file = state
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        file.write_all(buf)?;
        state.size += buf.len() as u64;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.state.lock().map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}"))
        })?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RotatingLogFile {
    type Writer = &'a RotatingLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for RotatingLogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingLogFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
