//! Append-only run log.
//!
//! Every line is prefixed with a local timestamp. Logging is best effort:
//! failing to open or write the log file never affects an organization run.

use crate::output::OutputFormatter;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Simple file logger with buffered, append-only writes.
pub struct FileLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl FileLogger {
    /// Returns the default log location, `<local data dir>/prefixtidy/prefixtidy.log`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("prefixtidy").join("prefixtidy.log"))
    }

    /// Opens the log file at `path` for appending, creating it and its parent
    /// directory if needed.
    ///
    /// Returns a disabled logger if the file cannot be opened.
    pub fn open(path: &Path) -> Self {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            let _ = fs::create_dir_all(parent);
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                writer: Some(BufWriter::new(file)),
                path: Some(path.to_path_buf()),
            },
            Err(_) => Self::disabled(),
        }
    }

    /// Opens the log at `path`, or at the default location when `None`.
    pub fn open_or_default(path: Option<&Path>) -> Self {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::open(&path),
            None => Self::disabled(),
        }
    }

    /// A logger that discards everything.
    pub fn disabled() -> Self {
        Self {
            writer: None,
            path: None,
        }
    }

    /// Path of the log file, if logging is active.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Appends a timestamped message.
    ///
    /// When `surface` is true the message is also shown to the operator as a warning.
    pub fn log(&mut self, message: &str, surface: bool) {
        if surface {
            OutputFormatter::warning(message);
        }
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "[{}] {}", Self::timestamp(), message);
            let _ = writer.flush();
        }
    }
}
