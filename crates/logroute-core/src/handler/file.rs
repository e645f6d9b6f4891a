//! Handler appending to a log file.
//!
//! The file is opened once, when the handler is built, and every admitted
//! record is appended and flushed before `handle` returns.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{Handler, Threshold};
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;

/// Appends records to a file it owns for its whole lifetime.
#[derive(Debug)]
pub struct FileHandler {
    threshold: Threshold,

    /// Open file (wrapped in Mutex for thread safety)
    file: Mutex<File>,

    /// Path the handler appends to
    path: PathBuf,
}

impl FileHandler {
    /// Open `path` for append, creating the file if needed.
    ///
    /// Parent directories are not created; an unreachable path fails here
    /// rather than on the first write.
    pub fn new(path: impl AsRef<Path>) -> LogResult<Self> {
        Self::with_level(path, LogLevel::NotSet)
    }

    /// Open `path` for append with an explicit threshold.
    pub fn with_level(path: impl AsRef<Path>, level: LogLevel) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::OpenLogFile {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "opened log file");

        Ok(Self {
            threshold: Threshold::new(level),
            file: Mutex::new(file),
            path,
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn level(&self) -> LogLevel {
        self.threshold.get()
    }

    fn set_level(&self, level: LogLevel) {
        self.threshold.set(level);
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        let mut file = self.file.lock();
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}
