//! Handler writing to an already-open stream.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Handler, Threshold};
use crate::level::LogLevel;

/// Writes records to any writer the caller already opened.
///
/// The handler does not manage the writer's lifecycle beyond writing and
/// flushing it; it is dropped with the handler.
pub struct StreamHandler {
    threshold: Threshold,
    /// Writer guarded so concurrent records never interleave within a line
    stream: Mutex<Box<dyn Write + Send>>,
}

impl StreamHandler {
    /// Create a handler that admits every level.
    pub fn new(stream: impl Write + Send + 'static) -> Self {
        Self::with_level(stream, LogLevel::NotSet)
    }

    /// Create a handler with an explicit threshold.
    pub fn with_level(stream: impl Write + Send + 'static, level: LogLevel) -> Self {
        Self {
            threshold: Threshold::new(level),
            stream: Mutex::new(Box::new(stream)),
        }
    }

    /// Handler on the process's standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Handler on the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Handler for StreamHandler {
    fn level(&self) -> LogLevel {
        self.threshold.get()
    }

    fn set_level(&self, level: LogLevel) {
        self.threshold.set(level);
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        let mut stream = self.stream.lock();
        stream.write_all(line.as_bytes())?;
        stream.flush()
    }
}

impl fmt::Debug for StreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Hand one clone to a [`StreamHandler`] and keep another to inspect what
/// was written.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Captured text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard captured output.
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
