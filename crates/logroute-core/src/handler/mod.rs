//! Output sinks.
//!
//! A [`Handler`] receives every record its logger lets through, applies its
//! own threshold, and writes one formatted line to its sink.
//!
//! ## Sinks
//!
//! - [`StreamHandler`]: any already-open writer (stderr, a socket, a [`CaptureBuffer`])
//! - [`FileHandler`]: a file opened for append when the handler is built
//!
//! ## Filtering
//!
//! A handler has its own threshold, independent of the logger's. A record
//! reaches the sink only when it passes both:
//!
//! ```
//! use std::sync::Arc;
//! use logroute_core::{CaptureBuffer, LogLevel, Logger, StreamHandler};
//!
//! let logger = Logger::with_level("routing", LogLevel::Debug);
//! let terse = CaptureBuffer::new();
//! logger.add_handler(Arc::new(StreamHandler::with_level(terse.clone(), LogLevel::Error)));
//!
//! logger.log(LogLevel::Info, format_args!("connected")).unwrap();
//! assert!(terse.is_empty());
//! ```

mod file;
mod stream;

pub use file::FileHandler;
pub use stream::{CaptureBuffer, StreamHandler};

use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::level::LogLevel;
use crate::record::Record;

/// A sink with its own severity threshold.
///
/// Implementations must write each line with a single call under their own
/// lock, and must not hold data back between calls.
pub trait Handler: Send + Sync {
    /// Current threshold.
    fn level(&self) -> LogLevel;

    /// Change the threshold; takes effect on the next record.
    fn set_level(&self, level: LogLevel);

    /// Write one fully formatted line to the sink.
    fn emit(&self, line: &str) -> io::Result<()>;

    /// Render a record. Defaults to the shared line layout.
    fn format(&self, record: &Record) -> String {
        record.to_line()
    }

    /// Write the record if it passes this handler's threshold.
    fn handle(&self, record: &Record) -> io::Result<()> {
        if !record.level().admitted_by(self.level()) {
            return Ok(());
        }
        let line = self.format(record);
        self.emit(&line)
    }
}

/// Shared handle to a handler, as stored by loggers.
pub type SharedHandler = Arc<dyn Handler>;

/// Threshold storage that can be changed through a shared reference.
#[derive(Debug)]
pub(crate) struct Threshold(AtomicU8);

impl Threshold {
    pub(crate) fn new(level: LogLevel) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub(crate) fn get(&self) -> LogLevel {
        LogLevel::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, level: LogLevel) {
        self.0.store(level as u8, Ordering::Relaxed);
    }
}

/// Whether two handles point at the same handler.
pub(crate) fn same_handler(a: &SharedHandler, b: &SharedHandler) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
