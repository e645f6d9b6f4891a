//! Named loggers.
//!
//! A [`Logger`] owns a threshold and an ordered list of handlers. It is the
//! dispatch point for records: it drops anything above its own threshold and
//! hands the rest to each handler in insertion order.

use std::fmt;

use parking_lot::RwLock;

use crate::handler::{same_handler, SharedHandler, Threshold};
use crate::level::LogLevel;
use crate::record::Record;

/// A named dispatch point for records.
///
/// # Thread Safety
///
/// All methods take `&self`. The handler list is copied before dispatch, so
/// handlers may be added or removed while other threads are logging.
pub struct Logger {
    name: String,
    threshold: Threshold,
    handlers: RwLock<Vec<SharedHandler>>,
}

impl Logger {
    /// Create a logger at the default `Warning` level with no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, LogLevel::default())
    }

    /// Create a logger with an explicit level.
    pub fn with_level(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            threshold: Threshold::new(level),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.threshold.get()
    }

    /// Change the threshold; takes effect on the next record.
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.set(level);
    }

    /// Append a handler. The same handler may be attached more than once.
    pub fn add_handler(&self, handler: SharedHandler) {
        self.handlers.write().push(handler);
    }

    /// Detach every attachment of `handler`.
    ///
    /// Returns `false` if the handler was not attached.
    pub fn remove_handler(&self, handler: &SharedHandler) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !same_handler(h, handler));
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Dispatch a record to the attached handlers.
    ///
    /// A record above the logger's level is dropped without touching any
    /// handler. Otherwise every handler sees it, even if an earlier one
    /// failed; the first write error is returned.
    pub fn handle(&self, record: &Record) -> std::io::Result<()> {
        if !record.level().admitted_by(self.level()) {
            return Ok(());
        }

        // Snapshot so writes happen without holding the list lock
        let handlers: Vec<SharedHandler> = self.handlers.read().clone();

        let mut first_err = None;
        for handler in &handlers {
            if let Err(e) = handler.handle(record) {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Format a message and dispatch it under this logger's name.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> std::io::Result<()> {
        // Skip formatting when nothing would be written
        if !level.admitted_by(self.level()) {
            return Ok(());
        }
        self.handle(&Record::now(level, self.name.as_str(), args.to_string()))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
