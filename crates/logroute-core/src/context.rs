//! Logger registry and the functional logging API.
//!
//! A [`LoggingContext`] maps names to loggers and designates one of them,
//! the primary logger, as the target of the convenience functions
//! (`log_error`, `set_log_level`, `register_handler`, ...).
//!
//! Start-up code builds one context and passes it to whatever needs to
//! create loggers. Code that cannot be handed a context can use the
//! process-wide default in [`crate::global`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{LogError, LogResult};
use crate::handler::SharedHandler;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::record::Record;

/// Name of the primary logger in the process-wide default context.
pub const DEFAULT_PRIMARY_LOGGER: &str = "main";

/// Name → logger mapping with a designated primary logger.
pub struct LoggingContext {
    primary_name: String,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggingContext {
    /// Create an empty context whose primary logger will be `primary_name`.
    ///
    /// The primary logger itself is not created; call
    /// [`create_logger`](Self::create_logger) with the same name.
    pub fn new(primary_name: impl Into<String>) -> Self {
        Self {
            primary_name: primary_name.into(),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    pub fn primary_name(&self) -> &str {
        &self.primary_name
    }

    /// Register a new logger at the default level with no handlers.
    ///
    /// Fails without touching the existing logger if the name is taken.
    pub fn create_logger(&self, name: &str) -> LogResult<Arc<Logger>> {
        let logger = {
            let mut loggers = self.loggers.lock();
            if loggers.contains_key(name) {
                return Err(LogError::DuplicateLogger(name.to_string()));
            }
            let logger = Arc::new(Logger::new(name));
            loggers.insert(name.to_string(), logger.clone());
            logger
        };

        tracing::debug!(logger = name, "created logger");
        Ok(logger)
    }

    /// Register several new loggers at the default level, all or none.
    pub fn create_loggers(&self, names: &[&str]) -> LogResult<Vec<Arc<Logger>>> {
        self.add_loggers(names.iter().map(|name| Logger::new(*name)).collect())
    }

    /// Register already configured loggers, all or none.
    ///
    /// Every name is checked and inserted under one lock, so a taken name
    /// (or a repeated one) leaves the registry untouched.
    pub fn add_loggers(&self, loggers: Vec<Logger>) -> LogResult<Vec<Arc<Logger>>> {
        let added: Vec<Arc<Logger>> = {
            let mut map = self.loggers.lock();
            for (i, logger) in loggers.iter().enumerate() {
                let repeated = loggers[..i].iter().any(|l| l.name() == logger.name());
                if repeated || map.contains_key(logger.name()) {
                    return Err(LogError::DuplicateLogger(logger.name().to_string()));
                }
            }

            loggers
                .into_iter()
                .map(|logger| {
                    let logger = Arc::new(logger);
                    map.insert(logger.name().to_string(), logger.clone());
                    logger
                })
                .collect()
        };

        for logger in &added {
            tracing::debug!(logger = logger.name(), "created logger");
        }
        Ok(added)
    }

    /// Unregister a logger.
    ///
    /// Clones of the removed `Arc<Logger>` held elsewhere keep working.
    pub fn remove_logger(&self, name: &str) -> LogResult<()> {
        if self.loggers.lock().remove(name).is_none() {
            return Err(LogError::LoggerNotFound(name.to_string()));
        }

        tracing::debug!(logger = name, "removed logger");
        Ok(())
    }

    pub fn get_logger(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn primary_logger(&self) -> Option<Arc<Logger>> {
        self.get_logger(&self.primary_name)
    }

    fn require_primary(&self) -> LogResult<Arc<Logger>> {
        self.primary_logger()
            .ok_or_else(|| LogError::LoggerNotFound(self.primary_name.clone()))
    }

    /// Attach a handler to the primary logger.
    pub fn register_handler(&self, handler: SharedHandler) -> LogResult<()> {
        self.require_primary()?.add_handler(handler);
        tracing::debug!(logger = %self.primary_name, "registered handler");
        Ok(())
    }

    /// Detach a handler from the primary logger.
    ///
    /// Returns `false` if the handler was not attached.
    pub fn unregister_handler(&self, handler: &SharedHandler) -> LogResult<bool> {
        let removed = self.require_primary()?.remove_handler(handler);
        tracing::debug!(logger = %self.primary_name, removed, "unregistered handler");
        Ok(removed)
    }

    /// Set the primary logger's level.
    pub fn set_log_level(&self, level: LogLevel) -> LogResult<()> {
        self.require_primary()?.set_level(level);
        Ok(())
    }

    /// Dispatch a message to the primary logger.
    ///
    /// Does nothing if the primary logger has not been created yet.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> LogResult<()> {
        // Registry lock is released before any handler runs
        let Some(logger) = self.primary_logger() else {
            return Ok(());
        };
        if !level.admitted_by(logger.level()) {
            return Ok(());
        }

        let record = Record::now(level, self.primary_name.as_str(), args.to_string());
        logger.handle(&record)?;
        Ok(())
    }

    pub fn log_fatal(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log(LogLevel::Fatal, args)
    }

    pub fn log_error(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log(LogLevel::Error, args)
    }

    pub fn log_warning(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log(LogLevel::Warning, args)
    }

    pub fn log_info(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log(LogLevel::Info, args)
    }

    pub fn log_debug(&self, args: fmt::Arguments<'_>) -> LogResult<()> {
        self.log(LogLevel::Debug, args)
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_LOGGER)
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("primary_name", &self.primary_name)
            .field("loggers", &self.logger_names())
            .finish()
    }
}
