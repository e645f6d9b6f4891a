//! Process-wide default context.
//!
//! Thin wrappers around a lazily created [`LoggingContext`] whose primary
//! logger is [`DEFAULT_PRIMARY_LOGGER`]. Prefer passing a context around;
//! these exist for code that logs before anyone could hand it one.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::context::{LoggingContext, DEFAULT_PRIMARY_LOGGER};
use crate::error::{LogError, LogResult};
use crate::handler::SharedHandler;
use crate::level::LogLevel;
use crate::logger::Logger;

static CONTEXT: OnceLock<LoggingContext> = OnceLock::new();

/// The default context, created on first use.
pub fn context() -> &'static LoggingContext {
    CONTEXT.get_or_init(|| LoggingContext::new(DEFAULT_PRIMARY_LOGGER))
}

/// Replace the default context with `ctx`.
///
/// Only possible before anything has touched the default context.
pub fn install(ctx: LoggingContext) -> LogResult<()> {
    CONTEXT
        .set(ctx)
        .map_err(|_| LogError::Config("default logging context is already initialized".into()))
}

pub fn create_logger(name: &str) -> LogResult<Arc<Logger>> {
    context().create_logger(name)
}

pub fn remove_logger(name: &str) -> LogResult<()> {
    context().remove_logger(name)
}

pub fn register_handler(handler: SharedHandler) -> LogResult<()> {
    context().register_handler(handler)
}

pub fn unregister_handler(handler: &SharedHandler) -> LogResult<bool> {
    context().unregister_handler(handler)
}

pub fn set_log_level(level: LogLevel) -> LogResult<()> {
    context().set_log_level(level)
}

pub fn log_fatal(args: fmt::Arguments<'_>) -> LogResult<()> {
    context().log_fatal(args)
}

pub fn log_error(args: fmt::Arguments<'_>) -> LogResult<()> {
    context().log_error(args)
}

pub fn log_warning(args: fmt::Arguments<'_>) -> LogResult<()> {
    context().log_warning(args)
}

pub fn log_info(args: fmt::Arguments<'_>) -> LogResult<()> {
    context().log_info(args)
}

pub fn log_debug(args: fmt::Arguments<'_>) -> LogResult<()> {
    context().log_debug(args)
}
