//! logroute Core Library
//!
//! Named loggers that filter timestamped records and route them to
//! pluggable sinks.
//!
//! ## Overview
//!
//! - [`Record`]: one immutable log event
//! - [`Handler`]: a sink with its own level filter ([`StreamHandler`], [`FileHandler`])
//! - [`Logger`]: a named threshold plus an ordered list of handlers
//! - [`LoggingContext`]: name → logger registry with a primary logger behind
//!   the functional API (`log_error`, `set_log_level`, ...)
//!
//! A record reaches a handler's sink only if its level is at least as severe
//! as both the logger's and the handler's threshold. Every line has the form
//! `YYYY-MM-DD HH:MM:SS <logger> <LEVEL> <message>`.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use logroute_core::{log_error, CaptureBuffer, LogLevel, LoggingContext, StreamHandler};
//!
//! let ctx = LoggingContext::new("router");
//! ctx.create_logger("router").unwrap();
//!
//! let output = CaptureBuffer::new();
//! ctx.register_handler(Arc::new(StreamHandler::new(output.clone()))).unwrap();
//! ctx.set_log_level(LogLevel::Info).unwrap();
//!
//! log_error!(ctx: ctx, "lost connection to {}", "db-1").unwrap();
//! assert!(output.contents().contains("router ERROR lost connection to db-1"));
//! ```

pub mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod global;
pub mod handler;
pub mod level;
pub mod logger;
mod macros;
pub mod record;

// Re-exports
pub use bridge::RecordLayer;
pub use config::LoggingConfig;
pub use context::{LoggingContext, DEFAULT_PRIMARY_LOGGER};
pub use error::{LogError, LogResult};
pub use handler::{CaptureBuffer, FileHandler, Handler, SharedHandler, StreamHandler};
pub use level::LogLevel;
pub use logger::Logger;
pub use record::{Record, TIMESTAMP_FORMAT};
