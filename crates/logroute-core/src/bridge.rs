//! Custom tracing Layer that forwards events to a [`Logger`].
//!
//! Lets libraries instrumented with `tracing` end up in the same sinks as
//! code using the logroute API:
//!
//! ```ignore
//! use logroute_core::{bridge::RecordLayer, LoggingContext};
//! use tracing_subscriber::prelude::*;
//!
//! let ctx = LoggingContext::new("router");
//! let logger = ctx.create_logger("router")?;
//!
//! let subscriber = tracing_subscriber::registry().with(RecordLayer::new(logger));
//! tracing::subscriber::set_global_default(subscriber)?;
//! ```

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::level::LogLevel;
use crate::logger::Logger;
use crate::record::Record;

/// A tracing Layer that turns events into records for one logger.
///
/// Records carry the logger's name. Fields other than `message` are appended
/// to the message text as ` key=value`.
pub struct RecordLayer {
    logger: Arc<Logger>,
}

impl RecordLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

/// Map a tracing level onto the nearest record level.
pub fn level_from_tracing(level: &Level) -> LogLevel {
    match *level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        Level::INFO => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

impl<S> Layer<S> for RecordLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = level_from_tracing(event.metadata().level());
        if !level.admitted_by(self.logger.level()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = Record::now(level, self.logger.name(), visitor.finish());
        if let Err(e) = self.logger.handle(&record) {
            // tracing gives us no way to return the error
            eprintln!("logroute: failed to write record for {}: {}", self.logger.name(), e);
        }
    }
}

/// Visitor that flattens an event into one line of text.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        self.message + &self.fields
    }

    fn push_field(&mut self, field: &Field, value: impl std::fmt::Display) {
        let _ = write!(self.fields, " {}={}", field.name(), value);
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field, value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push_field(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push_field(field, value);
    }
}
