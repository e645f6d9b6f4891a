//! Log record value type.
//!
//! A record is built once per log call and handed to exactly one logger.
//! Handlers only ever read it.

use std::borrow::Cow;

use chrono::{DateTime, Local, SubsecRound, Utc};

use crate::level::LogLevel;

/// Timestamp layout used in every rendered line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    level: LogLevel,
    process_id: u32,
    timestamp: DateTime<Utc>,
    logger_name: String,
    message: String,
}

impl Record {
    /// Create a record from explicit parts.
    ///
    /// The timestamp is truncated to whole seconds.
    pub fn new(
        level: LogLevel,
        process_id: u32,
        timestamp: DateTime<Utc>,
        logger_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            process_id,
            timestamp: timestamp.trunc_subsecs(0),
            logger_name: logger_name.into(),
            message: message.into(),
        }
    }

    /// Create a record stamped with the current process id and time.
    pub fn now(level: LogLevel, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, std::process::id(), Utc::now(), logger_name, message)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Timestamp rendered in local time as `YYYY-MM-DD HH:MM:SS`.
    pub fn rendered_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Render the line handlers write, including the trailing newline.
    ///
    /// Line breaks inside the name or message are escaped as `\n` / `\r`
    /// so one record always yields exactly one line.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {}\n",
            self.rendered_timestamp(),
            escape_line_breaks(&self.logger_name),
            self.level,
            escape_line_breaks(&self.message)
        )
    }
}

fn escape_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('\n', "\\n").replace('\r', "\\r"))
}
