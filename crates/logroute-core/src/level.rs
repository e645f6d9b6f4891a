//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::LogError;

/// Severity of a record, and the threshold loggers and handlers filter on.
///
/// Ordered from most to least severe. A record passes a threshold when
/// `record_level <= threshold`, so `NotSet` (the largest value) admits
/// everything.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    #[default]
    Warning = 2,
    Info = 3,
    Debug = 4,
    /// Unrestricted threshold; never used as a record's own level
    NotSet = 5,
}

impl LogLevel {
    /// Every level a record can carry, most severe first.
    pub const RECORD_LEVELS: [LogLevel; 5] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Upper-case word used in rendered lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::NotSet => "NOTSET",
        }
    }

    /// Whether a record at `self` passes a `threshold`.
    #[inline]
    pub fn admitted_by(self, threshold: LogLevel) -> bool {
        self <= threshold
    }

    pub(crate) fn from_u8(value: u8) -> LogLevel {
        match value {
            0 => LogLevel::Fatal,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::NotSet,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "notset" => Ok(LogLevel::NotSet),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
