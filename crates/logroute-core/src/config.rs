//! Start-up configuration.
//!
//! [`LoggingConfig`] describes which loggers a program wants and where their
//! output goes. [`LoggingConfig::apply`] turns it into registered loggers that
//! share a single sink.
//!
//! ```json
//! {
//!   "level": "info",
//!   "folder": "/var/log/router",
//!   "loggers": ["routing", "metadata_cache"],
//!   "overrides": { "routing": "debug" }
//! }
//! ```
//!
//! With an empty or missing `folder` the shared sink is standard error;
//! otherwise it is `<folder>/<program>.log`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::context::LoggingContext;
use crate::error::{LogError, LogResult};
use crate::handler::{FileHandler, SharedHandler, StreamHandler};
use crate::level::LogLevel;
use crate::logger::Logger;

/// Logging settings read at start-up.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for every configured logger without an override
    pub level: LogLevel,

    /// Directory for the log file; standard error when absent
    pub folder: Option<PathBuf>,

    /// Module loggers to create besides the primary logger
    pub loggers: Vec<String>,

    /// Per-logger levels
    pub overrides: HashMap<String, LogLevel>,
}

impl LoggingConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> LogResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LogError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> LogResult<()> {
        if self.loggers.iter().any(|name| name.trim().is_empty()) {
            return Err(LogError::Config("logger names must not be empty".into()));
        }
        Ok(())
    }

    /// Reject overrides for loggers that would never be created.
    ///
    /// `primary` is the name of the context's primary logger, which is
    /// always created.
    pub fn check_overrides(&self, primary: &str) -> LogResult<()> {
        let mut unknown: Vec<&str> = self
            .overrides
            .keys()
            .map(String::as_str)
            .filter(|name| *name != primary && !self.loggers.iter().any(|l| l == name))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }

        unknown.sort_unstable();
        Err(LogError::Config(format!(
            "overrides name unknown loggers: {}",
            unknown.join(", ")
        )))
    }

    /// Level a given logger ends up with.
    pub fn level_for(&self, name: &str) -> LogLevel {
        self.overrides.get(name).copied().unwrap_or(self.level)
    }

    /// File the shared sink appends to, if any.
    pub fn log_file(&self, program: &str) -> Option<PathBuf> {
        self.folder
            .as_ref()
            .filter(|folder| !folder.as_os_str().is_empty())
            .map(|folder| folder.join(format!("{}.log", program)))
    }

    /// Build the sink every configured logger shares.
    pub fn build_handler(&self, program: &str) -> LogResult<SharedHandler> {
        match self.log_file(program) {
            Some(path) => Ok(Arc::new(FileHandler::new(path)?)),
            None => Ok(Arc::new(StreamHandler::stderr())),
        }
    }

    /// Names to create: the primary logger first, then the module loggers.
    fn logger_names(&self, ctx: &LoggingContext) -> Vec<String> {
        let mut names = vec![ctx.primary_name().to_string()];
        for name in &self.loggers {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Create and configure the loggers in `ctx`.
    ///
    /// Returns the shared handler so the caller can detach it later. Nothing
    /// is registered if an override names an unknown logger, any of the
    /// names is already taken, or the sink cannot be opened.
    pub fn apply(&self, ctx: &LoggingContext, program: &str) -> LogResult<SharedHandler> {
        self.check_overrides(ctx.primary_name())?;

        let names = self.logger_names(ctx);
        if let Some(taken) = names.iter().find(|name| ctx.get_logger(name).is_some()) {
            return Err(LogError::DuplicateLogger(taken.clone()));
        }

        let handler = self.build_handler(program)?;

        // Fully configured before they become visible in the registry
        let loggers = names
            .iter()
            .map(|name| {
                let logger = Logger::with_level(name.as_str(), self.level_for(name));
                logger.add_handler(handler.clone());
                logger
            })
            .collect();
        ctx.add_loggers(loggers)?;

        tracing::info!(
            program,
            loggers = names.len(),
            file = ?self.log_file(program),
            "logging configured"
        );
        Ok(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::Layer;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_json_str("{}").unwrap();
        assert_eq!(config.level, LogLevel::Warning);
        assert!(config.folder.is_none());
        assert!(config.loggers.is_empty());
        assert_eq!(config.log_file("router"), None);
    }

    #[test]
    fn test_parse_full_document() {
        let config = LoggingConfig::from_json_str(
            r#"{
                "level": "info",
                "folder": "/var/log/router",
                "loggers": ["routing", "metadata_cache"],
                "overrides": { "routing": "debug" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.level_for("routing"), LogLevel::Debug);
        assert_eq!(config.level_for("metadata_cache"), LogLevel::Info);
        assert_eq!(
            config.log_file("router"),
            Some(PathBuf::from("/var/log/router/router.log"))
        );
    }

    #[test]
    fn test_empty_folder_means_stderr() {
        let config = LoggingConfig::from_json_str(r#"{ "folder": "" }"#).unwrap();
        assert_eq!(config.log_file("router"), None);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            LoggingConfig::from_json_str(r#"{ "level": "chatty" }"#),
            Err(LogError::Config(_))
        ));
        assert!(matches!(
            LoggingConfig::from_json_str(r#"{ "colour": true }"#),
            Err(LogError::Config(_))
        ));
        assert!(matches!(
            LoggingConfig::from_json_str(r#"{ "loggers": [""] }"#),
            Err(LogError::Config(_))
        ));
    }

    #[test]
    fn test_apply_creates_loggers_sharing_one_file() {
        let temp = TempDir::new().unwrap();
        let config = LoggingConfig {
            level: LogLevel::Info,
            folder: Some(temp.path().to_path_buf()),
            loggers: vec!["routing".into(), "main".into()],
            overrides: HashMap::from([("routing".to_string(), LogLevel::Debug)]),
        };

        let ctx = LoggingContext::new("main");
        config.apply(&ctx, "router").unwrap();

        assert_eq!(ctx.logger_names(), vec!["main", "routing"]);
        assert_eq!(ctx.primary_logger().unwrap().level(), LogLevel::Info);

        let routing = ctx.get_logger("routing").unwrap();
        assert_eq!(routing.level(), LogLevel::Debug);
        assert_eq!(routing.handler_count(), 1);

        routing.log(LogLevel::Debug, format_args!("route added")).unwrap();
        ctx.log_info(format_args!("started")).unwrap();

        let content = std::fs::read_to_string(temp.path().join("router.log")).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("routing DEBUG route added"));
        assert!(lines[1].ends_with("main INFO started"));
    }

    #[test]
    fn test_apply_refuses_taken_names() {
        let ctx = LoggingContext::new("main");
        ctx.create_logger("routing").unwrap();

        let config = LoggingConfig {
            loggers: vec!["routing".into()],
            ..Default::default()
        };

        assert!(matches!(
            config.apply(&ctx, "router"),
            Err(LogError::DuplicateLogger(ref n)) if n == "routing"
        ));
        assert!(ctx.primary_logger().is_none());
    }

    #[test]
    fn test_apply_reports_unopenable_folder() {
        let config = LoggingConfig {
            folder: Some(PathBuf::from("/something/very/unlikely/to/exist")),
            ..Default::default()
        };
        let ctx = LoggingContext::new("main");

        assert!(matches!(
            config.apply(&ctx, "router"),
            Err(LogError::OpenLogFile { .. })
        ));
        assert!(ctx.logger_names().is_empty());
    }

    #[test]
    fn test_unknown_override_rejected() {
        let config = LoggingConfig::from_json_str(
            r#"{ "loggers": ["routing"], "overrides": { "rotuing": "debug", "main": "info" } }"#,
        )
        .unwrap();
        assert!(config.check_overrides("main").is_err());

        let ctx = LoggingContext::new("main");
        let err = config.apply(&ctx, "router").err().unwrap();
        assert!(matches!(err, LogError::Config(ref msg) if msg.contains("rotuing")));
        assert!(ctx.logger_names().is_empty());
    }

    #[test]
    fn test_override_for_primary_accepted() {
        let config = LoggingConfig {
            overrides: HashMap::from([("main".to_string(), LogLevel::Debug)]),
            ..Default::default()
        };
        config.check_overrides("main").unwrap();
        assert!(config.check_overrides("other").is_err());
    }

    /// Registers a logger from inside the subscriber, racing `apply`.
    struct RegisterOnEvent {
        ctx: Arc<LoggingContext>,
        name: &'static str,
    }

    impl<S: Subscriber> Layer<S> for RegisterOnEvent {
        fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
            let _ = self.ctx.create_logger(self.name);
        }
    }

    #[test]
    fn test_apply_leaves_context_unchanged_when_name_taken_meanwhile() {
        let temp = TempDir::new().unwrap();
        let ctx = Arc::new(LoggingContext::new("main"));
        let config = LoggingConfig {
            folder: Some(temp.path().to_path_buf()),
            loggers: vec!["routing".into()],
            ..Default::default()
        };

        // Opening the log file emits an event, which claims "routing"
        let subscriber = tracing_subscriber::registry().with(RegisterOnEvent {
            ctx: ctx.clone(),
            name: "routing",
        });
        let result = tracing::subscriber::with_default(subscriber, || config.apply(&ctx, "router"));

        assert!(matches!(result, Err(LogError::DuplicateLogger(ref n)) if n == "routing"));
        assert_eq!(ctx.logger_names(), vec!["routing"]);
        assert!(ctx.primary_logger().is_none());
        assert_eq!(ctx.get_logger("routing").unwrap().handler_count(), 0);
    }
}
