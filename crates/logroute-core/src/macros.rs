//! Formatting macros for the functional API.
//!
//! Each macro formats its arguments like `format!` and sends the message to
//! the primary logger of the process-wide default context, or of an explicit
//! context given as `ctx: <expr>,`. They evaluate to `LogResult<()>`.
//!
//! ```
//! use logroute_core::{log_info, LoggingContext};
//!
//! let ctx = LoggingContext::new("app");
//! // No primary logger yet: silently does nothing
//! log_info!(ctx: ctx, "listening on port {}", 6446).unwrap();
//! ```

#[macro_export]
macro_rules! log_fatal {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $ctx.log_fatal(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::log_fatal(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $ctx.log_error(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::log_error(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warning {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $ctx.log_warning(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::log_warning(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $ctx.log_info(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::log_info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $ctx.log_debug(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global::log_debug(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::{CaptureBuffer, LogLevel, LoggingContext, StreamHandler};
    use std::sync::Arc;

    #[test]
    fn test_macros_against_explicit_context() {
        let ctx = LoggingContext::new("macro_domain");
        ctx.create_logger("macro_domain").unwrap();
        ctx.set_log_level(LogLevel::Debug).unwrap();

        let buffer = CaptureBuffer::new();
        ctx.register_handler(Arc::new(StreamHandler::new(buffer.clone())))
            .unwrap();

        let x = 3;
        log_fatal!(ctx: ctx, "fatal {}", x).unwrap();
        log_error!(ctx: ctx, "error {}", x).unwrap();
        log_warning!(ctx: ctx, "warning {x}").unwrap();
        log_info!(ctx: ctx, "info {}", x).unwrap();
        log_debug!(ctx: &ctx, "debug {}", x).unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].ends_with("macro_domain FATAL fatal 3"));
        assert!(lines[2].ends_with("macro_domain WARNING warning 3"));
        assert!(lines[4].ends_with("macro_domain DEBUG debug 3"));
    }
}
