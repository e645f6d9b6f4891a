//! Stream and file sink output

use std::fs;
use std::sync::Arc;

use chrono::DateTime;
use logroute_core::{CaptureBuffer, FileHandler, LogError, LogLevel, Logger, Record, StreamHandler};
use tempfile::TempDir;

fn epoch_record() -> Record {
    let epoch = DateTime::from_timestamp(0, 0).unwrap();
    Record::new(LogLevel::Info, std::process::id(), epoch, "my_module", "Message")
}

#[test]
fn test_stream_handler_line() {
    let logger = Logger::with_level("my_module", LogLevel::NotSet);
    let buffer = CaptureBuffer::new();
    logger.add_handler(Arc::new(StreamHandler::new(buffer.clone())));

    assert_eq!(buffer.len(), 0);
    let record = epoch_record();
    logger.handle(&record).unwrap();
    assert!(!buffer.is_empty());

    let text = buffer.contents();
    assert!(text.starts_with(&format!("{} my_module INFO", record.rendered_timestamp())));
    assert!(text.ends_with("Message\n"));
}

#[test]
fn test_file_handler_matches_stream_format() {
    assert!(matches!(
        FileHandler::new("/something/very/unlikely/to/exist"),
        Err(LogError::OpenLogFile { .. })
    ));

    let temp = TempDir::new().unwrap();
    let log_file = temp.path().join(format!("log4-{}.log", std::process::id()));

    let logger = Logger::with_level("my_module", LogLevel::NotSet);
    let buffer = CaptureBuffer::new();
    logger.add_handler(Arc::new(FileHandler::new(&log_file).unwrap()));
    logger.add_handler(Arc::new(StreamHandler::new(buffer.clone())));

    let record = epoch_record();
    logger.handle(&record).unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<_> = content.lines().collect();

    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(&format!("{} my_module INFO", record.rendered_timestamp())));
    assert!(lines[0].ends_with("Message"));
    assert_eq!(content, buffer.contents());
}

#[test]
fn test_shared_file_handler_across_loggers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shared.log");
    let handler: Arc<FileHandler> = Arc::new(FileHandler::new(&path).unwrap());

    let routing = Logger::with_level("routing", LogLevel::Info);
    let cache = Logger::with_level("cache", LogLevel::Info);
    routing.add_handler(handler.clone());
    cache.add_handler(handler.clone());

    routing.log(LogLevel::Info, format_args!("route ready")).unwrap();
    cache.log(LogLevel::Warning, format_args!("cache stale")).unwrap();
    drop(routing);
    drop(cache);

    let content = fs::read_to_string(handler.path()).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("routing INFO route ready"));
    assert!(lines[1].ends_with("cache WARNING cache stale"));
}
