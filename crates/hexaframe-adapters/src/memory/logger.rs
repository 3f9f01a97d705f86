//! Logger that keeps every record for later assertions.

use std::sync::{Arc, RwLock};

use hexaframe_core::ports::{Fields, LoggerPort};

use super::{read, write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<RwLock<Vec<LogRecord>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, in order.
    pub fn records(&self) -> Vec<LogRecord> {
        read(&self.records).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        read(&self.records)
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn at_level(&self, level: LogLevel) -> Vec<LogRecord> {
        read(&self.records)
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        write(&self.records).clear();
    }

    fn push(&self, level: LogLevel, message: &str, fields: &Fields) {
        write(&self.records).push(LogRecord {
            level,
            message: message.to_owned(),
            fields: fields.clone(),
        });
    }
}

impl LoggerPort for RecordingLogger {
    fn debug(&self, message: &str, fields: &Fields) {
        self.push(LogLevel::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &Fields) {
        self.push(LogLevel::Info, message, fields);
    }

    fn warning(&self, message: &str, fields: &Fields) {
        self.push(LogLevel::Warning, message, fields);
    }

    fn error(&self, message: &str, fields: &Fields) {
        self.push(LogLevel::Error, message, fields);
    }
}
