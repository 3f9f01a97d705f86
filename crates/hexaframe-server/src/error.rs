//! Server errors and their exit codes.

use std::error::Error as _;

use hexaframe_adapters::http::AdapterError;
use thiserror::Error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Config file unreadable, malformed, or holding bad values.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A route was wired up incorrectly.
    #[error("Invalid route: {0}")]
    Route(#[from] AdapterError),

    #[error("Logging error: {message}")]
    Logging { message: String },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Internal,
}

impl ServerError {
    pub fn config(err: &anyhow::Error) -> Self {
        Self::Config {
            message: format!("{err:#}"),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Route(_) | Self::Logging { .. } | Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit code. Usage errors (2) are reported by clap directly.
    pub const fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Emit a structured log event at the right severity.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Configuration => tracing::error!("Configuration error: {self}"),
            ErrorCategory::Internal => tracing::error!("Internal error: {self}"),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {source}");
        }
    }
}
