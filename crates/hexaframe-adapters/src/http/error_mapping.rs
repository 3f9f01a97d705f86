//! Mapping from [`HexaError`] to status codes and error envelopes.
//!
//! The table is an ordered list evaluated top to bottom; the first entry
//! whose matcher accepts the error wins. Put narrow matchers (a single
//! [`ErrorKind`]) before broad ones (a whole [`ErrorFamily`]).

use axum::http::StatusCode;
use hexaframe_core::error::{Details, ErrorFamily, ErrorKind, HexaError, codes};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JsonResponse;

/// What a table entry matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMatch {
    /// Exactly this kind.
    Kind(ErrorKind),
    /// Any kind in this family.
    Family(ErrorFamily),
}

impl ErrorMatch {
    pub fn matches(self, err: &HexaError) -> bool {
        match self {
            Self::Kind(kind) => kind == err.kind(),
            Self::Family(family) => family == err.family(),
        }
    }
}

/// One row of the error table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMapping {
    pub matcher: ErrorMatch,
    pub status: StatusCode,
    /// Used when the error carries no code of its own.
    pub default_code: String,
}

impl ErrorMapping {
    pub fn new(matcher: ErrorMatch, status: StatusCode, default_code: impl Into<String>) -> Self {
        Self {
            matcher,
            status,
            default_code: default_code.into(),
        }
    }

    pub fn kind(kind: ErrorKind, status: StatusCode, default_code: impl Into<String>) -> Self {
        Self::new(ErrorMatch::Kind(kind), status, default_code)
    }

    pub fn family(family: ErrorFamily, status: StatusCode, default_code: impl Into<String>) -> Self {
        Self::new(ErrorMatch::Family(family), status, default_code)
    }
}

/// Ordered, first-match-wins error table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTable {
    entries: Vec<ErrorMapping>,
}

impl ErrorTable {
    pub const fn new(entries: Vec<ErrorMapping>) -> Self {
        Self { entries }
    }

    /// Append an entry at the lowest precedence.
    #[must_use]
    pub fn with(mut self, entry: ErrorMapping) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[ErrorMapping] {
        &self.entries
    }

    /// First entry matching `err`.
    pub fn lookup(&self, err: &HexaError) -> Option<&ErrorMapping> {
        self.entries.iter().find(|entry| entry.matcher.matches(err))
    }

    /// Build the response for `err`. Unmatched errors become 400.
    pub fn map(&self, err: &HexaError) -> JsonResponse {
        match self.lookup(err) {
            Some(entry) => envelope(entry.status, err, &entry.default_code),
            None => envelope(StatusCode::BAD_REQUEST, err, codes::ERROR),
        }
    }
}

impl Default for ErrorTable {
    fn default() -> Self {
        Self::new(vec![
            ErrorMapping::kind(
                ErrorKind::Validation,
                StatusCode::UNPROCESSABLE_ENTITY,
                codes::VALIDATION_ERROR,
            ),
            ErrorMapping::kind(ErrorKind::NotFound, StatusCode::NOT_FOUND, codes::NOT_FOUND),
            ErrorMapping::kind(ErrorKind::Conflict, StatusCode::CONFLICT, codes::CONFLICT),
            ErrorMapping::kind(
                ErrorKind::PermissionDenied,
                StatusCode::FORBIDDEN,
                codes::PERMISSION_DENIED,
            ),
            ErrorMapping::kind(
                ErrorKind::Infra,
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INFRA_ERROR,
            ),
        ])
    }
}

/// Map an error with the default table.
pub fn default_error_mapper(err: &HexaError) -> JsonResponse {
    ErrorTable::default().map(err)
}

// ============================================================================
// Envelope
// ============================================================================

/// `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Details>,
}

impl ErrorBody {
    /// The error's own code and message win over the table default.
    pub fn from_error(err: &HexaError, default_code: &str) -> Self {
        let code = if err.code().is_empty() {
            default_code
        } else {
            err.code()
        };
        let message = if err.message().is_empty() {
            err.to_string()
        } else {
            err.message().to_owned()
        };

        Self {
            code: code.to_owned(),
            message,
            details: err.details().cloned(),
        }
    }
}

fn envelope(status: StatusCode, err: &HexaError, default_code: &str) -> JsonResponse {
    let envelope = ErrorEnvelope {
        error: ErrorBody::from_error(err, default_code),
    };
    // Plain strings and a string-keyed map; serialization cannot fail.
    let body = serde_json::to_value(&envelope).unwrap_or(Value::Null);
    JsonResponse::new(status, body)
}
