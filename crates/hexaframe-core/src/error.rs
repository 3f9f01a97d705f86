//! Stable error taxonomy for Hexaframe.
//!
//! Every failure a use case can report is a [`HexaError`]: a stable
//! machine-readable `code`, a human-readable `message` and optional
//! structured `details`. The [`ErrorKind`] tag sorts it into one of the two
//! families:
//!
//! - **Domain** faults: business-rule violations (validation, not-found,
//!   conflict, permission denied, or any other code a use case defines).
//! - **Infra** faults: database, network, serialization and other runtime
//!   failures.
//!
//! The transport adapter matches on the tag, never on the message.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Structured context attached to an error. Insertion order is preserved.
pub type Details = Map<String, Value>;

/// Result type returned by use-case hooks and ports.
pub type HexaResult<T> = Result<T, HexaError>;

/// The two disjoint fault families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFamily {
    /// Business-rule violations.
    Domain,
    /// Infrastructure and runtime faults.
    Infra,
}

/// Concrete error kinds.
///
/// Adding a new domain condition does not require a new variant: use
/// [`HexaError::domain`] with a custom code. New variants only make sense
/// when the boundary needs to treat the condition differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    PermissionDenied,
    /// Any other business-rule violation; the code is caller-defined.
    Domain,
    /// Infrastructure fault; the code is caller-defined.
    Infra,
}

impl ErrorKind {
    pub const fn family(self) -> ErrorFamily {
        match self {
            Self::Validation
            | Self::NotFound
            | Self::Conflict
            | Self::PermissionDenied
            | Self::Domain => ErrorFamily::Domain,
            Self::Infra => ErrorFamily::Infra,
        }
    }

    /// The fixed code for kinds that have one.
    pub const fn fixed_code(self) -> Option<&'static str> {
        match self {
            Self::Validation => Some(codes::VALIDATION_ERROR),
            Self::NotFound => Some(codes::NOT_FOUND),
            Self::Conflict => Some(codes::CONFLICT),
            Self::PermissionDenied => Some(codes::PERMISSION_DENIED),
            Self::Domain | Self::Infra => None,
        }
    }
}

/// Stable error codes.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const PERMISSION_DENIED: &str = "permission_denied";
    pub const INFRA_ERROR: &str = "infra_error";
    pub const SERIALIZATION_ERROR: &str = "serialization_error";
    pub const ERROR: &str = "error";
}

const DEFAULT_NOT_FOUND: &str = "Resource not found";
const DEFAULT_CONFLICT: &str = "Conflict";
const DEFAULT_PERMISSION_DENIED: &str = "Permission denied";

/// Base error carried through the execution engine.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message}{}", DetailsSuffix(.details.as_ref()))]
pub struct HexaError {
    kind: ErrorKind,
    code: String,
    message: String,
    #[serde(default)]
    details: Option<Details>,
}

impl HexaError {
    fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    // ========================================================================
    // Domain errors
    // ========================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, codes::VALIDATION_ERROR, message)
    }

    pub fn not_found() -> Self {
        Self::not_found_with(DEFAULT_NOT_FOUND)
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, codes::NOT_FOUND, message)
    }

    pub fn conflict() -> Self {
        Self::conflict_with(DEFAULT_CONFLICT)
    }

    pub fn conflict_with(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, codes::CONFLICT, message)
    }

    pub fn permission_denied() -> Self {
        Self::permission_denied_with(DEFAULT_PERMISSION_DENIED)
    }

    pub fn permission_denied_with(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, codes::PERMISSION_DENIED, message)
    }

    /// A business-rule violation with a caller-defined code.
    pub fn domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, code, message)
    }

    // ========================================================================
    // Infrastructure errors
    // ========================================================================

    /// An infrastructure fault with a caller-defined code.
    pub fn infra(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infra, code, message)
    }

    /// Wrap any error as an infrastructure fault, keeping its display text.
    pub fn infra_from(code: impl Into<String>, source: &dyn std::error::Error) -> Self {
        Self::infra(code, source.to_string())
    }

    // ========================================================================
    // Details
    // ========================================================================

    /// Replace the details map.
    #[must_use]
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Append a single detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Details::new)
            .insert(key.into(), value.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn family(&self) -> ErrorFamily {
        self.kind.family()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Details, treating an empty map the same as none.
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref().filter(|d| !d.is_empty())
    }

    pub const fn is_domain(&self) -> bool {
        matches!(self.kind.family(), ErrorFamily::Domain)
    }

    pub const fn is_infra(&self) -> bool {
        matches!(self.kind.family(), ErrorFamily::Infra)
    }
}

struct DetailsSuffix<'a>(Option<&'a Details>);

impl fmt::Display for DetailsSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(details) if !details.is_empty() => {
                // Map<String, Value> always serialises; fall back to Debug anyway.
                match serde_json::to_string(details) {
                    Ok(json) => write!(f, " details={json}"),
                    Err(_) => write!(f, " details={details:?}"),
                }
            }
            _ => Ok(()),
        }
    }
}
