//! Ports: the dependencies a use case may ask for.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. `hexaframe-adapters` implements them
//! (`TracingLogger`, `SystemClock`, `RandomUuid`, plus in-memory doubles).
//!
//! Use cases receive ports by explicit construction, typically as
//! `Arc<dyn ClockPort>` fields.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::error::{HexaError, HexaResult};

/// Structured fields attached to a log record.
pub type Fields = Map<String, Value>;

/// Minimal structured logger port.
pub trait LoggerPort: Send + Sync {
    fn debug(&self, message: &str, fields: &Fields);
    fn info(&self, message: &str, fields: &Fields);
    fn warning(&self, message: &str, fields: &Fields);
    fn error(&self, message: &str, fields: &Fields);
}

/// Clock abstraction so time-dependent logic stays deterministic in tests.
pub trait ClockPort: Send + Sync {
    /// Wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Time elapsed on a monotonic clock since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
}

/// UUID provider.
pub trait UuidPort: Send + Sync {
    fn v4(&self) -> Uuid;

    /// Parse a textual UUID. Malformed input is a validation fault.
    fn parse(&self, value: &str) -> HexaResult<Uuid> {
        parse_uuid(value)
    }
}

/// Shared parsing used by [`UuidPort::parse`].
pub fn parse_uuid(value: &str) -> HexaResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        HexaError::validation(format!("invalid uuid: {e}")).with_detail("value", value)
    })
}

// ============================================================================
// Unit of Work
// ============================================================================

/// Transaction boundary.
///
/// The core never opens transactions on its own; use cases that need one
/// hold a unit of work and wrap their side effects with
/// [`run_in_unit_of_work`].
#[cfg_attr(test, mockall::automock)]
pub trait UnitOfWork: Send {
    fn begin(&mut self) -> HexaResult<()>;
    fn commit(&mut self) -> HexaResult<()>;
    fn rollback(&mut self) -> HexaResult<()>;
}

/// Suspend-capable transaction boundary.
#[async_trait]
pub trait AsyncUnitOfWork: Send {
    async fn begin(&mut self) -> HexaResult<()>;
    async fn commit(&mut self) -> HexaResult<()>;
    async fn rollback(&mut self) -> HexaResult<()>;
}

/// Run `work` inside `uow`: begin, then commit on `Ok` or roll back on `Err`.
///
/// A failed rollback is logged; the error returned is always the one `work`
/// produced.
pub fn run_in_unit_of_work<U, T, F>(uow: &mut U, work: F) -> HexaResult<T>
where
    U: UnitOfWork + ?Sized,
    F: FnOnce() -> HexaResult<T>,
{
    uow.begin()?;
    match work() {
        Ok(value) => {
            uow.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = uow.rollback() {
                warn!(error = %rollback, original = %err, "Rollback failed");
            }
            Err(err)
        }
    }
}

/// Async counterpart of [`run_in_unit_of_work`].
pub async fn run_in_unit_of_work_async<U, T, Fut>(uow: &mut U, work: Fut) -> HexaResult<T>
where
    U: AsyncUnitOfWork + ?Sized,
    Fut: Future<Output = HexaResult<T>>,
{
    uow.begin().await?;
    match work.await {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = uow.rollback().await {
                warn!(error = %rollback, original = %err, "Rollback failed");
            }
            Err(err)
        }
    }
}
