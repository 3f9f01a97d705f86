//! Hexaframe Core - use-case execution for hexagonal applications
//!
//! This crate holds the parts every driving adapter relies on: a typed
//! outcome, a stable error taxonomy, the use-case lifecycle engine and the
//! port traits use cases depend on. It knows nothing about HTTP.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     hexaframe-adapters (Transport)      │
//! │  Endpoint: parse → execute → map reply  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Execution Engine               │
//! │  validate → before → perform → after    │
//! │      (UseCase / AsyncUseCase)           │
//! └──────────────────┬──────────────────────┘
//!                    │ produces
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Outcome<T, HexaError> + ErrorKind     │
//! └─────────────────────────────────────────┘
//!                    ▲
//!                    │ implemented by adapters
//! ┌─────────────────────────────────────────┐
//! │   Ports: Logger, Clock, Uuid, UoW       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use hexaframe_core::prelude::*;
//!
//! struct AddOne;
//!
//! impl UseCase for AddOne {
//!     type Input = i64;
//!     type Output = i64;
//!
//!     fn validate(&self, input: &i64) -> HexaResult<()> {
//!         if *input < 0 {
//!             return Err(HexaError::validation("must be non-negative"));
//!         }
//!         Ok(())
//!     }
//!
//!     fn perform(&self, input: i64) -> HexaResult<i64> {
//!         Ok(input + 1)
//!     }
//! }
//!
//! assert_eq!(AddOne.execute(1), Outcome::Ok(2));
//! assert_eq!(AddOne.execute(-1).unwrap_err().code(), "validation_error");
//! ```

pub mod error;
pub mod outcome;
pub mod ports;
pub mod serialize;
pub mod use_case;

pub use async_trait::async_trait;

// Public API - what adapters and applications should use
pub mod prelude {
    pub use async_trait::async_trait;

    pub use crate::error::{Details, ErrorFamily, ErrorKind, HexaError, HexaResult};
    pub use crate::outcome::Outcome;
    pub use crate::ports::{
        AsyncUnitOfWork, ClockPort, Fields, LoggerPort, UnitOfWork, UuidPort, run_in_unit_of_work,
        run_in_unit_of_work_async,
    };
    pub use crate::serialize::ToSerializable;
    pub use crate::use_case::{AsyncUseCase, UseCase, UseCaseOutcome};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
