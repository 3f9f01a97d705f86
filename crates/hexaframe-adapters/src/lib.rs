//! Adapters for Hexaframe.
//!
//! - [`http`]: binds use cases to axum routes and maps outcomes to JSON.
//! - [`ports`]: production implementations of the core ports.
//! - [`memory`]: deterministic in-memory doubles for tests.

pub mod http;
pub mod memory;
pub mod ports;

// Re-export commonly used adapters
pub use http::{Endpoint, ErrorTable, JsonResponse, Payload, UseCaseHandle, build_router};
pub use memory::{
    FakeClock, InMemoryEventBus, InMemoryRepository, InMemoryUnitOfWork, RecordingLogger,
    SequentialUuid,
};
pub use ports::{RandomUuid, SystemClock, TracingLogger};
