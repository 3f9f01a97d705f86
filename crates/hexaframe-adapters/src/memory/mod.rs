//! In-memory adapters for testing.
//!
//! Every double is a cheap `Clone` handle over shared state, so a test can
//! keep one copy for assertions and hand another to the use case.

mod clock;
mod event_bus;
mod logger;
mod repository;
mod unit_of_work;
mod uuid_sequence;

pub use clock::FakeClock;
pub use event_bus::InMemoryEventBus;
pub use logger::{LogLevel, LogRecord, RecordingLogger};
pub use repository::InMemoryRepository;
pub use unit_of_work::{InMemoryUnitOfWork, UowEvent};
pub use uuid_sequence::SequentialUuid;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Poisoned locks are recovered; the data is plain test state.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
