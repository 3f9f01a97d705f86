//! Production implementations of the core ports.

mod clock;
mod logger;
mod uuid_provider;

pub use clock::SystemClock;
pub use logger::TracingLogger;
pub use uuid_provider::RandomUuid;
