//! Deterministic clock.

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use chrono::{DateTime, TimeZone, Utc};
use hexaframe_core::ports::ClockPort;

use super::{read, write};

#[derive(Debug)]
struct ClockState {
    now: DateTime<Utc>,
    monotonic: Duration,
}

/// Clock that only moves when told to.
///
/// Starts at 2024-01-01T00:00:00Z with a zero monotonic reading.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<RwLock<ClockState>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ClockState {
                now,
                monotonic: Duration::ZERO,
            })),
        }
    }

    /// Move both readings forward.
    pub fn advance(&self, by: Duration) {
        let mut state = write(&self.inner);
        state.monotonic += by;
        state.now += by;
    }

    /// Jump the wall clock without touching the monotonic reading.
    pub fn set(&self, now: DateTime<Utc>) {
        write(&self.inner).now = now;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        read(&self.inner).now
    }

    fn monotonic(&self) -> Duration {
        read(&self.inner).monotonic
    }
}
