//! System clock.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use hexaframe_core::ports::ClockPort;

/// Wall-clock time from the OS; monotonic time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_never_goes_backwards() {
        let clock = SystemClock::new();
        let a = clock.monotonic();
        let b = clock.monotonic();
        assert!(b >= a);
    }

    #[test]
    fn now_is_close_to_utc_now() {
        let clock = SystemClock::default();
        let delta = Utc::now() - clock.now();
        assert!(delta.num_seconds().abs() < 5);
    }
}
