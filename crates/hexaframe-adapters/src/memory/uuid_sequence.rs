//! Deterministic UUID provider.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use hexaframe_core::ports::UuidPort;
use uuid::Uuid;

/// Hands out `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Debug, Clone, Default)]
pub struct SequentialUuid {
    next: Arc<AtomicU64>,
}

impl SequentialUuid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl UuidPort for SequentialUuid {
    fn v4(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
