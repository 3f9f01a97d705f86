//! Random (v4) UUID provider.

use hexaframe_core::ports::UuidPort;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuid;

impl UuidPort for RandomUuid {
    fn v4(&self) -> Uuid {
        Uuid::new_v4()
    }
}
