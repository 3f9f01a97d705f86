//! Unit of work that records its transitions.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use hexaframe_core::{
    error::{HexaError, HexaResult},
    ports::{AsyncUnitOfWork, UnitOfWork},
};

use super::{read, write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UowEvent {
    Begin,
    Commit,
    Rollback,
}

#[derive(Debug, Default)]
struct UowState {
    events: Vec<UowEvent>,
    fail_commit: bool,
}

/// Both sync and async unit of work; nothing is actually transactional.
///
/// `failing_commit` makes every commit return an infra fault, for testing
/// how callers handle a transaction that cannot be finalised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWork {
    inner: Arc<RwLock<UowState>>,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_commit() -> Self {
        let uow = Self::new();
        write(&uow.inner).fail_commit = true;
        uow
    }

    pub fn events(&self) -> Vec<UowEvent> {
        read(&self.inner).events.clone()
    }

    pub fn committed(&self) -> bool {
        self.events().contains(&UowEvent::Commit)
    }

    pub fn rolled_back(&self) -> bool {
        self.events().contains(&UowEvent::Rollback)
    }

    fn record(&self, event: UowEvent) -> HexaResult<()> {
        let mut state = write(&self.inner);
        state.events.push(event);
        if event == UowEvent::Commit && state.fail_commit {
            return Err(HexaError::infra("commit_failed", "commit rejected"));
        }
        Ok(())
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn begin(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Begin)
    }

    fn commit(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Commit)
    }

    fn rollback(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Rollback)
    }
}

#[async_trait]
impl AsyncUnitOfWork for InMemoryUnitOfWork {
    async fn begin(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Begin)
    }

    async fn commit(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Commit)
    }

    async fn rollback(&mut self) -> HexaResult<()> {
        self.record(UowEvent::Rollback)
    }
}
