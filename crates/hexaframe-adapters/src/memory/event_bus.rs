//! Event bus that just remembers what was published.

use std::sync::{Arc, RwLock};

use super::{read, write};

#[derive(Debug)]
pub struct InMemoryEventBus<E> {
    events: Arc<RwLock<Vec<E>>>,
}

impl<E: Clone> InMemoryEventBus<E> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn publish(&self, event: E) {
        write(&self.events).push(event);
    }

    /// Published events, oldest first.
    pub fn events(&self) -> Vec<E> {
        read(&self.events).clone()
    }

    /// Remove and return everything published so far.
    pub fn drain(&self) -> Vec<E> {
        std::mem::take(&mut *write(&self.events))
    }

    pub fn clear(&self) {
        write(&self.events).clear();
    }
}

impl<E: Clone> Default for InMemoryEventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryEventBus<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}
