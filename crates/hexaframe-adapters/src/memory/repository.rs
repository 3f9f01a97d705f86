//! Keyed in-memory store.

use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::{Arc, RwLock},
};

use hexaframe_core::error::{HexaError, HexaResult};

use super::{read, write};

/// Key extractor for stored entities.
type IdOf<K, T> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Repository double keyed by whatever `id_of` returns.
///
/// `list` returns entities in insertion order.
pub struct InMemoryRepository<K, T> {
    inner: Arc<RwLock<RepoState<K, T>>>,
    id_of: IdOf<K, T>,
}

struct RepoState<K, T> {
    items: HashMap<K, T>,
    order: Vec<K>,
}

impl<K, T> InMemoryRepository<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug,
    T: Clone,
{
    pub fn new(id_of: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RepoState {
                items: HashMap::new(),
                order: Vec::new(),
            })),
            id_of: Arc::new(id_of),
        }
    }

    /// Insert a new entity. An existing key is a conflict.
    pub fn add(&self, entity: T) -> HexaResult<()> {
        let id = (self.id_of)(&entity);
        let mut state = write(&self.inner);
        if state.items.contains_key(&id) {
            return Err(HexaError::conflict_with(format!("{id:?} already exists")));
        }
        state.order.push(id.clone());
        state.items.insert(id, entity);
        Ok(())
    }

    /// Insert or replace.
    pub fn save(&self, entity: T) {
        let id = (self.id_of)(&entity);
        let mut state = write(&self.inner);
        if state.items.insert(id.clone(), entity).is_none() {
            state.order.push(id);
        }
    }

    pub fn get(&self, id: &K) -> HexaResult<T> {
        read(&self.inner)
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| HexaError::not_found_with(format!("{id:?} not found")))
    }

    pub fn find(&self, id: &K) -> Option<T> {
        read(&self.inner).items.get(id).cloned()
    }

    pub fn remove(&self, id: &K) -> HexaResult<T> {
        let mut state = write(&self.inner);
        let removed = state
            .items
            .remove(id)
            .ok_or_else(|| HexaError::not_found_with(format!("{id:?} not found")))?;
        state.order.retain(|k| k != id);
        Ok(removed)
    }

    pub fn list(&self) -> Vec<T> {
        let state = read(&self.inner);
        state
            .order
            .iter()
            .filter_map(|k| state.items.get(k).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        read(&self.inner).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = write(&self.inner);
        state.items.clear();
        state.order.clear();
    }
}

impl<K, T> Clone for InMemoryRepository<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            id_of: Arc::clone(&self.id_of),
        }
    }
}

impl<K, T> fmt::Debug for InMemoryRepository<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = read(&self.inner).items.len();
        f.debug_struct("InMemoryRepository").field("len", &len).finish()
    }
}
