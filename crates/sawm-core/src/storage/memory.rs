use std::sync::{Arc, Mutex, MutexGuard};

use super::{decode_state, encode_state, PersistentStore, StoredState};
use crate::error::PersistenceError;
use crate::state::AppState;

#[derive(Debug, Default)]
struct Inner {
    bytes: Option<String>,
    revision: u64,
    writes: usize,
    /// Saves still allowed to land; `None` means unlimited.
    writes_left: Option<usize>,
}

/// In-memory [`PersistentStore`].
///
/// Clones share the same slot, so a test can keep a handle after moving the
/// store into a [`StateStore`](crate::state::StateStore) and inspect exactly
/// which bytes were written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw stored bytes, as if written by an earlier run.
    pub fn with_bytes(raw: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().bytes = Some(raw.into());
        store
    }

    /// Like [`with_bytes`](Self::with_bytes), stamped with `revision`.
    pub fn with_bytes_at(raw: impl Into<String>, revision: u64) -> Self {
        let store = Self::with_bytes(raw);
        store.lock().revision = revision;
        store
    }

    /// Make subsequent saves fail with [`PersistenceError::WriteRejected`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().writes_left = fail.then_some(0);
    }

    /// Let `n` more saves land, then reject the rest.
    pub fn fail_after(&self, n: usize) {
        self.lock().writes_left = Some(n);
    }

    pub fn bytes(&self) -> Option<String> {
        self.lock().bytes.clone()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Number of saves that reached the slot.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistentStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredState>, PersistenceError> {
        let inner = self.lock();
        Ok(inner
            .bytes
            .as_deref()
            .and_then(decode_state)
            .map(|state| StoredState {
                state,
                revision: inner.revision,
            }))
    }

    fn stored_revision(&self) -> Result<u64, PersistenceError> {
        Ok(self.lock().revision)
    }

    fn save(&mut self, state: &AppState, revision: u64) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.writes_left == Some(0) {
            return Err(PersistenceError::WriteRejected("memory store is read-only".into()));
        }
        if revision < inner.revision {
            return Err(PersistenceError::StaleRevision {
                attempted: revision,
                stored: inner.revision,
            });
        }
        inner.bytes = Some(encode_state(state)?);
        inner.revision = revision;
        inner.writes += 1;
        if let Some(left) = inner.writes_left.as_mut() {
            *left -= 1;
        }
        Ok(())
    }
}
