use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bingo_types::Generation;

use crate::blob::{BlobKey, Precondition, PutOutcome, StoredBlob};
use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

#[derive(Default)]
struct Inner {
    objects: HashMap<BlobKey, StoredBlob>,
    last_generation: u64,
}

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and single-process deployments. Generations come from
/// one store-wide counter, so they are unique across keys as well as
/// monotonic per key. The lock only makes each individual `put` atomic; it
/// does not coordinate callers.
pub struct InMemoryBlobStore {
    inner: RwLock<Inner>,
    offline: AtomicBool,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate an outage: while offline every call fails with
    /// [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_inner()?.objects.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Return a sorted list of all keys under `prefix`.
    pub fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<BlobKey>> {
        let inner = self.read_inner()?;
        let mut keys: Vec<BlobKey> = inner
            .objects
            .keys()
            .filter(|k| k.as_str().starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }

    fn read_inner(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write_inner(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &BlobKey) -> StoreResult<Option<StoredBlob>> {
        self.check_online()?;
        let inner = self.read_inner()?;
        Ok(inner.objects.get(key).cloned())
    }

    async fn put(
        &self,
        key: &BlobKey,
        data: Vec<u8>,
        content_type: &str,
        precondition: Precondition,
    ) -> StoreResult<PutOutcome> {
        self.check_online()?;
        let mut inner = self.write_inner()?;

        let current = inner.objects.get(key).map(|blob| blob.generation);
        if !precondition.holds(current) {
            tracing::trace!(%key, ?precondition, ?current, "precondition failed");
            return Ok(PutOutcome::PreconditionFailed);
        }

        inner.last_generation += 1;
        let generation = Generation::new(inner.last_generation);
        inner.objects.insert(
            key.clone(),
            StoredBlob {
                data,
                content_type: content_type.to_string(),
                generation,
            },
        );
        Ok(PutOutcome::Stored(generation))
    }

    async fn delete(&self, key: &BlobKey) -> StoreResult<bool> {
        self.check_online()?;
        let mut inner = self.write_inner()?;
        Ok(inner.objects.remove(key).is_some())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("object_count", &self.len().ok())
            .field("offline", &self.offline.load(Ordering::SeqCst))
            .finish()
    }
}
