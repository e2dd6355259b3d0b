use async_trait::async_trait;

use crate::blob::{BlobKey, Precondition, PutOutcome, StoredBlob};
use crate::error::StoreResult;

/// Key-value object store with generation-checked writes.
///
/// All implementations must satisfy these invariants:
/// - Every applied write assigns a new generation, strictly greater than any
///   generation previously assigned for the same key.
/// - A write is atomic: readers see either the old object or the new one.
/// - A write whose [`Precondition`] does not hold changes nothing and returns
///   [`PutOutcome::PreconditionFailed`], never an error.
/// - There is no read-modify-write primitive. Callers coordinate through
///   [`Precondition::IfGeneration`] alone.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the object at `key`.
    ///
    /// Returns `Ok(None)` if no object exists.
    async fn get(&self, key: &BlobKey) -> StoreResult<Option<StoredBlob>>;

    /// Write `data` at `key` if `precondition` holds.
    async fn put(
        &self,
        key: &BlobKey,
        data: Vec<u8>,
        content_type: &str,
        precondition: Precondition,
    ) -> StoreResult<PutOutcome>;

    /// Delete the object at `key`. Returns `true` if it existed.
    ///
    /// Intended for garbage collection of orphaned picture blobs only.
    async fn delete(&self, key: &BlobKey) -> StoreResult<bool>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &BlobKey) -> StoreResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Produces URLs from which stored blobs can be fetched by browsers.
#[async_trait]
pub trait UrlService: Send + Sync {
    /// Servable URL for the blob at `key`.
    async fn serving_url(&self, key: &BlobKey) -> StoreResult<String>;
}
