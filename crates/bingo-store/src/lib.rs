//! Blob storage for Picture Bingo.
//!
//! This crate defines the narrow object-store interface the rest of the
//! system is written against, modelled on managed object stores: every
//! object has a key, bytes, a content type and a *generation*, and writes can
//! be made conditional on the generation currently stored.
//!
//! # Key Types
//!
//! - [`BlobKey`] -- `/`-separated object key (`<card>/info`, `<card>/<picture>`)
//! - [`StoredBlob`] -- bytes plus the generation they were written at
//! - [`Precondition`] -- `None`, `DoesNotExist` or `IfGeneration(g)`
//! - [`PutOutcome`] -- `Stored(g)` or `PreconditionFailed`
//!
//! # Backends
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and single-process use
//! - [`PrefixUrlService`] -- serving URLs under a fixed public base URL
//!
//! # Design Rules
//!
//! 1. A failed precondition is a normal outcome, not an error.
//! 2. Each write is atomic; there is no multi-key transaction.
//! 3. The store never interprets object contents.
//! 4. All backend errors are propagated, never silently ignored.

pub mod blob;
pub mod error;
pub mod memory;
pub mod traits;
pub mod url;

// Re-export primary types at crate root for ergonomic imports.
pub use blob::{
    BlobKey, Precondition, PutOutcome, StoredBlob, CARD_CONTENT_TYPE, THUMBNAIL_CONTENT_TYPE,
};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBlobStore;
pub use traits::{BlobStore, UrlService};
pub use url::PrefixUrlService;
