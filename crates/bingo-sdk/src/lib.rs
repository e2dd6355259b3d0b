//! High-level API for Picture Bingo.
//!
//! [`PictureBingo`] wires one blob store, URL service and id generator into
//! the card update engine and the ingestion pipeline. This is the main entry
//! point for the HTTP server and for applications embedding Picture Bingo.

pub mod error;
pub mod service;

pub use error::{ErrorKind, SdkError, SdkResult};
pub use service::{PictureBingo, PictureBingoBuilder, MAX_NAME_ATTEMPTS};

// Re-export key types
pub use bingo_card::UpdatePolicy;
pub use bingo_ingest::Thumbnailer;
pub use bingo_store::{BlobStore, InMemoryBlobStore, PrefixUrlService, StoredBlob, UrlService};
pub use bingo_types::{Card, CardName, Picture};
