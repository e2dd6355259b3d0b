//! # bingo-ingest
//!
//! Picture ingestion: an uploaded image is decoded, scaled to a bounded
//! JPEG thumbnail, written to the blob store under a fresh picture id, and
//! appended to its card through the card update engine.
//!
//! Image work runs on the blocking thread pool. The card is checked for
//! existence before anything is written, so uploads to unknown cards leave
//! no blobs behind.
//!
//! # Key Types
//!
//! - [`IngestPipeline`] drives one upload from raw bytes to a linked picture
//! - [`Thumbnailer`] decodes, resizes and encodes images
//! - [`IdGenerator`] issues picture ids; [`RandomIds`] is the default
//! - [`IngestError`] is the error type for all ingestion operations

pub mod error;
pub mod ids;
pub mod pipeline;
pub mod thumbnail;

pub use error::{IngestError, IngestResult};
pub use ids::{IdGenerator, RandomIds};
pub use pipeline::{IngestPipeline, IngestStage};
pub use thumbnail::{Thumbnail, Thumbnailer};
