//! Card documents for Picture Bingo.
//!
//! A card is a single JSON document stored at `<card>/info` in the blob
//! store. Many requests may append to the same card at once, and the store
//! offers no read-modify-write primitive, so all mutation goes through the
//! optimistic [`UpdateEngine`].
//!
//! # Architecture
//!
//! - **Codec** turns a [`Card`](bingo_types::Card) into bytes and back.
//! - **Repository** owns the card's storage key: create-if-absent,
//!   read-with-generation, and write-if-generation.
//! - **Engine** runs the compare-and-swap retry loop on top of the
//!   repository. It owns the retry policy; it never does storage I/O itself.
//!
//! # Modules
//!
//! - [`error`] -- Error types for card operations
//! - [`codec`] -- The [`CardCodec`]
//! - [`repository`] -- The [`CardRepository`] and [`WriteOutcome`]
//! - [`engine`] -- The [`UpdateEngine`] and its [`UpdatePolicy`]

pub mod codec;
pub mod engine;
pub mod error;
pub mod repository;

pub use codec::CardCodec;
pub use engine::{UpdateEngine, UpdatePolicy};
pub use error::{CardError, CardResult};
pub use repository::{CardRepository, WriteOutcome};
