//! Error types for card operations.

use bingo_types::CardName;
use thiserror::Error;

/// Errors that can occur while reading or updating cards.
///
/// A lost compare-and-swap race is not listed here: it is reported as
/// [`WriteOutcome::Conflict`](crate::WriteOutcome::Conflict) and consumed by
/// the update engine.
#[derive(Debug, Error)]
pub enum CardError {
    /// No card document exists under this name.
    #[error("card not found: {name}")]
    NotFound { name: CardName },

    /// A card with this name already exists.
    #[error("card already exists: {name}")]
    AlreadyExists { name: CardName },

    /// The stored bytes are not a well-formed card document.
    #[error("malformed card document: {0}")]
    MalformedDocument(String),

    /// The card could not be serialized.
    #[error("card encoding failed: {0}")]
    Encode(String),

    /// The store failed at the transport level.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] bingo_store::StoreError),

    /// The update transform refused to produce a new card.
    #[error("update of {name} rejected: {reason}")]
    Rejected { name: CardName, reason: String },

    /// Every attempt of an update lost its compare-and-swap race.
    #[error("update of {name} abandoned after {attempts} conflicting attempts")]
    UpdateAbandoned { name: CardName, attempts: u32 },
}

/// Convenience type alias for card operations.
pub type CardResult<T> = std::result::Result<T, CardError>;
