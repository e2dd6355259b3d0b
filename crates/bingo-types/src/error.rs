use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid card name {name:?}: {reason}")]
    InvalidCardName { name: String, reason: String },

    #[error("invalid picture id: {0}")]
    InvalidPictureId(String),
}
