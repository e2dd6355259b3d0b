/// Errors from blob store operations.
///
/// A failed write precondition is deliberately *not* an error: it is the
/// expected outcome of a race and is reported as
/// [`PutOutcome::PreconditionFailed`](crate::PutOutcome::PreconditionFailed).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key is not usable as a storage key.
    #[error("invalid blob key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The backend could not be reached or failed mid-request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
