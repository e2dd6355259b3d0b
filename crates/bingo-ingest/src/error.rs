use thiserror::Error;

/// Errors from picture ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upload is not a raster image this build can decode.
    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// The thumbnail could not be encoded.
    #[error("thumbnail encoding failed: {0}")]
    Encode(String),

    /// Reading or updating the card failed.
    #[error(transparent)]
    Card(#[from] bingo_card::CardError),

    /// Writing the thumbnail blob or resolving its URL failed.
    #[error("store error: {0}")]
    Store(#[from] bingo_store::StoreError),

    /// No fresh picture id could be drawn.
    #[error("picture id generation failed: {0}")]
    IdGeneration(String),

    /// A blocking image task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
