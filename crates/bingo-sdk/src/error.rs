use std::fmt;

use bingo_card::CardError;
use bingo_ingest::IngestError;
use bingo_store::StoreError;
use bingo_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{0}")]
    InvalidName(#[from] TypeError),

    #[error("blob not found: {0}")]
    BlobNotFound(String),

    #[error("no free card name after {attempts} attempts")]
    NamesExhausted { attempts: u32 },

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type SdkResult<T> = Result<T, SdkError>;

/// Coarse classification of an [`SdkError`], stable across layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    AlreadyExists,
    Contention,
    UnsupportedImage,
    MalformedDocument,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Contention => "contention",
            Self::UnsupportedImage => "unsupported_image_format",
            Self::MalformedDocument => "malformed_document",
            Self::Unavailable => "store_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName(_) => ErrorKind::InvalidInput,
            Self::BlobNotFound(_) => ErrorKind::NotFound,
            Self::NamesExhausted { .. } => ErrorKind::Contention,
            Self::Card(e) => card_kind(e),
            Self::Ingest(e) => match e {
                IngestError::UnsupportedImageFormat(_) => ErrorKind::UnsupportedImage,
                IngestError::Card(e) => card_kind(e),
                IngestError::Store(e) => store_kind(e),
                IngestError::IdGeneration(_) => ErrorKind::Unavailable,
                IngestError::Encode(_) | IngestError::Internal(_) => ErrorKind::Internal,
            },
            Self::Store(e) => store_kind(e),
        }
    }
}

fn card_kind(e: &CardError) -> ErrorKind {
    match e {
        CardError::NotFound { .. } => ErrorKind::NotFound,
        CardError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
        CardError::MalformedDocument(_) => ErrorKind::MalformedDocument,
        CardError::Encode(_) => ErrorKind::Internal,
        CardError::StoreUnavailable(e) => store_kind(e),
        CardError::Rejected { .. } => ErrorKind::InvalidInput,
        CardError::UpdateAbandoned { .. } => ErrorKind::Contention,
    }
}

fn store_kind(e: &StoreError) -> ErrorKind {
    match e {
        StoreError::InvalidKey { .. } => ErrorKind::InvalidInput,
        StoreError::Unavailable(_) | StoreError::Io(_) => ErrorKind::Unavailable,
    }
}
