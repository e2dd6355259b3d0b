use bingo_types::PictureId;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{IngestError, IngestResult};

/// Source of picture identifiers.
///
/// Implementations must never return the same id twice: picture blobs are
/// written without a precondition, so id uniqueness is what keeps two
/// uploads from overwriting each other. A generator that cannot produce a
/// fresh id must fail rather than fall back to a weaker one.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> IngestResult<PictureId>;
}

/// Random 128-bit (UUID v4) identifiers drawn from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> IngestResult<PictureId> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| IngestError::IdGeneration(e.to_string()))?;
        Ok(PictureId::from_uuid(
            uuid::Builder::from_random_bytes(bytes).into_uuid(),
        ))
    }
}
