use std::fmt;

use bingo_types::{CardName, Generation, PictureId};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Content type of card documents.
pub const CARD_CONTENT_TYPE: &str = "application/json";

/// Content type of picture thumbnails.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

// ---------------------------------------------------------------------------
// BlobKey
// ---------------------------------------------------------------------------

/// Key of one object in the blob store.
///
/// Keys are `/`-separated paths. Every key used by Picture Bingo is built
/// from a validated [`CardName`], so each card owns exactly the keys under
/// its own prefix.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobKey(String);

impl BlobKey {
    /// Key of a card's document: `<card>/info`.
    pub fn card_info(card: &CardName) -> Self {
        Self(format!("{card}/info"))
    }

    /// Key of a picture's thumbnail: `<card>/<picture_id>`.
    pub fn picture(card: &CardName, picture: &PictureId) -> Self {
        Self(format!("{card}/{picture}"))
    }

    /// Parse an arbitrary key, e.g. one taken from a serving URL path.
    pub fn parse(key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let invalid = |reason: &str| StoreError::InvalidKey {
            key: key.clone(),
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(invalid("key must not be empty"));
        }
        if key.starts_with('/') || key.ends_with('/') {
            return Err(invalid("key must not start or end with '/'"));
        }
        if key.split('/').any(|c| c.is_empty() || c == "." || c == "..") {
            return Err(invalid("key components must be non-empty and not '.' or '..'"));
        }
        if key.chars().any(|c| c.is_control()) {
            return Err(invalid("key must not contain control characters"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first path component (the card name for all keys built here).
    pub fn prefix(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Stored blobs and write preconditions
// ---------------------------------------------------------------------------

/// A blob as returned by a read: bytes plus the generation they were
/// written at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    /// The stored bytes.
    pub data: Vec<u8>,
    /// MIME type recorded at write time.
    pub content_type: String,
    /// Generation assigned by the write that produced these bytes.
    pub generation: Generation,
}

impl StoredBlob {
    /// Size of `data` in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Condition a write must satisfy to be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    /// Create or overwrite unconditionally.
    None,
    /// Write only if no object exists at the key.
    DoesNotExist,
    /// Write only if the current object's generation equals this one.
    IfGeneration(Generation),
}

impl Precondition {
    /// Check the precondition against the generation currently stored at a
    /// key (`None` when the key is absent).
    pub fn holds(&self, current: Option<Generation>) -> bool {
        match self {
            Self::None => true,
            Self::DoesNotExist => current.is_none(),
            Self::IfGeneration(expected) => current == Some(*expected),
        }
    }
}

/// Result of a write that reached the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    /// The write was applied and assigned this generation.
    Stored(Generation),
    /// The precondition did not hold; nothing was written.
    PreconditionFailed,
}

impl PutOutcome {
    /// The new generation, if the write was applied.
    pub fn generation(&self) -> Option<Generation> {
        match self {
            Self::Stored(generation) => Some(*generation),
            Self::PreconditionFailed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> CardName {
        CardName::parse(name).unwrap()
    }

    #[test]
    fn card_info_key_layout() {
        let key = BlobKey::card_info(&card("card-x"));
        assert_eq!(key.as_str(), "card-x/info");
        assert_eq!(key.prefix(), "card-x");
    }

    #[test]
    fn picture_key_layout() {
        let id = PictureId::parse("00000000-0000-0000-0000-000000000001").unwrap();
        let key = BlobKey::picture(&card("card-x"), &id);
        assert_eq!(key.as_str(), "card-x/00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn parse_accepts_built_keys() {
        let key = BlobKey::card_info(&card("abc"));
        assert_eq!(BlobKey::parse(key.as_str()).unwrap(), key);
    }

    #[test]
    fn parse_rejects_traversal_and_empty_components() {
        assert!(BlobKey::parse("").is_err());
        assert!(BlobKey::parse("/abs").is_err());
        assert!(BlobKey::parse("a//b").is_err());
        assert!(BlobKey::parse("a/../b").is_err());
        assert!(BlobKey::parse("a/").is_err());
    }

    #[test]
    fn precondition_semantics() {
        let g1 = Generation::new(1);
        let g2 = Generation::new(2);

        assert!(Precondition::None.holds(None));
        assert!(Precondition::None.holds(Some(g1)));

        assert!(Precondition::DoesNotExist.holds(None));
        assert!(!Precondition::DoesNotExist.holds(Some(g1)));

        assert!(Precondition::IfGeneration(g1).holds(Some(g1)));
        assert!(!Precondition::IfGeneration(g1).holds(Some(g2)));
        assert!(!Precondition::IfGeneration(g1).holds(None));
    }

    #[test]
    fn put_outcome_generation() {
        let g = Generation::new(9);
        assert_eq!(PutOutcome::Stored(g).generation(), Some(g));
        assert_eq!(PutOutcome::PreconditionFailed.generation(), None);
    }
}
