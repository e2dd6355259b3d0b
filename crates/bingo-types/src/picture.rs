use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Identifier for one uploaded picture.
///
/// A `PictureId` is a random (v4) UUID. It names the thumbnail blob
/// (`<card>/<picture_id>`) and becomes the picture's `cloud_id` once linked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PictureId(Uuid);

impl PictureId {
    /// Generate a fresh random identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse from the hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidPictureId(e.to_string()))
    }
}

impl fmt::Debug for PictureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PictureId({})", self.0.hyphenated())
    }
}

impl fmt::Display for PictureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// One thumbnailed picture linked to a card.
///
/// Both fields are assigned once during ingestion and never change.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Picture {
    /// Opaque unique identifier (the picture id in string form).
    pub cloud_id: String,
    /// URL from which the thumbnail can be fetched.
    pub web_url: String,
}

impl Picture {
    pub fn new(cloud_id: impl Into<String>, web_url: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            web_url: web_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_differ() {
        let a = PictureId::new_random();
        let b = PictureId::new_random();
        assert_ne!(a, b);
    }

    #[test]
    fn display_parse_roundtrip() {
        let id = PictureId::new_random();
        let parsed = PictureId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn display_is_lowercase_hyphenated() {
        let id = PictureId::from_uuid(Uuid::from_u128(0xABCD));
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-00000000abcd");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            PictureId::parse("not-a-uuid"),
            Err(TypeError::InvalidPictureId(_))
        ));
    }
}
