//! Card name validation and generation.
//!
//! A card name becomes the first segment of every storage key that belongs
//! to the card (`<name>/info`, `<name>/<picture_id>`), so it must never be
//! able to address another card's objects.
//!
//! Valid card names:
//! - Must be non-empty and at most [`MAX_CARD_NAME_LEN`] characters
//! - Contain only ASCII letters, digits, `-` and `_`
//! - Must not start or end with `-` or `_`

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Longest accepted card name.
pub const MAX_CARD_NAME_LEN: usize = 64;

const ADJECTIVES: &[&str] = &[
    "amber", "brave", "breezy", "bright", "calm", "clever", "cosmic", "crisp", "dapper",
    "eager", "fancy", "fuzzy", "gentle", "golden", "happy", "jolly", "lucky", "mellow",
    "nimble", "plucky", "quiet", "rapid", "shiny", "silly", "snowy", "sunny", "swift",
    "tidy", "velvet", "witty", "zesty",
];

const NOUNS: &[&str] = &[
    "badger", "beacon", "canyon", "comet", "falcon", "fern", "garden", "harbor", "heron",
    "island", "lantern", "meadow", "otter", "panda", "pebble", "pepper", "puffin", "river",
    "rocket", "sparrow", "squid", "summit", "teapot", "thistle", "tiger", "walrus", "willow",
];

/// Validate a card name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use bingo_types::validate_card_name;
///
/// assert!(validate_card_name("sunny-otter-0042").is_ok());
/// assert!(validate_card_name("").is_err());
/// assert!(validate_card_name("../other").is_err());
/// ```
pub fn validate_card_name(name: &str) -> Result<(), TypeError> {
    let invalid = |reason: String| TypeError::InvalidCardName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("card name must not be empty".into()));
    }
    if name.len() > MAX_CARD_NAME_LEN {
        return Err(invalid(format!(
            "card name longer than {MAX_CARD_NAME_LEN} characters"
        )));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(format!("contains forbidden character: {ch:?}")));
    }
    if name.starts_with(['-', '_']) || name.ends_with(['-', '_']) {
        return Err(invalid("must not start or end with '-' or '_'".into()));
    }
    Ok(())
}

/// A validated card name.
///
/// The only ways to obtain one are [`CardName::parse`] and
/// [`CardName::generate`], so holding a `CardName` means the value is safe to
/// use as a storage key prefix.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardName(String);

impl CardName {
    /// Parse and validate a client-supplied card name.
    pub fn parse(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate_card_name(&name)?;
        Ok(Self(name))
    }

    /// Generate a fresh random name of the form `adjective-noun-NNNN`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("lucky");
        let noun = NOUNS.choose(rng).copied().unwrap_or("otter");
        let number: u16 = rng.gen_range(0..10_000);
        Self(format!("{adjective}-{noun}-{number:04}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardName({})", self.0)
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CardName> for String {
    fn from(name: CardName) -> Self {
        name.0
    }
}
