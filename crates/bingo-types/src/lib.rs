//! Foundation types for Picture Bingo.
//!
//! This crate provides the identity and data-model types shared by every
//! other `bingo-*` crate.
//!
//! # Key Types
//!
//! - [`CardName`] -- Validated card name, used as the storage key prefix
//! - [`PictureId`] -- Random UUID identifying one uploaded picture
//! - [`Generation`] -- Opaque version token returned by the blob store
//! - [`Card`] -- The card document: an ordered list of pictures
//! - [`Picture`] -- One thumbnailed image linked to a card

pub mod card;
pub mod error;
pub mod generation;
pub mod name;
pub mod picture;

pub use card::Card;
pub use error::TypeError;
pub use generation::Generation;
pub use name::{validate_card_name, CardName, MAX_CARD_NAME_LEN};
pub use picture::{Picture, PictureId};
