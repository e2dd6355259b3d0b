use serde::{Deserialize, Serialize};

use crate::picture::Picture;

/// The card document: one bingo game's picture collection.
///
/// The card's name is not part of the document; it is the storage key the
/// document lives under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Pictures in the order they were linked.
    pub pictures: Vec<Picture>,
}

impl Card {
    /// An empty card, as written by card creation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this card with `picture` appended.
    pub fn with_picture(&self, picture: Picture) -> Self {
        let mut pictures = self.pictures.clone();
        pictures.push(picture);
        Self { pictures }
    }

    /// Look up a picture by its cloud id.
    pub fn picture(&self, cloud_id: &str) -> Option<&Picture> {
        self.pictures.iter().find(|p| p.cloud_id == cloud_id)
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_is_empty() {
        let card = Card::new();
        assert!(card.is_empty());
        assert_eq!(card.len(), 0);
    }

    #[test]
    fn with_picture_appends_without_mutating() {
        let card = Card::new().with_picture(Picture::new("a", "http://x/a"));
        let next = card.with_picture(Picture::new("b", "http://x/b"));
        assert_eq!(card.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.pictures[1].cloud_id, "b");
        assert!(next.picture("a").is_some());
        assert!(next.picture("zzz").is_none());
    }
}
