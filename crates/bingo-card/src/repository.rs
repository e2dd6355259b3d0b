//! The [`CardRepository`]: card-shaped access to the blob store.
//!
//! The repository is the only component that touches a card's document key.
//! It does no caching: every call is one round-trip to the store.

use std::sync::Arc;

use bingo_store::{BlobKey, BlobStore, Precondition, PutOutcome, CARD_CONTENT_TYPE};
use bingo_types::{Card, CardName, Generation};

use crate::codec::CardCodec;
use crate::error::{CardError, CardResult};

/// Result of a conditional card write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document was replaced and now has this generation.
    Written(Generation),
    /// Another writer committed since the expected generation was read.
    Conflict,
}

/// Reads and writes card documents at `<card>/info`.
#[derive(Clone)]
pub struct CardRepository {
    store: Arc<dyn BlobStore>,
}

impl CardRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// The underlying blob store.
    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Fetch and decode the card stored under `name`.
    pub async fn read(&self, name: &CardName) -> CardResult<(Card, Generation)> {
        let key = BlobKey::card_info(name);
        let blob = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| CardError::NotFound { name: name.clone() })?;
        let card = CardCodec::decode(&blob.data).inspect_err(|e| {
            tracing::warn!(card = %name, generation = %blob.generation, error = %e, "undecodable card document");
        })?;
        Ok((card, blob.generation))
    }

    /// Write the first version of a card.
    ///
    /// Fails with [`CardError::AlreadyExists`] if any document already lives
    /// under `name`; creation never overwrites another card.
    pub async fn create_initial(&self, name: &CardName, card: &Card) -> CardResult<Generation> {
        let key = BlobKey::card_info(name);
        let data = CardCodec::encode(card)?;
        match self
            .store
            .put(&key, data, CARD_CONTENT_TYPE, Precondition::DoesNotExist)
            .await?
        {
            PutOutcome::Stored(generation) => {
                tracing::debug!(card = %name, %generation, "card created");
                Ok(generation)
            }
            PutOutcome::PreconditionFailed => Err(CardError::AlreadyExists { name: name.clone() }),
        }
    }

    /// Replace the card only if its stored generation is still `expected`.
    pub async fn write_if_version(
        &self,
        name: &CardName,
        card: &Card,
        expected: Generation,
    ) -> CardResult<WriteOutcome> {
        let key = BlobKey::card_info(name);
        let data = CardCodec::encode(card)?;
        let outcome = self
            .store
            .put(&key, data, CARD_CONTENT_TYPE, Precondition::IfGeneration(expected))
            .await?;
        Ok(match outcome {
            PutOutcome::Stored(generation) => WriteOutcome::Written(generation),
            PutOutcome::PreconditionFailed => WriteOutcome::Conflict,
        })
    }
}

impl std::fmt::Debug for CardRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRepository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_store::InMemoryBlobStore;
    use bingo_types::Picture;

    fn name(s: &str) -> CardName {
        CardName::parse(s).unwrap()
    }

    fn setup() -> (Arc<InMemoryBlobStore>, CardRepository) {
        let store = Arc::new(InMemoryBlobStore::new());
        let repo = CardRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn create_then_read() {
        let (_, repo) = setup();
        let generation = repo.create_initial(&name("card-x"), &Card::new()).await.unwrap();
        let (card, read_generation) = repo.read(&name("card-x")).await.unwrap();
        assert!(card.is_empty());
        assert_eq!(read_generation, generation);
    }

    #[tokio::test]
    async fn read_missing_card() {
        let (_, repo) = setup();
        let err = repo.read(&name("ghost")).await.unwrap_err();
        assert!(matches!(err, CardError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_existing_card_fails() {
        let (_, repo) = setup();
        repo.create_initial(&name("dup"), &Card::new()).await.unwrap();
        let err = repo.create_initial(&name("dup"), &Card::new()).await.unwrap_err();
        assert!(matches!(err, CardError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let (_, repo) = setup();
        let card = Card::new().with_picture(Picture::new("a", "u"));
        repo.create_initial(&name("same"), &card).await.unwrap();

        let first = repo.read(&name("same")).await.unwrap();
        let second = repo.read(&name("same")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn write_with_current_generation() {
        let (_, repo) = setup();
        let g1 = repo.create_initial(&name("c"), &Card::new()).await.unwrap();
        let updated = Card::new().with_picture(Picture::new("a", "u"));

        let outcome = repo.write_if_version(&name("c"), &updated, g1).await.unwrap();
        let WriteOutcome::Written(g2) = outcome else {
            panic!("expected a write, got {outcome:?}");
        };
        assert!(g2 > g1);
        assert_eq!(repo.read(&name("c")).await.unwrap(), (updated, g2));
    }

    #[tokio::test]
    async fn write_with_stale_generation_conflicts() {
        let (_, repo) = setup();
        let g1 = repo.create_initial(&name("c"), &Card::new()).await.unwrap();
        let winner = Card::new().with_picture(Picture::new("win", "u"));
        repo.write_if_version(&name("c"), &winner, g1).await.unwrap();

        let loser = Card::new().with_picture(Picture::new("lose", "u"));
        let outcome = repo.write_if_version(&name("c"), &loser, g1).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Conflict);
        assert_eq!(repo.read(&name("c")).await.unwrap().0, winner);
    }

    #[tokio::test]
    async fn malformed_document_is_reported() {
        let (store, repo) = setup();
        store
            .put(
                &BlobKey::card_info(&name("bad")),
                b"not json".to_vec(),
                CARD_CONTENT_TYPE,
                Precondition::None,
            )
            .await
            .unwrap();
        let err = repo.read(&name("bad")).await.unwrap_err();
        assert!(matches!(err, CardError::MalformedDocument(_)));
    }

    #[tokio::test]
    async fn store_outage_is_reported() {
        let (store, repo) = setup();
        store.set_offline(true);
        let err = repo.read(&name("c")).await.unwrap_err();
        assert!(matches!(err, CardError::StoreUnavailable(_)));
    }
}
