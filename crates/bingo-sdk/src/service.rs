use std::sync::Arc;

use bingo_card::{CardError, CardRepository, UpdateEngine, UpdatePolicy};
use bingo_ingest::{IdGenerator, IngestPipeline, RandomIds, Thumbnailer};
use bingo_store::{BlobKey, BlobStore, InMemoryBlobStore, PrefixUrlService, StoredBlob, UrlService};
use bingo_types::{Card, CardName, Picture};

use crate::error::{SdkError, SdkResult};

/// How many generated names `create_card` tries before giving up.
pub const MAX_NAME_ATTEMPTS: u32 = 8;

/// High-level Picture Bingo API.
///
/// One instance per process, shared behind an `Arc`. All state lives in the
/// blob store, so any number of instances may point at the same store.
#[derive(Clone, Debug)]
pub struct PictureBingo {
    engine: UpdateEngine,
    pipeline: IngestPipeline,
}

impl PictureBingo {
    pub fn builder(store: Arc<dyn BlobStore>, urls: Arc<dyn UrlService>) -> PictureBingoBuilder {
        PictureBingoBuilder {
            store,
            urls,
            ids: Arc::new(RandomIds),
            policy: UpdatePolicy::default(),
            thumbnailer: Thumbnailer::default(),
        }
    }

    /// A service over a fresh in-memory store, serving blobs under `base_url`.
    pub fn in_memory(base_url: &str) -> Self {
        Self::builder(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(PrefixUrlService::new(base_url)),
        )
        .build()
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        self.engine.repository().store()
    }

    pub fn policy(&self) -> &UpdatePolicy {
        self.engine.policy()
    }

    // ---- Cards ----

    /// Create an empty card under a freshly generated name.
    pub async fn create_card(&self) -> SdkResult<CardName> {
        self.create_card_from(|| CardName::generate(&mut rand::thread_rng()))
            .await
    }

    /// Create an empty card under `name`. Fails with `AlreadyExists` if the
    /// name is taken.
    pub async fn create_card_named(&self, name: &CardName) -> SdkResult<()> {
        self.engine
            .repository()
            .create_initial(name, &Card::new())
            .await?;
        tracing::info!(card = %name, "card created");
        Ok(())
    }

    async fn create_card_from<F>(&self, mut next_name: F) -> SdkResult<CardName>
    where
        F: FnMut() -> CardName + Send,
    {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = next_name();
            match self.create_card_named(&name).await {
                Ok(()) => return Ok(name),
                Err(SdkError::Card(CardError::AlreadyExists { .. })) => {
                    tracing::debug!(card = %name, "generated card name taken; drawing another");
                }
                Err(e) => return Err(e),
            }
        }
        Err(SdkError::NamesExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    pub async fn get_card(&self, name: &str) -> SdkResult<Card> {
        let name = CardName::parse(name)?;
        let (card, _) = self.engine.repository().read(&name).await?;
        Ok(card)
    }

    // ---- Pictures ----

    pub async fn add_picture(&self, name: &str, upload: Vec<u8>) -> SdkResult<Picture> {
        let name = CardName::parse(name)?;
        Ok(self.pipeline.add_picture(&name, upload).await?)
    }

    /// Fetch a stored blob (a card document or a thumbnail) by key.
    pub async fn read_blob(&self, key: &str) -> SdkResult<StoredBlob> {
        let key = BlobKey::parse(key)?;
        self.store()
            .get(&key)
            .await?
            .ok_or_else(|| SdkError::BlobNotFound(key.to_string()))
    }
}

/// Wires a [`PictureBingo`] from its collaborators.
pub struct PictureBingoBuilder {
    store: Arc<dyn BlobStore>,
    urls: Arc<dyn UrlService>,
    ids: Arc<dyn IdGenerator>,
    policy: UpdatePolicy,
    thumbnailer: Thumbnailer,
}

impl PictureBingoBuilder {
    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn thumbnailer(mut self, thumbnailer: Thumbnailer) -> Self {
        self.thumbnailer = thumbnailer;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn build(self) -> PictureBingo {
        let engine = UpdateEngine::new(CardRepository::new(self.store), self.policy);
        let pipeline = IngestPipeline::new(engine.clone(), self.urls, self.ids, self.thumbnailer);
        PictureBingo { engine, pipeline }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicU32, Ordering};

    use bingo_store::{Precondition, THUMBNAIL_CONTENT_TYPE};
    use bingo_types::PictureId;
    use image::{DynamicImage, ImageFormat, RgbImage};

    use crate::error::ErrorKind;

    const BASE_URL: &str = "http://localhost:8080/v1/blobs";

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 90]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn new_card_is_empty() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        let card = bingo.get_card(name.as_str()).await.unwrap();
        assert!(card.is_empty());
    }

    #[tokio::test]
    async fn created_names_are_distinct() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let a = bingo.create_card().await.unwrap();
        let b = bingo.create_card().await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn taken_names_are_redrawn() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let taken = CardName::parse("lucky-otter-0001").unwrap();
        bingo.create_card_named(&taken).await.unwrap();

        let draws = AtomicU32::new(0);
        let name = bingo
            .create_card_from(|| {
                if draws.fetch_add(1, Ordering::SeqCst) < 2 {
                    taken.clone()
                } else {
                    CardName::parse("brave-heron-0002").unwrap()
                }
            })
            .await
            .unwrap();

        assert_eq!(name.as_str(), "brave-heron-0002");
        assert_eq!(draws.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn name_generation_gives_up() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let taken = CardName::parse("lucky-otter-0001").unwrap();
        bingo.create_card_named(&taken).await.unwrap();

        let err = bingo.create_card_from(|| taken.clone()).await.unwrap_err();
        assert!(matches!(err, SdkError::NamesExhausted { attempts: MAX_NAME_ATTEMPTS }));
    }

    #[tokio::test]
    async fn recreating_a_card_is_rejected() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        bingo.add_picture(name.as_str(), png(4, 4)).await.unwrap();

        let err = bingo.create_card_named(&name).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(bingo.get_card(name.as_str()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_card_is_not_found() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let err = bingo.get_card("nobody-home").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn invalid_names_never_reach_the_store() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        for bad in ["", "../etc", "a/info", "white space"] {
            let err = bingo.get_card(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{bad:?}");
        }
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        bingo.add_picture(name.as_str(), png(4, 4)).await.unwrap();

        let repository = bingo.engine.repository();
        let first = repository.read(&name).await.unwrap();
        let second = repository.read(&name).await.unwrap();
        assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // Pictures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn added_picture_is_visible_and_served() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();

        let picture = bingo.add_picture(name.as_str(), png(600, 300)).await.unwrap();
        assert_eq!(bingo.get_card(name.as_str()).await.unwrap().pictures, vec![picture.clone()]);

        let id = PictureId::parse(&picture.cloud_id).unwrap();
        let key = format!("{name}/{id}");
        assert_eq!(picture.web_url, format!("{BASE_URL}/{key}"));

        let blob = bingo.read_blob(&key).await.unwrap();
        assert_eq!(blob.content_type, THUMBNAIL_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn garbage_upload_is_unsupported() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        let err = bingo.add_picture(name.as_str(), vec![0u8; 64]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedImage);
        assert!(bingo.get_card(name.as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupted_card_is_reported_as_malformed() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        bingo
            .store()
            .put(
                &BlobKey::card_info(&name),
                b"{\"pictures\": 7}".to_vec(),
                "application/json",
                Precondition::None,
            )
            .await
            .unwrap();

        let err = bingo.add_picture(name.as_str(), png(4, 4)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[tokio::test]
    async fn custom_thumbnail_bound_is_applied() {
        let bingo = PictureBingo::builder(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(PrefixUrlService::new(BASE_URL)),
        )
        .thumbnailer(Thumbnailer::new(50))
        .build();
        let name = bingo.create_card().await.unwrap();
        let picture = bingo.add_picture(name.as_str(), png(200, 100)).await.unwrap();

        let id = PictureId::parse(&picture.cloud_id).unwrap();
        let blob = bingo.read_blob(&format!("{name}/{id}")).await.unwrap();
        let thumb = image::load_from_memory(&blob.data).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (50, 25));
    }

    // -----------------------------------------------------------------------
    // Blobs
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn card_documents_are_readable_as_blobs() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let name = bingo.create_card().await.unwrap();
        let blob = bingo.read_blob(&format!("{name}/info")).await.unwrap();
        assert_eq!(blob.data, b"{\"pictures\":[]}");
    }

    #[tokio::test]
    async fn missing_and_invalid_blob_keys() {
        let bingo = PictureBingo::in_memory(BASE_URL);
        let missing = bingo.read_blob("nobody/info").await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        let invalid = bingo.read_blob("../secret").await.unwrap_err();
        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);
    }
}
