use std::fmt;
use std::sync::Arc;

use bingo_card::UpdateEngine;
use bingo_store::{BlobKey, Precondition, UrlService, THUMBNAIL_CONTENT_TYPE};
use bingo_types::{CardName, Picture};

use crate::error::{IngestError, IngestResult};
use crate::ids::IdGenerator;
use crate::thumbnail::{Thumbnail, Thumbnailer};

// ---------------------------------------------------------------------------
// IngestStage
// ---------------------------------------------------------------------------

/// Progress of one upload through the pipeline.
///
/// `Received -> Decoded -> Resized -> Stored -> Linked -> Done`. A picture is
/// visible to card readers only once it reaches `Linked`. A failed upload is
/// logged with the last stage it reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestStage {
    Received,
    Decoded,
    Resized,
    Stored,
    Linked,
    Done,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::Decoded => "decoded",
            Self::Resized => "resized",
            Self::Stored => "stored",
            Self::Linked => "linked",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// IngestPipeline
// ---------------------------------------------------------------------------

/// Turns raw uploads into pictures linked to a card.
#[derive(Clone)]
pub struct IngestPipeline {
    engine: UpdateEngine,
    urls: Arc<dyn UrlService>,
    ids: Arc<dyn IdGenerator>,
    thumbnailer: Thumbnailer,
}

impl IngestPipeline {
    pub fn new(
        engine: UpdateEngine,
        urls: Arc<dyn UrlService>,
        ids: Arc<dyn IdGenerator>,
        thumbnailer: Thumbnailer,
    ) -> Self {
        Self {
            engine,
            urls,
            ids,
            thumbnailer,
        }
    }

    pub fn thumbnailer(&self) -> &Thumbnailer {
        &self.thumbnailer
    }

    /// Thumbnail `upload`, store it, and append it to `card`.
    ///
    /// A failure after the thumbnail blob is written but before the card
    /// update commits leaves that blob orphaned; it is logged with its key
    /// and left for garbage collection.
    pub async fn add_picture(&self, card: &CardName, upload: Vec<u8>) -> IngestResult<Picture> {
        let mut stage = IngestStage::Received;
        let result = self.run(card, upload, &mut stage).await;
        match &result {
            Ok(picture) => {
                tracing::info!(card = %card, cloud_id = %picture.cloud_id, "picture added");
            }
            Err(e) => {
                tracing::warn!(card = %card, reached = %stage, error = %e, "picture ingestion failed");
            }
        }
        result
    }

    async fn run(
        &self,
        card: &CardName,
        upload: Vec<u8>,
        stage: &mut IngestStage,
    ) -> IngestResult<Picture> {
        // Reject uploads to missing or unreadable cards before any blob exists.
        self.engine.repository().read(card).await?;

        let thumbnailer = self.thumbnailer;
        let image = blocking(move || thumbnailer.decode(&upload)).await?;
        *stage = IngestStage::Decoded;

        let thumbnail: Thumbnail = blocking(move || thumbnailer.render(&image)).await?;
        *stage = IngestStage::Resized;
        tracing::debug!(card = %card, width = thumbnail.width, height = thumbnail.height, "thumbnail rendered");

        let id = self.ids.next_id()?;
        let key = BlobKey::picture(card, &id);
        self.engine
            .repository()
            .store()
            .put(&key, thumbnail.data, THUMBNAIL_CONTENT_TYPE, Precondition::None)
            .await?;
        *stage = IngestStage::Stored;

        let picture = match self.urls.serving_url(&key).await {
            Ok(url) => Picture::new(id.to_string(), url),
            Err(e) => {
                tracing::warn!(%key, "orphaned picture blob: no serving url");
                return Err(e.into());
            }
        };

        let linked = picture.clone();
        if let Err(e) = self
            .engine
            .update(card, move |current| Ok(current.with_picture(linked.clone())))
            .await
        {
            tracing::warn!(%key, "orphaned picture blob: card update failed");
            return Err(e.into());
        }
        *stage = IngestStage::Linked;

        tracing::debug!(card = %card, %key, "picture linked");
        *stage = IngestStage::Done;
        Ok(picture)
    }
}

impl fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("engine", &self.engine)
            .field("thumbnailer", &self.thumbnailer)
            .finish_non_exhaustive()
    }
}

/// Run CPU-bound image work off the async worker threads.
async fn blocking<T, F>(f: F) -> IngestResult<T>
where
    F: FnOnce() -> IngestResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| IngestError::Internal(format!("image task failed: {e}")))?
}
