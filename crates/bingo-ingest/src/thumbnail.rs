use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{IngestError, IngestResult};

/// An encoded thumbnail ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    /// JPEG bytes.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Turns uploaded images into bounded JPEG thumbnails.
///
/// Every step is a pure function of its input: the same upload and bounds
/// always produce the same thumbnail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thumbnailer {
    max_dim: u32,
    quality: u8,
}

impl Thumbnailer {
    /// Default bound on both thumbnail dimensions.
    pub const DEFAULT_MAX_DIM: u32 = 320;
    /// Default JPEG quality.
    pub const DEFAULT_QUALITY: u8 = 85;

    pub fn new(max_dim: u32) -> Self {
        Self {
            max_dim: max_dim.max(1),
            quality: Self::DEFAULT_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn max_dim(&self) -> u32 {
        self.max_dim
    }

    /// Decode an upload of any supported raster format.
    pub fn decode(&self, upload: &[u8]) -> IngestResult<DynamicImage> {
        image::load_from_memory(upload)
            .map_err(|e| IngestError::UnsupportedImageFormat(e.to_string()))
    }

    /// Scale `image` to fit within `max_dim` x `max_dim`, keeping its aspect
    /// ratio. Images already within bounds are returned unchanged.
    pub fn resize_to_fit(&self, image: &DynamicImage) -> DynamicImage {
        if image.width() <= self.max_dim && image.height() <= self.max_dim {
            return image.clone();
        }
        image.resize(self.max_dim, self.max_dim, FilterType::CatmullRom)
    }

    /// Encode as baseline JPEG. Alpha is dropped.
    pub fn encode_jpeg(&self, image: &DynamicImage) -> IngestResult<Thumbnail> {
        let rgb = image.to_rgb8();
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(Cursor::new(&mut data), self.quality)
            .encode_image(&rgb)
            .map_err(|e| IngestError::Encode(e.to_string()))?;
        Ok(Thumbnail {
            data,
            width: rgb.width(),
            height: rgb.height(),
        })
    }

    /// Resize then encode.
    pub fn render(&self, image: &DynamicImage) -> IngestResult<Thumbnail> {
        self.encode_jpeg(&self.resize_to_fit(image))
    }

    /// Decode, resize and encode in one step.
    pub fn thumbnail(&self, upload: &[u8]) -> IngestResult<Thumbnail> {
        self.render(&self.decode(upload)?)
    }
}

impl Default for Thumbnailer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DIM)
    }
}
