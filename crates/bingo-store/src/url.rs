use async_trait::async_trait;

use crate::blob::BlobKey;
use crate::error::StoreResult;
use crate::traits::UrlService;

/// Serves blobs from a fixed public base URL: `<base>/<key>`.
///
/// With the built-in server this is `http://<host>/v1/blobs`, which streams
/// blobs back out of the configured store. A CDN in front of a bucket works
/// the same way with its own base URL.
#[derive(Clone, Debug)]
pub struct PrefixUrlService {
    base_url: String,
}

impl PrefixUrlService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UrlService for PrefixUrlService {
    async fn serving_url(&self, key: &BlobKey) -> StoreResult<String> {
        Ok(format!("{}/{}", self.base_url, key))
    }
}
