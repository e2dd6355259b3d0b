use std::sync::Arc;

use bingo_ingest::Thumbnailer;
use bingo_sdk::{InMemoryBlobStore, PictureBingo, PrefixUrlService};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Picture Bingo HTTP server.
pub struct BingoServer {
    config: ServerConfig,
    bingo: Arc<PictureBingo>,
}

impl BingoServer {
    /// A server over a fresh in-memory blob store.
    pub fn new(config: ServerConfig) -> Self {
        let bingo = PictureBingo::builder(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(PrefixUrlService::new(config.blob_base_url())),
        )
        .update_policy(config.update.clone())
        .thumbnailer(Thumbnailer::new(config.thumbnail_max_dim))
        .build();
        Self::with_service(config, Arc::new(bingo))
    }

    pub fn with_service(config: ServerConfig, bingo: Arc<PictureBingo>) -> Self {
        Self { config, bingo }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.bingo), self.config.max_upload_bytes)
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            blobs = %self.config.blob_base_url(),
            "picture bingo server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
