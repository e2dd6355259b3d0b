//! HTTP server for Picture Bingo.
//!
//! Exposes card creation, card reads and picture uploads as a small JSON API
//! and serves stored thumbnails back out of the blob store.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ErrorBody, ServerError, ServerResult};
pub use handler::{AppState, CardResponse, HealthResponse, NewCardResponse};
pub use server::BingoServer;
