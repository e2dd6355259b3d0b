use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all Picture Bingo endpoints.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route(
            "/v1/make_new_card",
            get(handler::make_new_card_handler).post(handler::make_new_card_handler),
        )
        .route("/v1/get_card", get(handler::get_card_handler))
        .route(
            "/v1/add_picture",
            post(handler::add_picture_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/v1/blobs/*key", get(handler::blob_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
