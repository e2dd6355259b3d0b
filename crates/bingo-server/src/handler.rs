use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use bingo_sdk::{Picture, PictureBingo};
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;

/// Shared handler state.
pub type AppState = Arc<PictureBingo>;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCardResponse {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardResponse {
    pub name: String,
    pub pictures: Vec<Picture>,
}

/// `?name=<card_name>`
#[derive(Debug, Deserialize)]
pub struct CardQuery {
    pub name: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

pub async fn make_new_card_handler(
    State(bingo): State<AppState>,
) -> ServerResult<Json<NewCardResponse>> {
    let name = bingo.create_card().await?;
    Ok(Json(NewCardResponse {
        name: name.to_string(),
    }))
}

pub async fn get_card_handler(
    State(bingo): State<AppState>,
    Query(query): Query<CardQuery>,
) -> ServerResult<Json<CardResponse>> {
    let card = bingo.get_card(&query.name).await?;
    Ok(Json(CardResponse {
        name: query.name,
        pictures: card.pictures,
    }))
}

/// The request body is the raw image.
pub async fn add_picture_handler(
    State(bingo): State<AppState>,
    Query(query): Query<CardQuery>,
    body: Bytes,
) -> ServerResult<Json<Picture>> {
    tracing::debug!(card = %query.name, bytes = body.len(), "upload received");
    let picture = bingo.add_picture(&query.name, body.to_vec()).await?;
    Ok(Json(picture))
}

pub async fn blob_handler(
    State(bingo): State<AppState>,
    Path(key): Path<String>,
) -> ServerResult<Response> {
    let blob = bingo.read_blob(&key).await?;
    Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.data).into_response())
}
