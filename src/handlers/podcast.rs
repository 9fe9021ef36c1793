//! Podcast catalog: add and fetch. Entries are immutable once created.

use super::required_str_field;
use crate::error::AppError;
use crate::models::Podcast;
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// POST /podcast/add — registers a catalog entry. A duplicate uuid is a
/// store-level failure and surfaces as a generic 500.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let podcast = match (
        required_str_field(&body, "uuid"),
        required_str_field(&body, "name"),
        required_str_field(&body, "description"),
        required_str_field(&body, "imageUrl"),
    ) {
        (Some(uuid), Some(name), Some(description), Some(image_url)) => Podcast {
            uuid: uuid.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
        },
        _ => return Err(AppError::BadRequest("All fields are required".into())),
    };

    state.store.insert_podcast(&podcast).await?;
    Ok(response::message_with_data(
        "Podcast added successfully",
        podcast,
    ))
}

/// GET /podcasts/:uuid — full catalog document or 404.
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let podcast = state
        .store
        .find_podcast_by_uuid(&uuid)
        .await?
        .ok_or_else(|| AppError::NotFound("Podcast not found".into()))?;
    Ok(Json(podcast))
}
