//! Login/upsert and per-user library management.

use super::{required_str_field, str_field};
use crate::error::AppError;
use crate::models::{Podcast, User};
use crate::response;
use crate::state::AppState;
use crate::store::StoreError;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// POST /user/login — creates the user on first login, otherwise bumps
/// lastLogin. No email format validation by design.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let email = str_field(&body, "email")
        .ok_or_else(|| AppError::BadRequest("Email is required".into()))?;

    if state.store.count_users_by_email(email).await? == 0 {
        let user = User {
            user_email: email.to_string(),
            last_login: Utc::now(),
            podcasts: Vec::new(),
        };
        state.store.insert_user(&user).await?;
        Ok(response::message("User created successfully"))
    } else {
        state.store.touch_last_login(email, Utc::now()).await?;
        Ok(response::message("User updated successfully"))
    }
}

/// POST /user/addPodcast — set-add, so a repeat add is a no-op; adding for
/// an unknown user is also a no-op and still reports success.
pub async fn add_podcast(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let podcast_uuid = match body.get("podcastUuid") {
        Some(Value::String(s)) => s.as_str(),
        other => {
            tracing::warn!(value = ?other, "rejected non-string podcastUuid");
            return Err(AppError::BadRequest("Invalid podcastUuid format".into()));
        }
    };
    let user_email = str_field(&body, "userEmail")
        .ok_or_else(|| AppError::BadRequest("User email required".into()))?;

    state
        .store
        .add_podcast_to_library(user_email, podcast_uuid)
        .await?;
    Ok(response::message("Podcast added to user library"))
}

#[derive(Serialize)]
struct LibraryBody {
    podcasts: Vec<Podcast>,
}

/// POST /user/podcasts — resolves the user's saved UUIDs to full catalog
/// documents.
pub async fn list_podcasts(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = str_field(&body, "userEmail")
        .ok_or_else(|| AppError::BadRequest("User email required".into()))?;

    let user = match state.store.find_user_by_email(user_email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::NotFound("User not found".into())),
        Err(StoreError::CorruptDocument(field)) => {
            tracing::error!(field, "stored user document failed to decode");
            return Err(AppError::BadRequest("User data is in invalid format".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let podcasts = state.store.find_podcasts_by_uuids(&user.podcasts).await?;
    Ok(Json(LibraryBody { podcasts }))
}

/// DELETE /user/deletePodcast — set-remove; succeeds whether or not the
/// UUID was in the library.
pub async fn delete_podcast(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let (user_email, podcast_uuid) = match (
        required_str_field(&body, "userEmail"),
        required_str_field(&body, "podcastUuid"),
    ) {
        (Some(e), Some(u)) => (e, u),
        _ => {
            return Err(AppError::BadRequest(
                "User email and podcast UUID required".into(),
            ))
        }
    };

    state
        .store
        .remove_podcast_from_library(user_email, podcast_uuid)
        .await?;
    Ok(response::message("Podcast removed from user library"))
}
