//! Review management. At most one review per (podcast, user) pair is
//! assumed by lookup and delete, but creation does not enforce it.

use super::{coerce_rating, required_str_field, truthy};
use crate::error::AppError;
use crate::models::Review;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;

/// POST /review/add — validates presence (truthiness) of all four fields,
/// then coerces the rating to an integer in [1,5].
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let all_present = ["rating", "description", "podcastUuid", "userEmail"]
        .iter()
        .all(|k| body.get(*k).map(truthy).unwrap_or(false));
    if !all_present {
        return Err(AppError::BadRequest("All fields are required".into()));
    }

    let rating = body
        .get("rating")
        .and_then(coerce_rating)
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| AppError::BadRequest("Invalid rating".into()))?;

    // Presence was checked above; the string reads cannot fail for the
    // truthy string fields, but non-string values still need rejecting.
    let review = match (
        required_str_field(&body, "description"),
        required_str_field(&body, "podcastUuid"),
        required_str_field(&body, "userEmail"),
    ) {
        (Some(description), Some(podcast_uuid), Some(user_email)) => Review {
            rating,
            description: description.to_string(),
            podcast_uuid: podcast_uuid.to_string(),
            user_email: user_email.to_string(),
        },
        _ => return Err(AppError::BadRequest("All fields are required".into())),
    };

    state.store.insert_review(&review).await?;
    Ok(response::message_with_data(
        "Review added successfully",
        review,
    ))
}

/// POST /review/user — first review for the (podcast, user) pair, or 404.
pub async fn get_for_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let (podcast_uuid, user_email) = match (
        required_str_field(&body, "podcastUuid"),
        required_str_field(&body, "userEmail"),
    ) {
        (Some(p), Some(u)) => (p, u),
        _ => {
            return Err(AppError::BadRequest(
                "User email and podcast UUID required".into(),
            ))
        }
    };

    let review = state
        .store
        .find_review(podcast_uuid, user_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".into()))?;
    Ok(Json(review))
}

/// DELETE /review/delete — removes at most one matching review per call.
pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let (user_email, podcast_uuid) = match (
        required_str_field(&body, "userEmail"),
        required_str_field(&body, "podcastUuid"),
    ) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(AppError::BadRequest(
                "User email and podcast UUID required".into(),
            ))
        }
    };

    let deleted = state.store.delete_review(podcast_uuid, user_email).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Review not found".into()));
    }
    Ok(response::message("Review deleted successfully"))
}
