//! Route tables. `api_routes` is the single shared set of endpoints; the
//! two binaries differ only in where they mount it.

use crate::handlers::{podcast, review, user};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/user/login", post(user::login))
        .route("/user/addPodcast", post(user::add_podcast))
        .route("/user/podcasts", post(user::list_podcasts))
        .route("/user/deletePodcast", delete(user::delete_podcast))
        .route("/podcast/add", post(podcast::add))
        .route("/podcasts/:uuid", get(podcast::get_by_uuid))
        .route("/review/add", post(review::add))
        .route("/review/user", post(review::get_for_user))
        .route("/review/delete", delete(review::delete))
        .with_state(state)
}

#[derive(Serialize)]
struct HomepageBody {
    message: &'static str,
}

async fn homepage() -> Json<HomepageBody> {
    Json(HomepageBody {
        message: "Homepage data goes here",
    })
}

/// Mounted by the function binary alongside the `/api`-nested API routes.
pub fn homepage_routes() -> Router {
    Router::new().route("/homepage", get(homepage))
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Operational routes for the standalone server: GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
