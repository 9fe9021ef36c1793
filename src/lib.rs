//! Podcast-review backend: user libraries, podcast catalog, reviews.
//!
//! One shared router serves both entry points: the standalone `server`
//! binary mounts it at the root, the `function` binary under `/api`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use models::{Podcast, Review, User};
pub use routes::{api_routes, common_routes, homepage_routes};
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, PostgresStore, StoreError};
