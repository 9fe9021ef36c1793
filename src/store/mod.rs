//! Storage seam: collection-level operations over users, podcasts, reviews.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::models::{Podcast, Review, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// A stored document does not decode into its record struct.
    #[error("corrupt document: {0}")]
    CorruptDocument(String),
}

/// Document-store operations the handlers are written against. One
/// implementation talks to PostgreSQL, one keeps everything in memory for
/// tests and local development.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Number of user documents with the given email. The email is not
    /// unique-constrained, so this can exceed 1.
    async fn count_users_by_email(&self, email: &str) -> Result<u64, StoreError>;

    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Sets lastLogin on the first user document matching the email.
    /// No-op if no such user exists.
    async fn touch_last_login(&self, email: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Returns the first user document matching the email, if any.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Adds a podcast UUID to the user's library with set semantics: no-op
    /// if already present, and no-op (still Ok) if the user does not exist.
    async fn add_podcast_to_library(&self, email: &str, uuid: &str) -> Result<(), StoreError>;

    /// Removes a podcast UUID from the user's library. Succeeds whether or
    /// not the UUID (or the user) was present.
    async fn remove_podcast_from_library(&self, email: &str, uuid: &str)
        -> Result<(), StoreError>;

    /// Inserts a catalog entry. Fails with `DuplicateKey` if the uuid is
    /// already registered.
    async fn insert_podcast(&self, podcast: &Podcast) -> Result<(), StoreError>;

    async fn find_podcast_by_uuid(&self, uuid: &str) -> Result<Option<Podcast>, StoreError>;

    /// Returns the catalog entries whose uuid is in `uuids`, in store order.
    async fn find_podcasts_by_uuids(&self, uuids: &[String]) -> Result<Vec<Podcast>, StoreError>;

    /// Inserts a review. No uniqueness on (podcast_uuid, user_email).
    async fn insert_review(&self, review: &Review) -> Result<(), StoreError>;

    /// Returns the first review matching the pair, if any.
    async fn find_review(
        &self,
        podcast_uuid: &str,
        user_email: &str,
    ) -> Result<Option<Review>, StoreError>;

    /// Deletes at most one review matching the pair; returns the number of
    /// documents deleted (0 or 1).
    async fn delete_review(&self, podcast_uuid: &str, user_email: &str)
        -> Result<u64, StoreError>;
}
