//! PostgreSQL-backed store. One table per collection, created idempotently
//! at startup. Library set-add/set-remove are single UPDATE statements, so
//! concurrent requests for the same user race only at the database, which
//! resolves them atomically.

use super::{DocumentStore, StoreError};
use crate::models::{Podcast, Review, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Opens the pool and creates tables if missing. Called once at startup;
    /// the resulting store is shared across all requests.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_tables().await?;
        Ok(store)
    }

    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                user_email TEXT NOT NULL,
                last_login TIMESTAMPTZ NOT NULL,
                podcasts TEXT[] NOT NULL DEFAULT '{}'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS users_user_email_idx ON users (user_email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS podcasts (
                id BIGSERIAL PRIMARY KEY,
                uuid TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                image_url TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // No uniqueness on (podcast_uuid, user_email): multiple reviews per
        // pair are storage-permitted, lookup/delete take the first match.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id BIGSERIAL PRIMARY KEY,
                rating BIGINT NOT NULL,
                description TEXT NOT NULL,
                podcast_uuid TEXT NOT NULL,
                user_email TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS reviews_pair_idx ON reviews (podcast_uuid, user_email)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn decode_user(row: &PgRow) -> Result<User, StoreError> {
    let corrupt = |field: &str| StoreError::CorruptDocument(format!("users.{}", field));
    Ok(User {
        user_email: row.try_get("user_email").map_err(|_| corrupt("user_email"))?,
        last_login: row.try_get("last_login").map_err(|_| corrupt("last_login"))?,
        podcasts: row.try_get("podcasts").map_err(|_| corrupt("podcasts"))?,
    })
}

fn decode_podcast(row: &PgRow) -> Result<Podcast, StoreError> {
    let corrupt = |field: &str| StoreError::CorruptDocument(format!("podcasts.{}", field));
    Ok(Podcast {
        uuid: row.try_get("uuid").map_err(|_| corrupt("uuid"))?,
        name: row.try_get("name").map_err(|_| corrupt("name"))?,
        description: row.try_get("description").map_err(|_| corrupt("description"))?,
        image_url: row.try_get("image_url").map_err(|_| corrupt("image_url"))?,
    })
}

fn decode_review(row: &PgRow) -> Result<Review, StoreError> {
    let corrupt = |field: &str| StoreError::CorruptDocument(format!("reviews.{}", field));
    Ok(Review {
        rating: row.try_get("rating").map_err(|_| corrupt("rating"))?,
        description: row.try_get("description").map_err(|_| corrupt("description"))?,
        podcast_uuid: row.try_get("podcast_uuid").map_err(|_| corrupt("podcast_uuid"))?,
        user_email: row.try_get("user_email").map_err(|_| corrupt("user_email"))?,
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn count_users_by_email(&self, email: &str) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) FROM users WHERE user_email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get(0)?;
        Ok(count as u64)
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        tracing::debug!(email = %user.user_email, "insert user");
        sqlx::query("INSERT INTO users (user_email, last_login, podcasts) VALUES ($1, $2, $3)")
            .bind(&user.user_email)
            .bind(user.last_login)
            .bind(&user.podcasts)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn touch_last_login(&self, email: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users SET last_login = $2
            WHERE id = (SELECT id FROM users WHERE user_email = $1 ORDER BY id LIMIT 1)
            "#,
        )
        .bind(email)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            "SELECT user_email, last_login, podcasts FROM users WHERE user_email = $1 ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_user).transpose()
    }

    async fn add_podcast_to_library(&self, email: &str, uuid: &str) -> Result<(), StoreError> {
        tracing::debug!(email, uuid, "library set-add");
        sqlx::query(
            r#"
            UPDATE users SET podcasts = array_append(podcasts, $2)
            WHERE id = (SELECT id FROM users WHERE user_email = $1 ORDER BY id LIMIT 1)
              AND NOT ($2 = ANY(podcasts))
            "#,
        )
        .bind(email)
        .bind(uuid)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_podcast_from_library(
        &self,
        email: &str,
        uuid: &str,
    ) -> Result<(), StoreError> {
        tracing::debug!(email, uuid, "library set-remove");
        sqlx::query(
            r#"
            UPDATE users SET podcasts = array_remove(podcasts, $2)
            WHERE id = (SELECT id FROM users WHERE user_email = $1 ORDER BY id LIMIT 1)
            "#,
        )
        .bind(email)
        .bind(uuid)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_podcast(&self, podcast: &Podcast) -> Result<(), StoreError> {
        tracing::debug!(uuid = %podcast.uuid, "insert podcast");
        sqlx::query(
            "INSERT INTO podcasts (uuid, name, description, image_url) VALUES ($1, $2, $3, $4)",
        )
        .bind(&podcast.uuid)
        .bind(&podcast.name)
        .bind(&podcast.description)
        .bind(&podcast.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateKey(podcast.uuid.clone())
            } else {
                StoreError::Db(e)
            }
        })?;
        Ok(())
    }

    async fn find_podcast_by_uuid(&self, uuid: &str) -> Result<Option<Podcast>, StoreError> {
        let row = sqlx::query(
            "SELECT uuid, name, description, image_url FROM podcasts WHERE uuid = $1 LIMIT 1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_podcast).transpose()
    }

    async fn find_podcasts_by_uuids(&self, uuids: &[String]) -> Result<Vec<Podcast>, StoreError> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT uuid, name, description, image_url FROM podcasts WHERE uuid = ANY($1) ORDER BY id",
        )
        .bind(uuids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(decode_podcast).collect()
    }

    async fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        tracing::debug!(podcast = %review.podcast_uuid, user = %review.user_email, "insert review");
        sqlx::query(
            "INSERT INTO reviews (rating, description, podcast_uuid, user_email) VALUES ($1, $2, $3, $4)",
        )
        .bind(review.rating)
        .bind(&review.description)
        .bind(&review.podcast_uuid)
        .bind(&review.user_email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_review(
        &self,
        podcast_uuid: &str,
        user_email: &str,
    ) -> Result<Option<Review>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT rating, description, podcast_uuid, user_email FROM reviews
            WHERE podcast_uuid = $1 AND user_email = $2 ORDER BY id LIMIT 1
            "#,
        )
        .bind(podcast_uuid)
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_review).transpose()
    }

    async fn delete_review(
        &self,
        podcast_uuid: &str,
        user_email: &str,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE id = (
                SELECT id FROM reviews
                WHERE podcast_uuid = $1 AND user_email = $2 ORDER BY id LIMIT 1
            )
            "#,
        )
        .bind(podcast_uuid)
        .bind(user_email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
