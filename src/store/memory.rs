//! In-memory store used by the test suite and for running without a
//! database. Vectors rather than maps: the backing collections permit
//! duplicate users and reviews, and the trait contract ("first match",
//! "at most one deleted") is exercised against that.

use super::{DocumentStore, StoreError};
use crate::models::{Podcast, Review, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    podcasts: Vec<Podcast>,
    reviews: Vec<Review>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count_users_by_email(&self, email: &str) -> Result<u64, StoreError> {
        Ok(self
            .read()
            .users
            .iter()
            .filter(|u| u.user_email == email)
            .count() as u64)
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.write().users.push(user.clone());
        Ok(())
    }

    async fn touch_last_login(&self, email: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(u) = inner.users.iter_mut().find(|u| u.user_email == email) {
            u.last_login = at;
        }
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.user_email == email)
            .cloned())
    }

    async fn add_podcast_to_library(&self, email: &str, uuid: &str) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(u) = inner.users.iter_mut().find(|u| u.user_email == email) {
            if !u.podcasts.iter().any(|p| p == uuid) {
                u.podcasts.push(uuid.to_string());
            }
        }
        Ok(())
    }

    async fn remove_podcast_from_library(
        &self,
        email: &str,
        uuid: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(u) = inner.users.iter_mut().find(|u| u.user_email == email) {
            u.podcasts.retain(|p| p != uuid);
        }
        Ok(())
    }

    async fn insert_podcast(&self, podcast: &Podcast) -> Result<(), StoreError> {
        let mut inner = self.write();
        if inner.podcasts.iter().any(|p| p.uuid == podcast.uuid) {
            return Err(StoreError::DuplicateKey(podcast.uuid.clone()));
        }
        inner.podcasts.push(podcast.clone());
        Ok(())
    }

    async fn find_podcast_by_uuid(&self, uuid: &str) -> Result<Option<Podcast>, StoreError> {
        Ok(self
            .read()
            .podcasts
            .iter()
            .find(|p| p.uuid == uuid)
            .cloned())
    }

    async fn find_podcasts_by_uuids(&self, uuids: &[String]) -> Result<Vec<Podcast>, StoreError> {
        Ok(self
            .read()
            .podcasts
            .iter()
            .filter(|p| uuids.contains(&p.uuid))
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        self.write().reviews.push(review.clone());
        Ok(())
    }

    async fn find_review(
        &self,
        podcast_uuid: &str,
        user_email: &str,
    ) -> Result<Option<Review>, StoreError> {
        Ok(self
            .read()
            .reviews
            .iter()
            .find(|r| r.podcast_uuid == podcast_uuid && r.user_email == user_email)
            .cloned())
    }

    async fn delete_review(
        &self,
        podcast_uuid: &str,
        user_email: &str,
    ) -> Result<u64, StoreError> {
        let mut inner = self.write();
        let pos = inner
            .reviews
            .iter()
            .position(|r| r.podcast_uuid == podcast_uuid && r.user_email == user_email);
        match pos {
            Some(i) => {
                inner.reviews.remove(i);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
