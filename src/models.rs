//! Persisted record structs. Field names stay camelCase on the wire to match
//! the documents the frontend already consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Created on first login; `user_email` is the identifying
/// key but is not enforced unique by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_email: String,
    pub last_login: DateTime<Utc>,
    /// Podcast UUIDs saved to the user's library. Set semantics: unique,
    /// unordered.
    #[serde(default)]
    pub podcasts: Vec<String>,
}

/// A catalog entry. Immutable after creation; `uuid` is unique and generated
/// upstream (an opaque string as far as this backend is concerned).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// A user's review of a podcast. No uniqueness on (podcast_uuid, user_email):
/// the store permits multiple reviews per pair, lookup and delete act on the
/// first match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: i64,
    pub description: String,
    pub podcast_uuid: String,
    pub user_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podcast_serializes_camel_case() {
        let p = Podcast {
            uuid: "u-1".into(),
            name: "n".into(),
            description: "d".into(),
            image_url: "http://example.com/i.png".into(),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["imageUrl"], "http://example.com/i.png");
        assert!(v.get("image_url").is_none());
    }

    #[test]
    fn user_podcasts_default_to_empty() {
        let u: User = serde_json::from_value(serde_json::json!({
            "userEmail": "a@b.c",
            "lastLogin": "2024-01-01T00:00:00Z",
        }))
        .unwrap();
        assert!(u.podcasts.is_empty());
    }
}
