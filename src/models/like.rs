use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's rating of a film. At most one exists per (user, film).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LikeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub film_id: Uuid,
    pub value: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AddLikePayload {
    pub film_id: Uuid,
    pub value: i64,
}

/// Body of a like update, either a bare integer or `{"value": n}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpdateLikePayload {
    Bare(i64),
    Object { value: i64 },
}

impl UpdateLikePayload {
    pub fn value(&self) -> i64 {
        match self {
            Self::Bare(value) | Self::Object { value } => *value,
        }
    }
}

/// What the like service did with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeOutcome<T> {
    Applied(T),
    NotFound,
    Conflict,
}

impl<T> LikeOutcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::NotFound | Self::Conflict => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertedLike {
    pub inserted_id: String,
}

/// Average rating of a film as produced by the like service.
///
/// The film id is stored in its 16 byte binary form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmAverageRecord {
    pub id: Vec<u8>,
    pub average_rating: f64,
    pub likes_count: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FilmAverageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub average_rating: f64,
    pub likes_count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilmLikesSummary {
    pub film_id: String,
    pub likes_count: u64,
    /// Number of likes per rating value.
    pub ratings: BTreeMap<i64, u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeIdResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeMessageResponse {
    pub msg: String,
}

impl LikeMessageResponse {
    pub fn deleted() -> Self {
        Self {
            msg: "DELETED".to_string(),
        }
    }

    pub fn updated() -> Self {
        Self {
            msg: "UPDATED".to_string(),
        }
    }
}
