use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    helpers::uuid_helpers::uuid_to_binary,
    models::like::{FilmAverageRecord, FilmLikesSummary, InsertedLike, LikeOutcome, LikeRecord},
    services::like_service::FilmLikeService,
};

type LikeKey = (String, Uuid);

/// In-process like store, used for local runs and tests.
#[derive(Clone, Default)]
pub struct MemoryFilmLikeService {
    likes: Arc<RwLock<HashMap<LikeKey, LikeRecord>>>,
}

impl MemoryFilmLikeService {
    pub fn new() -> Self {
        Self::default()
    }

    fn film_values(&self, film_id: Uuid) -> Result<Vec<i64>> {
        let likes = self
            .likes
            .read()
            .map_err(|_| Error::DbError("like store lock poisoned".to_string()))?;

        Ok(likes
            .values()
            .filter(|like| like.film_id == film_id)
            .map(|like| like.value)
            .collect())
    }
}

#[async_trait]
impl FilmLikeService for MemoryFilmLikeService {
    async fn add_film_like(
        &self,
        user_id: &str,
        film_id: Uuid,
        value: i64,
    ) -> Result<LikeOutcome<InsertedLike>> {
        let mut likes = self
            .likes
            .write()
            .map_err(|_| Error::DbError("like store lock poisoned".to_string()))?;

        let key = (user_id.to_string(), film_id);
        if likes.contains_key(&key) {
            return Ok(LikeOutcome::Conflict);
        }

        let now = Utc::now();
        let record = LikeRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            film_id,
            value,
            created_at: now,
            updated_at: now,
        };
        let inserted_id = record.id.to_string();
        likes.insert(key, record);

        Ok(LikeOutcome::Applied(InsertedLike { inserted_id }))
    }

    async fn delete_film_like(&self, user_id: &str, film_id: Uuid) -> Result<LikeOutcome<()>> {
        let mut likes = self
            .likes
            .write()
            .map_err(|_| Error::DbError("like store lock poisoned".to_string()))?;

        match likes.remove(&(user_id.to_string(), film_id)) {
            Some(_) => Ok(LikeOutcome::Applied(())),
            None => Ok(LikeOutcome::NotFound),
        }
    }

    async fn update_film_like(
        &self,
        user_id: &str,
        film_id: Uuid,
        value: i64,
    ) -> Result<LikeOutcome<()>> {
        let mut likes = self
            .likes
            .write()
            .map_err(|_| Error::DbError("like store lock poisoned".to_string()))?;

        match likes.get_mut(&(user_id.to_string(), film_id)) {
            Some(like) => {
                like.value = value;
                like.updated_at = Utc::now();
                Ok(LikeOutcome::Applied(()))
            }
            None => Ok(LikeOutcome::NotFound),
        }
    }

    async fn average_film_likes(
        &self,
        film_id: Uuid,
    ) -> Result<LikeOutcome<Vec<FilmAverageRecord>>> {
        let values = self.film_values(film_id)?;
        if values.is_empty() {
            return Ok(LikeOutcome::NotFound);
        }

        let likes_count = values.len() as u64;
        let average_rating = values.iter().map(|v| *v as f64).sum::<f64>() / likes_count as f64;

        Ok(LikeOutcome::Applied(vec![FilmAverageRecord {
            id: uuid_to_binary(&film_id),
            average_rating,
            likes_count,
        }]))
    }

    async fn summary_film_likes(&self, film_id: Uuid) -> Result<LikeOutcome<FilmLikesSummary>> {
        let values = self.film_values(film_id)?;
        if values.is_empty() {
            return Ok(LikeOutcome::NotFound);
        }

        let mut ratings = BTreeMap::new();
        for value in &values {
            *ratings.entry(*value).or_insert(0u64) += 1;
        }

        Ok(LikeOutcome::Applied(FilmLikesSummary {
            film_id: film_id.to_string(),
            likes_count: values.len() as u64,
            ratings,
        }))
    }
}
