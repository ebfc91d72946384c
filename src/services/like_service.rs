use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::like::{FilmAverageRecord, FilmLikesSummary, InsertedLike, LikeOutcome},
};

/// Storage and aggregation of film likes.
///
/// `Err` is reserved for infrastructure faults. Missing or duplicate likes
/// and unknown films are reported through [`LikeOutcome`].
#[async_trait]
pub trait FilmLikeService: Send + Sync {
    async fn add_film_like(
        &self,
        user_id: &str,
        film_id: Uuid,
        value: i64,
    ) -> Result<LikeOutcome<InsertedLike>>;

    async fn delete_film_like(&self, user_id: &str, film_id: Uuid) -> Result<LikeOutcome<()>>;

    async fn update_film_like(
        &self,
        user_id: &str,
        film_id: Uuid,
        value: i64,
    ) -> Result<LikeOutcome<()>>;

    async fn average_film_likes(&self, film_id: Uuid)
        -> Result<LikeOutcome<Vec<FilmAverageRecord>>>;

    async fn summary_film_likes(&self, film_id: Uuid) -> Result<LikeOutcome<FilmLikesSummary>>;
}
