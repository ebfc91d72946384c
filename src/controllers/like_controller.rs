use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    error::Error,
    helpers::uuid_helpers::binary_to_uuid_string,
    middlewares::mw_auth::Ctx,
    models::like::{
        AddLikePayload, FilmAverageResponse, FilmLikesSummary, LikeIdResponse,
        LikeMessageResponse, UpdateLikePayload,
    },
    AppState,
};

pub struct LikeController;

impl LikeController {
    pub async fn add_like(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Json(payload): Json<AddLikePayload>,
    ) -> Result<Json<LikeIdResponse>, Error> {
        let inserted = state
            .like_service
            .add_film_like(&ctx.user_id, payload.film_id, payload.value)
            .await?
            .applied()
            .ok_or(Error::LikeAlreadyExists)?;

        tracing::info!(
            user_id = %ctx.user_id,
            film_id = %payload.film_id,
            like_id = %inserted.inserted_id,
            "like added"
        );

        Ok(Json(LikeIdResponse {
            id: inserted.inserted_id,
        }))
    }

    pub async fn delete_like(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(film_id): Path<Uuid>,
    ) -> Result<Json<LikeMessageResponse>, Error> {
        state
            .like_service
            .delete_film_like(&ctx.user_id, film_id)
            .await?
            .applied()
            .ok_or(Error::LikeNotExists)?;

        tracing::info!(user_id = %ctx.user_id, film_id = %film_id, "like deleted");

        Ok(Json(LikeMessageResponse::deleted()))
    }

    pub async fn update_like(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(film_id): Path<Uuid>,
        Json(payload): Json<UpdateLikePayload>,
    ) -> Result<Json<LikeMessageResponse>, Error> {
        state
            .like_service
            .update_film_like(&ctx.user_id, film_id, payload.value())
            .await?
            .applied()
            .ok_or(Error::LikeNotExists)?;

        tracing::info!(user_id = %ctx.user_id, film_id = %film_id, "like updated");

        Ok(Json(LikeMessageResponse::updated()))
    }

    pub async fn average_rating(
        State(state): State<AppState>,
        Path(film_id): Path<Uuid>,
    ) -> Result<Json<FilmAverageResponse>, Error> {
        let average = state
            .like_service
            .average_film_likes(film_id)
            .await?
            .applied()
            .and_then(|records| records.into_iter().next())
            .ok_or(Error::FilmNotExists)?;

        Ok(Json(FilmAverageResponse {
            id: binary_to_uuid_string(&average.id)?,
            average_rating: average.average_rating,
            likes_count: average.likes_count,
        }))
    }

    pub async fn summary_ratings(
        State(state): State<AppState>,
        Path(film_id): Path<Uuid>,
    ) -> Result<Json<FilmLikesSummary>, Error> {
        let summary = state
            .like_service
            .summary_film_likes(film_id)
            .await?
            .applied()
            .ok_or(Error::FilmNotExists)?;

        Ok(Json(summary))
    }
}
