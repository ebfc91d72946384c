use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{controllers::like_controller::LikeController, AppState};

pub struct LikeRoutes;

impl LikeRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/", post(LikeController::add_like))
            .route(
                "/{film_id}",
                put(LikeController::update_like).delete(LikeController::delete_like),
            )
            .route("/{film_id}/average", get(LikeController::average_rating))
            .route("/{film_id}/summary", get(LikeController::summary_ratings))
    }
}
