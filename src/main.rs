use std::{env, net::SocketAddr, sync::Arc};

use axum::{
    middleware::{self},
    routing::post,
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    auth::token_service::AuthConfig,
    controllers::like_controller::LikeController,
    routes::like_routes::LikeRoutes,
    services::{like_service::FilmLikeService, memory_like_service::MemoryFilmLikeService},
};

pub use self::error::{Error, Result};

mod auth;
mod controllers;
mod error;
mod helpers;
mod middlewares;
mod models;
mod routes;
mod services;
mod telemetry;

#[derive(Clone)]
struct AppState {
    auth_config: AuthConfig,
    like_service: Arc<dyn FilmLikeService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_tracing();

    tracing::info!("Starting Film Like API...");

    let auth_config = AuthConfig::from_env()?;
    tracing::info!(algorithm = ?auth_config.jwt_algorithm, "Auth configuration loaded");

    let app_state = AppState {
        auth_config,
        like_service: Arc::new(MemoryFilmLikeService::new()),
    };

    let routes_all = routes_all(app_state);

    let host = env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|_| Error::ConfigError(format!("invalid bind address {host}:{port}")))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, routes_all).await?;

    Ok(())
}

fn routes_all(app_state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/like", LikeRoutes::routes())
        // Clients address the collection with a trailing slash too.
        .route("/like/", post(LikeController::add_like))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            middlewares::mw_auth::mw_auth,
        ));

    Router::new()
        .nest("/api/v1", protected_routes)
        .with_state(app_state)
        .layer(telemetry::trace_layer())
        .layer(CorsLayer::very_permissive())
}
