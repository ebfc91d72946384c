use crate::auth::token_service::{Claims, TokenService};
use crate::error::Result;
use crate::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Identity of the caller, available to handlers behind [`mw_auth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ctx {
    pub user_id: String,
    pub exp: i64,
}

impl Ctx {
    pub fn new(user_id: String, exp: i64) -> Self {
        Self { user_id, exp }
    }
}

impl From<Claims> for Ctx {
    fn from(claims: Claims) -> Self {
        Ctx::new(claims.user_uuid, claims.exp)
    }
}

pub async fn mw_auth(
    State(app_state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response> {
    // A header that is not valid ASCII is present but unusable.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let claims = TokenService::require_valid(authorization, &app_state.auth_config)?;

    let ctx = Ctx::from(claims);
    tracing::debug!(user_id = %ctx.user_id, exp = ctx.exp, "request authenticated");

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
