use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Serialize, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
    // -- Auth errors.
    TokenNotFound,
    TokenNotValid,

    // -- Like errors.
    LikeAlreadyExists,
    LikeNotExists,
    FilmNotExists,

    // -- Infrastructure errors.
    DbError(String),
    InvalidBinaryId { len: usize },
    EnvVarError(String),
    ConfigError(String),
    Io(String),
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, client_error) = self.client_status_and_error();

        if status_code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let response_body = serde_json::json!({
            "error": client_error.as_ref(),
            "detail": self.detail()
        });

        (status_code, Json(response_body)).into_response()
    }
}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::TokenNotFound | Self::TokenNotValid => {
                (StatusCode::UNAUTHORIZED, ClientError::NO_AUTH)
            }

            Self::LikeAlreadyExists | Self::LikeNotExists | Self::FilmNotExists => {
                (StatusCode::UNPROCESSABLE_ENTITY, ClientError::INVALID_PARAMS)
            }

            Self::DbError(_)
            | Self::InvalidBinaryId { .. }
            | Self::EnvVarError(_)
            | Self::ConfigError(_)
            | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::SERVICE_ERROR,
            ),
        }
    }

    /// Message shown to the client. Internal faults never leak their cause.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::TokenNotFound => "Token not found",
            Self::TokenNotValid => "Token not valid or expired",
            Self::LikeAlreadyExists => "Like already exists",
            Self::LikeNotExists => "Like is not exists",
            Self::FilmNotExists => "Film is not exists",
            _ => "Internal server error",
        }
    }
}

#[derive(Debug, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    NO_AUTH,
    INVALID_PARAMS,
    SERVICE_ERROR,
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::EnvVarError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_to_response(err: Error) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_auth_errors_return_401() {
        let (status, json) = error_to_response(Error::TokenNotFound).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "NO_AUTH");
        assert_eq!(json["detail"], "Token not found");

        let (status, json) = error_to_response(Error::TokenNotValid).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["detail"], "Token not valid or expired");
    }

    #[tokio::test]
    async fn test_like_errors_return_422() {
        for (err, detail) in [
            (Error::LikeAlreadyExists, "Like already exists"),
            (Error::LikeNotExists, "Like is not exists"),
            (Error::FilmNotExists, "Film is not exists"),
        ] {
            let (status, json) = error_to_response(err).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(json["error"], "INVALID_PARAMS");
            assert_eq!(json["detail"], detail);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_are_sanitized() {
        let (status, json) =
            error_to_response(Error::DbError("connection refused at 10.0.0.3".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "SERVICE_ERROR");
        assert_eq!(json["detail"], "Internal server error");
    }
}
