use std::{env, str::FromStr};

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(Error::ConfigError("JWT_SECRET must not be empty".to_string()));
        }

        Ok(Self {
            jwt_secret,
            jwt_algorithm: parse_algorithm(env::var("JWT_ALGORITHM").ok().as_deref())?,
            leeway_secs: parse_leeway(env::var("JWT_LEEWAY_SECS").ok().as_deref())?,
        })
    }
}

fn parse_algorithm(raw: Option<&str>) -> Result<Algorithm> {
    let algorithm = match raw {
        Some(raw) => Algorithm::from_str(raw)
            .map_err(|_| Error::ConfigError(format!("unknown JWT_ALGORITHM {raw}")))?,
        None => Algorithm::HS256,
    };

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(Error::ConfigError(
            "JWT_ALGORITHM must be an HMAC algorithm".to_string(),
        )),
    }
}

fn parse_leeway(raw: Option<&str>) -> Result<u64> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::ConfigError(format!("invalid JWT_LEEWAY_SECS {raw}"))),
        None => Ok(0),
    }
}

/// Claims carried by an access token issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

pub struct TokenService;

impl TokenService {
    /// Verifies the raw `Authorization` header value and returns the claims.
    ///
    /// A missing header yields [`Error::TokenNotFound`]. Anything else that
    /// does not verify (wrong scheme, bad signature, expired, undecodable
    /// claims, non-access token) yields [`Error::TokenNotValid`].
    pub fn require_valid(authorization: Option<&str>, config: &AuthConfig) -> Result<Claims> {
        let header = authorization.ok_or(Error::TokenNotFound)?;

        let token = header
            .trim_start()
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or(Error::TokenNotValid)?;

        let claims = Self::validate_token(token, config)?;

        match claims.token_type.as_deref() {
            None | Some(ACCESS_TOKEN_TYPE) => Ok(claims),
            Some(other) => {
                tracing::debug!(token_type = other, "rejected non-access token");
                Err(Error::TokenNotValid)
            }
        }
    }

    pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims> {
        let mut validation = Validation::new(config.jwt_algorithm);
        validation.leeway = config.leeway_secs;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "token validation failed");
            Error::TokenNotValid
        })?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub(crate) const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    pub(crate) fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_algorithm: Algorithm::HS256,
            leeway_secs: 0,
        }
    }

    pub(crate) fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    pub(crate) fn access_token(user_uuid: &str) -> String {
        let now = Utc::now();
        sign(
            &serde_json::json!({
                "sub": "someone@example.com",
                "user_uuid": user_uuid,
                "iat": now.timestamp(),
                "exp": (now + Duration::minutes(15)).timestamp(),
                "jti": uuid::Uuid::new_v4().to_string(),
                "type": "access",
            }),
            TEST_SECRET,
        )
    }

    #[test]
    fn test_require_valid_accepts_access_token() {
        let token = access_token("3f1c1f0e-7d5b-4b8e-9a51-0f6c7a3e5d21");
        let header = format!("Bearer {token}");

        let claims = TokenService::require_valid(Some(&header), &test_config()).unwrap();
        assert_eq!(claims.user_uuid, "3f1c1f0e-7d5b-4b8e-9a51-0f6c7a3e5d21");
        assert_eq!(claims.token_type.as_deref(), Some("access"));
    }

    #[test]
    fn test_missing_header_is_token_not_found() {
        let err = TokenService::require_valid(None, &test_config()).unwrap_err();
        assert!(matches!(err, Error::TokenNotFound));
    }

    #[test]
    fn test_wrong_scheme_is_not_valid() {
        let err = TokenService::require_valid(Some("Basic dXNlcjpwYXNz"), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));

        let err = TokenService::require_valid(Some("Bearer    "), &test_config()).unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let token = access_token("u-1");

        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let header = format!("{scheme} {token}");
            let claims = TokenService::require_valid(Some(&header), &test_config()).unwrap();
            assert_eq!(claims.user_uuid, "u-1");
        }

        let err = TokenService::require_valid(Some(&format!("Bearerx {token}")), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }

    #[test]
    fn test_parse_leeway() {
        assert_eq!(parse_leeway(None).unwrap(), 0);
        assert_eq!(parse_leeway(Some("30")).unwrap(), 30);

        for raw in ["", "thirty", "-5"] {
            let err = parse_leeway(Some(raw)).unwrap_err();
            assert!(matches!(err, Error::ConfigError(_)), "{raw}");
        }
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm(None).unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm(Some("HS512")).unwrap(), Algorithm::HS512);

        assert!(matches!(
            parse_algorithm(Some("RS256")).unwrap_err(),
            Error::ConfigError(_)
        ));
        assert!(matches!(
            parse_algorithm(Some("nope")).unwrap_err(),
            Error::ConfigError(_)
        ));
    }

    #[test]
    fn test_expired_token_is_not_valid() {
        let now = Utc::now();
        let token = sign(
            &serde_json::json!({
                "user_uuid": "u-1",
                "iat": (now - Duration::minutes(10)).timestamp(),
                "exp": (now - Duration::minutes(5)).timestamp(),
            }),
            TEST_SECRET,
        );

        let err = TokenService::require_valid(Some(&format!("Bearer {token}")), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }

    #[test]
    fn test_foreign_secret_is_not_valid() {
        let now = Utc::now();
        let token = sign(
            &serde_json::json!({
                "user_uuid": "u-1",
                "exp": (now + Duration::minutes(5)).timestamp(),
            }),
            "some-other-secret",
        );

        let err = TokenService::require_valid(Some(&format!("Bearer {token}")), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }

    #[test]
    fn test_refresh_token_is_not_valid() {
        let now = Utc::now();
        let token = sign(
            &serde_json::json!({
                "user_uuid": "u-1",
                "exp": (now + Duration::days(1)).timestamp(),
                "type": "refresh",
            }),
            TEST_SECRET,
        );

        let err = TokenService::require_valid(Some(&format!("Bearer {token}")), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }

    #[test]
    fn test_missing_user_uuid_is_not_valid() {
        let now = Utc::now();
        let token = sign(
            &serde_json::json!({
                "sub": "someone",
                "exp": (now + Duration::minutes(5)).timestamp(),
            }),
            TEST_SECRET,
        );

        let err = TokenService::require_valid(Some(&format!("Bearer {token}")), &test_config())
            .unwrap_err();
        assert!(matches!(err, Error::TokenNotValid));
    }
}
