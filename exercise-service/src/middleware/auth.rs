use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::sync::Arc;

/// Claims carried by bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Validates HS256 bearer tokens issued by the user service.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &Secret<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(
                secret.expose_secret().as_bytes(),
            )),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AppError> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// The authenticated caller. Taking this extractor makes a route require a
/// valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    TokenVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::AuthError(anyhow::anyhow!("Missing or invalid Authorization header"))
            })?;

        let claims = TokenVerifier::from_ref(state).verify(token)?;

        tracing::Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
