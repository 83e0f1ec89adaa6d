use axum::extract::FromRequestParts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use http::request::Parts;

use crate::error::ServiceError;
use crate::utils::jwt::{JwtManager, TokenClaims};

/// Extracts and verifies the bearer token on protected routes.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ServiceError::Unauthorized("Missing or invalid authorization header".to_string())
                })?;

        let claims = JwtManager::from_config().verify_token(bearer.token())?;

        Ok(AuthClaims(claims))
    }
}
