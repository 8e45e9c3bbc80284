// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

/// The caller of a request. Reuses the identity resolved by the capability
/// middleware when it ran, otherwise resolves the bearer token itself.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

pub(super) fn bearer_token(headers: &HeaderMap) -> Result<String, HttpError> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|header| header.token().to_string())
        .ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(Self(user.clone()));
        }

        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "application state missing",
                ))
            })?;

        let token = bearer_token(&parts.headers)?;
        let user = app_state
            .services
            .authenticate(&token)
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}
