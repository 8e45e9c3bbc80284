// src/presentation/http/middleware/require_capabilities.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::{error::HttpError, extractors::bearer_token};
use crate::presentation::http::state::HttpState;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Middleware function that enforces a single capability (resource, action).
/// On success the resolved caller is stored in the request extensions.
///
/// Usage: `axum::middleware::from_fn(|req, next| require_capability(req, next, "audit", "read"))`
pub async fn require_capability(
    mut req: Request<Body>,
    next: Next,
    resource: &'static str,
    action: &'static str,
) -> Response {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => return err.into_response(),
    };

    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
        .into_response();
    };

    match state
        .services
        .authenticate_and_authorize(&token, resource, action)
        .await
    {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => HttpError::from_error(err).into_response(),
    }
}
