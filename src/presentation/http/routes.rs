// src/presentation/http/routes.rs
use crate::config::AppConfig;
use crate::presentation::http::middleware::{login_rate_limit_layer, require_capability};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, cases, users},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Json, Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::{Next, from_fn},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Tests drive the router without a peer address, which the per-IP login
/// limiter needs, so they turn it off.
pub fn build_router_with_rate_limiter(state: HttpState, enable_rate_limiter: bool) -> Router {
    let mut login = Router::new().route("/api/v1/auth/login", post(auth::login));
    if enable_rate_limiter {
        match login_rate_limit_layer() {
            Some(limiter) => login = login.layer(limiter),
            None => warn!("login rate limiter misconfigured; continuing without it"),
        }
    }

    let audit_routes = Router::new()
        .route("/api/v1/audit-logs", get(audit::list_audit_logs))
        .route_layer(from_fn(|req: Request<Body>, next: Next| {
            require_capability(req, next, "audit", "read")
        }));

    Router::new()
        .merge(openapi::docs_router())
        .merge(login)
        .merge(audit_routes)
        .route("/health", get(health))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/v1/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route(
            "/api/v1/checklist-items",
            get(cases::list_checklist_items),
        )
        .route(
            "/api/v1/cases",
            get(cases::list_cases).post(cases::create_case),
        )
        .route("/api/v1/cases/export", post(cases::export_cases))
        .route(
            "/api/v1/cases/{id}",
            get(cases::get_case)
                .put(cases::update_case)
                .delete(cases::delete_case),
        )
        .route(
            "/api/v1/cases/{id}/visits/increment",
            post(cases::increment_visits),
        )
        .route(
            "/api/v1/cases/{id}/visits/decrement",
            post(cases::decrement_visits),
        )
        .route("/api/v1/cases/{id}/pdf", get(cases::export_case_pdf))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&AppConfig::allowed_origins_from_env()))
        .layer(Extension(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable.", body = StatusResponse),
        (status = 503, description = "Database unreachable.", body = StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health(Extension(state): Extension<HttpState>) -> (StatusCode, Json<StatusResponse>) {
    match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "ok".into(),
            }),
        ),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse {
                    status: "unavailable".into(),
                }),
            )
        }
    }
}
