// src/presentation/http/controllers/audit.rs
use crate::application::{dto::AuditLogDto, queries::audit::ListAuditLogsQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAuditParams {
    /// `cases`, `case_checklist` or `users`.
    pub entity: Option<String>,
    pub entity_id: Option<i64>,
    /// Acting user.
    pub user_id: Option<i64>,
    /// Defaults to 20, capped at 100.
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(ListAuditParams),
    responses(
        (status = 200, description = "Audit entries, most recent first.", body = [AuditLogDto]),
        (status = 400, description = "Unknown entity.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let query = ListAuditLogsQuery {
        entity: params.entity,
        entity_id: params.entity_id,
        user_id: params.user_id,
        limit: params.limit.unwrap_or_default(),
    };

    state
        .services
        .audit_queries
        .list_audit_logs(&actor, query)
        .await
        .into_http()
        .map(Json)
}
