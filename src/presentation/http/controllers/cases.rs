// src/presentation/http/controllers/cases.rs
use crate::application::{
    commands::cases::{
        AdjustVisitsCommand, CreateCaseCommand, DeleteCaseCommand, UpdateCaseCommand,
        VisitAdjustment,
    },
    dto::{
        AuthenticatedUser, CaseDetailDto, CaseDto, CaseListDto, ChecklistItemDto, ExportedFile,
    },
    error::ApplicationError,
    queries::cases::{ExportCaseQuery, ExportCasesQuery, GetCaseQuery, ListCasesQuery},
};
use crate::domain::case::RawCaseFields;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCasesParams {
    /// Free-text filter over code, names, address and phone.
    pub q: Option<String>,
    /// Four-digit creation year.
    pub year: Option<String>,
    /// `asc` or `desc` (default) by code sequence.
    pub sort: Option<String>,
}

/// Editable case fields plus the checklist statuses keyed by catalog item id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CaseRequest {
    #[schema(example = "35/0126")]
    pub code: String,
    pub property_name: String,
    #[serde(default)]
    pub legal_representative: Option<String>,
    #[serde(default)]
    pub agents: Option<String>,
    #[serde(default)]
    pub inspection_address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[schema(example = "Propietario")]
    pub requested_by: String,
    #[serde(default)]
    #[schema(example = "Archivo 1")]
    pub archive_location: Option<String>,
    /// `presenta` or `no_presenta`; anything else leaves the item unset.
    #[serde(default)]
    pub checklist: HashMap<i64, String>,
}

impl CaseRequest {
    fn into_parts(self) -> (RawCaseFields, HashMap<i64, String>) {
        let fields = RawCaseFields {
            code: self.code,
            property_name: self.property_name,
            legal_representative: self.legal_representative,
            agents: self.agents,
            inspection_address: self.inspection_address,
            phone: self.phone,
            requested_by: self.requested_by,
            archive_location: self.archive_location,
        };
        (fields, self.checklist)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportCasesRequest {
    pub ids: Vec<i64>,
}

fn file_response(file: ExportedFile) -> HttpResult<Response> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.file_name
    ))
    .map_err(|err| HttpError::from_error(ApplicationError::infrastructure(err.to_string())))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(file.bytes),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/cases",
    params(ListCasesParams),
    responses(
        (status = 200, description = "Matching cases and the available creation years.", body = CaseListDto),
        (status = 400, description = "Invalid year or sort.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn list_cases(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListCasesParams>,
) -> HttpResult<Json<CaseListDto>> {
    let query = ListCasesQuery {
        q: params.q,
        year: params.year,
        sort: params.sort,
    };

    state
        .services
        .case_queries
        .list_cases(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/cases",
    request_body = CaseRequest,
    responses(
        (status = 200, description = "Case created.", body = CaseDetailDto),
        (status = 400, description = "Invalid fields or code.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Code already registered.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn create_case(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CaseRequest>,
) -> HttpResult<Json<CaseDetailDto>> {
    let (fields, checklist) = payload.into_parts();

    state
        .services
        .case_commands
        .create_case(&user, CreateCaseCommand { fields, checklist })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/cases/{id}",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case with its checklist.", body = CaseDetailDto),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn get_case(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<CaseDetailDto>> {
    state
        .services
        .case_queries
        .get_case(&user, GetCaseQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/cases/{id}",
    params(("id" = i64, Path, description = "Case id")),
    request_body = CaseRequest,
    responses(
        (status = 200, description = "Case updated.", body = CaseDetailDto),
        (status = 400, description = "Invalid fields or code.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Code already registered.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn update_case(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<CaseRequest>,
) -> HttpResult<Json<CaseDetailDto>> {
    let (fields, checklist) = payload.into_parts();

    state
        .services
        .case_commands
        .update_case(
            &user,
            UpdateCaseCommand {
                id,
                fields,
                checklist,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/cases/{id}",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case deleted."),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn delete_case(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .case_commands
        .delete_case(&user, DeleteCaseCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}

async fn adjust_visits(
    state: HttpState,
    user: &AuthenticatedUser,
    id: i64,
    adjustment: VisitAdjustment,
) -> HttpResult<Json<CaseDto>> {
    state
        .services
        .case_commands
        .adjust_visits(user, AdjustVisitsCommand { id, adjustment })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/cases/{id}/visits/increment",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Visit recorded.", body = CaseDto),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn increment_visits(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<CaseDto>> {
    adjust_visits(state, &user, id, VisitAdjustment::Increment).await
}

#[utoipa::path(
    post,
    path = "/api/v1/cases/{id}/visits/decrement",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Visit removed; stays at zero.", body = CaseDto),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn decrement_visits(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<CaseDto>> {
    adjust_visits(state, &user, id, VisitAdjustment::Decrement).await
}

#[utoipa::path(
    get,
    path = "/api/v1/cases/{id}/pdf",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Printable case summary.", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Unknown case.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Export"
)]
pub async fn export_case_pdf(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Response> {
    let file = state
        .services
        .case_queries
        .export_case_pdf(&user, ExportCaseQuery { id })
        .await
        .into_http()?;

    file_response(file)
}

#[utoipa::path(
    post,
    path = "/api/v1/cases/export",
    request_body = ExportCasesRequest,
    responses(
        (status = 200, description = "ZIP with one PDF per existing case.", content_type = "application/zip", body = Vec<u8>),
        (status = 400, description = "No ids given.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Export"
)]
pub async fn export_cases(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ExportCasesRequest>,
) -> HttpResult<Response> {
    let file = state
        .services
        .case_queries
        .export_cases_archive(&user, ExportCasesQuery { ids: payload.ids })
        .await
        .into_http()?;

    file_response(file)
}

#[utoipa::path(
    get,
    path = "/api/v1/checklist-items",
    responses(
        (status = 200, description = "Checklist catalog in display order.", body = [ChecklistItemDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Cases"
)]
pub async fn list_checklist_items(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<ChecklistItemDto>>> {
    state
        .services
        .case_queries
        .list_checklist_items(&user)
        .await
        .into_http()
        .map(Json)
}
