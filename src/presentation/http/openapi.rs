// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::users::list_users,
        crate::presentation::http::controllers::users::create_user,
        crate::presentation::http::controllers::users::update_user,
        crate::presentation::http::controllers::users::delete_user,
        crate::presentation::http::controllers::cases::list_checklist_items,
        crate::presentation::http::controllers::cases::list_cases,
        crate::presentation::http::controllers::cases::create_case,
        crate::presentation::http::controllers::cases::get_case,
        crate::presentation::http::controllers::cases::update_case,
        crate::presentation::http::controllers::cases::delete_case,
        crate::presentation::http::controllers::cases::increment_visits,
        crate::presentation::http::controllers::cases::decrement_visits,
        crate::presentation::http::controllers::cases::export_case_pdf,
        crate::presentation::http::controllers::cases::export_cases,
        crate::presentation::http::controllers::audit::list_audit_logs
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::users::CreateUserRequest,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::presentation::http::controllers::cases::CaseRequest,
            crate::presentation::http::controllers::cases::ExportCasesRequest,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::CaseDto,
            crate::application::dto::CaseDetailDto,
            crate::application::dto::CaseListDto,
            crate::application::dto::ChecklistItemDto,
            crate::application::dto::ChecklistEntryDto,
            crate::application::dto::AuditLogDto
        )
    ),
    tags(
        (name = "Auth", description = "Login and current-user endpoints"),
        (name = "Users", description = "User administration"),
        (name = "Cases", description = "Case files and their checklist"),
        (name = "Export", description = "PDF and ZIP downloads"),
        (name = "Audit", description = "Change history"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Expedientes API",
        description = "Case-file records service",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// Swagger UI at `/docs`, the raw document at `/openapi.json`.
pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot(output_path: &Path) -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
