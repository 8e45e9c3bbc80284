// tests/support/helpers.rs
use super::fakes::{FixedClock, PlainPasswordHasher};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use expedientes::application::{
    commands::{cases::CreateCaseCommand, users::CreateUserCommand},
    dto::{AuthenticatedUser, CaseDetailDto, TokenSubject, UserDto},
    services::{Adapters, ApplicationServices, Repositories},
};
use expedientes::domain::{
    case::RawCaseFields,
    user::{Role, UserId},
};
use expedientes::infrastructure::{
    database,
    export::{PrintPdfRenderer, ZipArchiver},
    repositories::{
        SqliteAuditLogRepository, SqliteCaseReadRepository, SqliteCaseWriteRepository,
        SqliteChecklistRepository, SqliteUserRepository,
    },
    security::BiscuitTokenManager,
};
use expedientes::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::{collections::HashMap, sync::Arc, time::Duration};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pass";

/// Services wired to a fresh in-memory database with one administrator.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub pool: SqlitePool,
    pub admin: AuthenticatedUser,
}

impl TestApp {
    pub fn router(&self) -> axum::Router {
        build_router_with_rate_limiter(
            HttpState {
                services: Arc::clone(&self.services),
                db_pool: self.pool.clone(),
            },
            false,
        )
    }

    pub async fn user_with_role(&self, username: &str, role: Role) -> AuthenticatedUser {
        let dto = self
            .services
            .user_commands
            .create_user(
                &self.admin,
                CreateUserCommand {
                    username: username.into(),
                    password: format!("{username}-pass"),
                    role,
                    is_active: true,
                },
            )
            .await
            .expect("create user");
        authenticated(&dto)
    }

    pub async fn token_for(&self, user: &AuthenticatedUser) -> String {
        self.services
            .token_manager()
            .issue(TokenSubject {
                user_id: user.id,
                username: user.username.clone(),
                role: user.role,
            })
            .await
            .expect("issue token")
            .token
    }

    pub async fn create_case(&self, code: &str, property_name: &str) -> CaseDetailDto {
        self.services
            .case_commands
            .create_case(
                &self.admin,
                CreateCaseCommand {
                    fields: case_fields(code, property_name),
                    checklist: HashMap::new(),
                },
            )
            .await
            .expect("create case")
    }

    pub async fn audit_rows(&self) -> Vec<AuditRow> {
        sqlx::query_as::<_, AuditRow>(
            "SELECT action, entity, entity_id, field, old_value, new_value FROM audit_log ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .expect("read audit log")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuditRow {
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i64>,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub async fn test_app() -> TestApp {
    let pool = database::init_pool("sqlite::memory:")
        .await
        .expect("open in-memory database");
    database::run_migrations(&pool).await.expect("migrations");
    let shared = Arc::new(pool.clone());

    let repos = Repositories {
        users: Arc::new(SqliteUserRepository::new(Arc::clone(&shared))),
        case_reads: Arc::new(SqliteCaseReadRepository::new(Arc::clone(&shared))),
        case_writes: Arc::new(SqliteCaseWriteRepository::new(Arc::clone(&shared))),
        checklist: Arc::new(SqliteChecklistRepository::new(Arc::clone(&shared))),
        audit_log: Arc::new(SqliteAuditLogRepository::new(Arc::clone(&shared))),
    };
    let adapters = Adapters {
        password_hasher: Arc::new(PlainPasswordHasher),
        token_manager: Arc::new(BiscuitTokenManager::ephemeral(Duration::from_secs(3600))),
        clock: Arc::new(FixedClock::default()),
        renderer: Arc::new(PrintPdfRenderer),
        archiver: Arc::new(ZipArchiver),
    };
    let services = Arc::new(ApplicationServices::new(repos, adapters));

    let admin = services
        .user_commands
        .ensure_bootstrap_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("bootstrap admin")
        .expect("admin created on empty database");

    TestApp {
        services,
        pool,
        admin: authenticated(&admin),
    }
}

pub fn authenticated(user: &UserDto) -> AuthenticatedUser {
    let now = chrono::Utc::now();
    AuthenticatedUser {
        id: UserId(user.id),
        username: user.username.clone(),
        role: user.role,
        capabilities: user.role.default_capabilities(),
        issued_at: now,
        expires_at: now + chrono::Duration::hours(1),
    }
}

pub fn case_fields(code: &str, property_name: &str) -> RawCaseFields {
    RawCaseFields {
        code: code.into(),
        property_name: property_name.into(),
        requested_by: "Propietario".into(),
        ..RawCaseFields::default()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

/// Assert an `ErrorResponse` body with the given status and reason phrase.
pub async fn assert_error_response(response: Response, status: StatusCode, error: &str) -> Value {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["error"], error, "unexpected error body: {body}");
    assert!(body["message"].is_string(), "missing message: {body}");
    body
}
