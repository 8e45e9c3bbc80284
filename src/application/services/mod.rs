// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationError, ApplicationResult,
        commands::{cases::CaseCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        ports::{
            export::{CaseDocumentRenderer, DocumentArchiver},
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{audit::AuditQueryService, cases::CaseQueryService, users::UserQueryService},
    },
    domain::{
        audit::AuditLogRepository,
        case::{CaseReadRepository, CaseWriteRepository},
        checklist::ChecklistRepository,
        user::UserRepository,
    },
};
use tracing::warn;

/// Storage adapters the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub case_reads: Arc<dyn CaseReadRepository>,
    pub case_writes: Arc<dyn CaseWriteRepository>,
    pub checklist: Arc<dyn ChecklistRepository>,
    pub audit_log: Arc<dyn AuditLogRepository>,
}

/// Non-storage ports.
#[derive(Clone)]
pub struct Adapters {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub renderer: Arc<dyn CaseDocumentRenderer>,
    pub archiver: Arc<dyn DocumentArchiver>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub case_commands: Arc<CaseCommandService>,
    pub case_queries: Arc<CaseQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    user_repo: Arc<dyn UserRepository>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(repos: Repositories, adapters: Adapters) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&adapters.password_hasher),
            Arc::clone(&adapters.token_manager),
            Arc::clone(&adapters.clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&adapters.clock),
        ));

        let case_commands = Arc::new(CaseCommandService::new(
            Arc::clone(&repos.case_writes),
            Arc::clone(&repos.case_reads),
            Arc::clone(&repos.checklist),
            Arc::clone(&adapters.clock),
        ));
        let case_queries = Arc::new(CaseQueryService::new(
            Arc::clone(&repos.case_reads),
            Arc::clone(&repos.checklist),
            Arc::clone(&adapters.renderer),
            Arc::clone(&adapters.archiver),
        ));

        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&repos.audit_log)));

        Self {
            user_commands,
            user_queries,
            case_commands,
            case_queries,
            audit_queries,
            user_repo: repos.users,
            token_manager: adapters.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Resolve a raw bearer token to the current state of its account.
    ///
    /// The token only proves who the caller was at issue time. The account is
    /// re-read on every call so deletions, deactivations and role changes take
    /// effect immediately; the stored role decides the capabilities.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let claimed = self.token_manager.authenticate(token).await?;

        let Some(user) = self.user_repo.find_by_id(claimed.id).await? else {
            warn!(user_id = %claimed.id, "token presented for a deleted account");
            return Err(ApplicationError::unauthorized("account no longer exists"));
        };

        if !user.is_active {
            warn!(user_id = %user.id, "token presented for an inactive account");
            return Err(ApplicationError::unauthorized("account is disabled"));
        }

        Ok(claimed.refreshed_from(&user))
    }

    /// Authenticate and ensure the caller holds `resource:action`.
    pub async fn authenticate_and_authorize(
        &self,
        token: &str,
        resource: &str,
        action: &str,
    ) -> ApplicationResult<AuthenticatedUser> {
        let user = self.authenticate(token).await?;
        if user.has_capability(resource, action) {
            Ok(user)
        } else {
            Err(ApplicationError::forbidden(format!(
                "missing capability {resource}:{action}"
            )))
        }
    }
}
