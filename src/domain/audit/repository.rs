use crate::domain::audit::entity::{AuditEntity, AuditEntry, NewAuditEntry};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub entity: Option<AuditEntity>,
    pub entity_id: Option<i64>,
    pub user_id: Option<UserId>,
    pub limit: u32,
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append a standalone entry outside of any other write.
    async fn record(&self, entry: NewAuditEntry) -> DomainResult<()>;

    /// Entries matching `filter`, most recent first.
    async fn list(&self, filter: &AuditLogFilter) -> DomainResult<Vec<AuditEntry>>;
}
