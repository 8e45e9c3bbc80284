use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditEntity, AuditLogFilter},
        user::UserId,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListAuditLogsQuery {
    pub entity: Option<String>,
    pub entity_id: Option<i64>,
    pub user_id: Option<i64>,
    pub limit: u32,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;

        let entity = match query.entity.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<AuditEntity>()?),
        };
        let user_id = query.user_id.map(UserId::new).transpose()?;

        let filter = AuditLogFilter {
            entity,
            entity_id: query.entity_id,
            user_id,
            limit: common::normalize_limit(query.limit),
        };

        let entries = self.repo.list(&filter).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
