// src/application/commands/cases/delete.rs
use super::{CaseCommandService, capability::ensure_capability};
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationResult},
    domain::{
        audit::{AuditEntity, NewAuditEntry},
        case::CaseId,
    },
};
use tracing::info;

pub struct DeleteCaseCommand {
    pub id: i64,
}

impl CaseCommandService {
    pub async fn delete_case(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCaseCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "cases", "delete")?;

        let id = CaseId::new(command.id)?;
        let case = self.load_case(id).await?;

        let deletion = NewAuditEntry::deleted(
            self.clock.now(),
            Some(actor.id),
            AuditEntity::Case,
            id.0,
            case.snapshot_tag(),
        );
        self.write_repo.delete(id, deletion).await?;
        info!(case_id = %id, code = %case.code(), user = %actor.username, "case deleted");

        Ok(())
    }
}
