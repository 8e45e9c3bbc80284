// src/application/commands/cases/create.rs
use super::{CaseCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, CaseDetailDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditEntity, NewAuditEntry},
        case::{CaseFields, NewCase, RawCaseFields},
        checklist::ChecklistState,
    },
};
use std::collections::HashMap;
use tracing::info;

pub struct CreateCaseCommand {
    pub fields: RawCaseFields,
    /// Submitted status per catalog item id.
    pub checklist: HashMap<i64, String>,
}

impl CaseCommandService {
    pub async fn create_case(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCaseCommand,
    ) -> ApplicationResult<CaseDetailDto> {
        ensure_capability(actor, "cases", "create")?;

        let fields = CaseFields::parse(command.fields)?;
        let catalog = self.checklist_repo.catalog().await?;
        let checklist = ChecklistState::from_submitted(&catalog, &command.checklist);

        let now = self.clock.now();
        let new_case = NewCase {
            fields,
            checklist: checklist.clone(),
            created_at: now,
            created_by: Some(actor.id),
        };
        let creation = NewAuditEntry::created(now, Some(actor.id), AuditEntity::Case, None);

        let case = self.write_repo.insert(new_case, creation).await?;
        info!(case_id = %case.id, code = %case.code(), user = %actor.username, "case created");

        Ok(CaseDetailDto::from_parts(case, catalog, &checklist))
    }
}
