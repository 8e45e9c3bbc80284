// src/application/commands/cases/update.rs
use super::{CaseCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, CaseDetailDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditEntity, NewAuditEntry, diff_checklist, diff_fields},
        case::{CASE_AUDITED_FIELDS, CaseFields, CaseId, CaseUpdate, RawCaseFields},
        checklist::ChecklistState,
    },
};
use std::collections::HashMap;
use tracing::info;

pub struct UpdateCaseCommand {
    pub id: i64,
    pub fields: RawCaseFields,
    /// Full checklist submission; catalog items left out become unset.
    pub checklist: HashMap<i64, String>,
}

impl CaseCommandService {
    pub async fn update_case(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateCaseCommand,
    ) -> ApplicationResult<CaseDetailDto> {
        ensure_capability(actor, "cases", "update")?;

        let id = CaseId::new(command.id)?;
        let current = self.load_case(id).await?;
        let fields = CaseFields::parse(command.fields)?;

        let catalog = self.checklist_repo.catalog().await?;
        let previous_state = self.checklist_repo.state_for(id).await?;
        let checklist = ChecklistState::from_submitted(&catalog, &command.checklist);

        let now = self.clock.now();
        let actor_id = Some(actor.id);
        let mut changes: Vec<NewAuditEntry> =
            diff_fields(CASE_AUDITED_FIELDS, &current.fields, &fields)
                .into_iter()
                .map(|change| NewAuditEntry::changed(now, actor_id, AuditEntity::Case, id.0, change))
                .collect();
        changes.extend(
            diff_checklist(&catalog, &previous_state, &checklist)
                .into_iter()
                .map(|change| {
                    NewAuditEntry::changed(now, actor_id, AuditEntity::CaseChecklist, id.0, change)
                }),
        );
        let change_count = changes.len();

        let update = CaseUpdate {
            id,
            fields,
            checklist: checklist.clone(),
            updated_at: now,
            updated_by: actor_id,
        };
        let case = self.write_repo.update(update, changes).await?;
        info!(case_id = %id, changes = change_count, user = %actor.username, "case updated");

        Ok(CaseDetailDto::from_parts(case, catalog, &checklist))
    }
}
