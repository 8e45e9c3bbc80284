// src/application/commands/cases/visits.rs
use super::{CaseCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, CaseDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditEntity, FieldChange, NewAuditEntry},
        case::{CaseId, VISIT_COUNT_FIELD, VisitCountChange},
    },
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitAdjustment {
    Increment,
    Decrement,
}

pub struct AdjustVisitsCommand {
    pub id: i64,
    pub adjustment: VisitAdjustment,
}

impl CaseCommandService {
    /// Add or remove one inspection visit. Decrementing at zero keeps the
    /// count at zero but still stamps the case and logs a `0` to `0` change.
    pub async fn adjust_visits(
        &self,
        actor: &AuthenticatedUser,
        command: AdjustVisitsCommand,
    ) -> ApplicationResult<CaseDto> {
        ensure_capability(actor, "cases", "visits")?;

        let id = CaseId::new(command.id)?;
        let case = self.load_case(id).await?;

        let next = match command.adjustment {
            VisitAdjustment::Increment => case.visits_after_increment(),
            VisitAdjustment::Decrement => case.visits_after_decrement(),
        };
        // Recorded even when the count is already zero and stays there.
        let change = FieldChange {
            field: VISIT_COUNT_FIELD.to_string(),
            old_value: case.visit_count.to_string(),
            new_value: next.to_string(),
        };

        let now = self.clock.now();
        let entry = NewAuditEntry::changed(now, Some(actor.id), AuditEntity::Case, id.0, change);
        let updated = self
            .write_repo
            .set_visit_count(
                VisitCountChange {
                    id,
                    visit_count: next,
                    updated_at: now,
                    updated_by: Some(actor.id),
                },
                vec![entry],
            )
            .await?;
        info!(case_id = %id, visits = next, user = %actor.username, "visit count adjusted");

        Ok(updated.into())
    }
}
