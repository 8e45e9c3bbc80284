use crate::domain::case::CaseId;
use crate::domain::checklist::entity::{ChecklistItem, ChecklistState};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// The document catalog ordered by its sort key.
    async fn catalog(&self) -> DomainResult<Vec<ChecklistItem>>;

    async fn state_for(&self, case_id: CaseId) -> DomainResult<ChecklistState>;
}
