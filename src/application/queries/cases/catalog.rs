use super::{CaseQueryService, common};
use crate::application::{
    dto::{AuthenticatedUser, ChecklistItemDto},
    error::ApplicationResult,
};

impl CaseQueryService {
    pub async fn list_checklist_items(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<ChecklistItemDto>> {
        common::ensure_read_capability(actor)?;

        let catalog = self.checklist_repo.catalog().await?;
        Ok(catalog.into_iter().map(Into::into).collect())
    }
}
