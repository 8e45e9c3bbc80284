use super::{CaseQueryService, common};
use crate::{
    application::{
        dto::{AuthenticatedUser, CaseDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::case::CaseId,
};

pub struct GetCaseQuery {
    pub id: i64,
}

impl CaseQueryService {
    pub async fn get_case(
        &self,
        actor: &AuthenticatedUser,
        query: GetCaseQuery,
    ) -> ApplicationResult<CaseDetailDto> {
        common::ensure_read_capability(actor)?;

        let id = CaseId::new(query.id)?;
        let case = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("case not found"))?;
        let catalog = self.checklist_repo.catalog().await?;
        let state = self.checklist_repo.state_for(id).await?;

        Ok(CaseDetailDto::from_parts(case, catalog, &state))
    }
}
