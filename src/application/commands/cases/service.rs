// src/application/commands/cases/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::case::{Case, CaseId, CaseReadRepository, CaseWriteRepository};
use crate::domain::checklist::ChecklistRepository;

pub struct CaseCommandService {
    pub(super) write_repo: Arc<dyn CaseWriteRepository>,
    pub(super) read_repo: Arc<dyn CaseReadRepository>,
    pub(super) checklist_repo: Arc<dyn ChecklistRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CaseCommandService {
    pub fn new(
        write_repo: Arc<dyn CaseWriteRepository>,
        read_repo: Arc<dyn CaseReadRepository>,
        checklist_repo: Arc<dyn ChecklistRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            checklist_repo,
            clock,
        }
    }

    pub(super) async fn load_case(&self, id: CaseId) -> ApplicationResult<Case> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("case not found"))
    }
}
