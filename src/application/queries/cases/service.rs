use std::sync::Arc;

use crate::application::ports::export::{CaseDocumentRenderer, DocumentArchiver};
use crate::domain::case::CaseReadRepository;
use crate::domain::checklist::ChecklistRepository;

pub struct CaseQueryService {
    pub(super) read_repo: Arc<dyn CaseReadRepository>,
    pub(super) checklist_repo: Arc<dyn ChecklistRepository>,
    pub(super) renderer: Arc<dyn CaseDocumentRenderer>,
    pub(super) archiver: Arc<dyn DocumentArchiver>,
}

impl CaseQueryService {
    pub fn new(
        read_repo: Arc<dyn CaseReadRepository>,
        checklist_repo: Arc<dyn ChecklistRepository>,
        renderer: Arc<dyn CaseDocumentRenderer>,
        archiver: Arc<dyn DocumentArchiver>,
    ) -> Self {
        Self {
            read_repo,
            checklist_repo,
            renderer,
            archiver,
        }
    }
}
