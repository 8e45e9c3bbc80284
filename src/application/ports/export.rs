// src/application/ports/export.rs
use crate::application::ApplicationResult;
use crate::domain::case::Case;
use crate::domain::checklist::{ChecklistItem, ChecklistState};

/// Renders the printable summary of one case.
pub trait CaseDocumentRenderer: Send + Sync {
    fn render(
        &self,
        case: &Case,
        catalog: &[ChecklistItem],
        state: &ChecklistState,
    ) -> ApplicationResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct CaseDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Packs several documents into one downloadable container.
pub trait DocumentArchiver: Send + Sync {
    fn archive(&self, documents: &[CaseDocument]) -> ApplicationResult<Vec<u8>>;
}
