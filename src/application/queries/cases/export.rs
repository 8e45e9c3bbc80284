use super::{CaseQueryService, common};
use crate::{
    application::{
        dto::{AuthenticatedUser, ExportedFile},
        error::{ApplicationError, ApplicationResult},
        ports::export::CaseDocument,
    },
    domain::{
        case::{Case, CaseId},
        checklist::ChecklistItem,
    },
};
use std::collections::HashSet;
use tracing::info;

pub const ARCHIVE_FILE_NAME: &str = "expedientes.zip";

pub struct ExportCaseQuery {
    pub id: i64,
}

pub struct ExportCasesQuery {
    pub ids: Vec<i64>,
}

impl CaseQueryService {
    pub async fn export_case_pdf(
        &self,
        actor: &AuthenticatedUser,
        query: ExportCaseQuery,
    ) -> ApplicationResult<ExportedFile> {
        common::ensure_export_capability(actor)?;

        let id = CaseId::new(query.id)?;
        let case = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("case not found"))?;
        let catalog = self.checklist_repo.catalog().await?;
        let document = self.render_document(&case, &catalog).await?;

        Ok(ExportedFile::pdf(document.file_name, document.bytes))
    }

    /// One PDF per requested case that still exists, packed in a ZIP archive.
    /// Unknown ids are skipped; an empty request is rejected.
    pub async fn export_cases_archive(
        &self,
        actor: &AuthenticatedUser,
        query: ExportCasesQuery,
    ) -> ApplicationResult<ExportedFile> {
        common::ensure_export_capability(actor)?;

        let ids = requested_ids(&query.ids);
        if ids.is_empty() {
            return Err(ApplicationError::validation(
                "select at least one case to export",
            ));
        }

        let cases = self.read_repo.find_many(&ids).await?;
        let catalog = self.checklist_repo.catalog().await?;

        let mut documents = Vec::with_capacity(cases.len());
        for case in &cases {
            documents.push(self.render_document(case, &catalog).await?);
        }

        let bytes = self.archiver.archive(&documents)?;
        info!(
            requested = ids.len(),
            exported = documents.len(),
            user = %actor.username,
            "case archive exported"
        );

        Ok(ExportedFile::zip(ARCHIVE_FILE_NAME, bytes))
    }

    async fn render_document(
        &self,
        case: &Case,
        catalog: &[ChecklistItem],
    ) -> ApplicationResult<CaseDocument> {
        let state = self.checklist_repo.state_for(case.id).await?;
        let bytes = self.renderer.render(case, catalog, &state)?;
        Ok(CaseDocument {
            file_name: format!("{}.pdf", case.code().file_stem()),
            bytes,
        })
    }
}

/// Valid ids in request order, without duplicates.
fn requested_ids(raw: &[i64]) -> Vec<CaseId> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|id| CaseId::new(*id).ok())
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_ids_drop_invalid_and_duplicate_entries() {
        let ids = requested_ids(&[3, -1, 0, 7, 3]);
        assert_eq!(ids, vec![CaseId(3), CaseId(7)]);
        assert!(requested_ids(&[0]).is_empty());
    }
}
