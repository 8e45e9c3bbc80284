use crate::domain::audit::NewAuditEntry;
use crate::domain::case::entity::{Case, CaseUpdate, NewCase, VisitCountChange};
use crate::domain::case::value_objects::CaseId;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::Validation(format!(
                "unknown sort direction '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseListFilter {
    /// Case-insensitive substring matched against the searchable text fields.
    pub q: Option<String>,
    /// Four-digit creation year.
    pub year: Option<i32>,
    pub sort: SortDirection,
}

#[async_trait]
pub trait CaseReadRepository: Send + Sync {
    async fn find_by_id(&self, id: CaseId) -> DomainResult<Option<Case>>;

    /// Cases for the given ids in the given order; unknown ids are skipped.
    async fn find_many(&self, ids: &[CaseId]) -> DomainResult<Vec<Case>>;

    async fn list(&self, filter: &CaseListFilter) -> DomainResult<Vec<Case>>;

    /// Creation years present in storage, most recent first.
    async fn distinct_years(&self) -> DomainResult<Vec<i32>>;
}

/// Every write also persists the audit entries describing it, atomically.
#[async_trait]
pub trait CaseWriteRepository: Send + Sync {
    /// `creation` is stored with `entity_id` set to the new case id.
    async fn insert(&self, new_case: NewCase, creation: NewAuditEntry) -> DomainResult<Case>;

    async fn update(&self, update: CaseUpdate, changes: Vec<NewAuditEntry>)
    -> DomainResult<Case>;

    async fn set_visit_count(
        &self,
        change: VisitCountChange,
        changes: Vec<NewAuditEntry>,
    ) -> DomainResult<Case>;

    async fn delete(&self, id: CaseId, deletion: NewAuditEntry) -> DomainResult<()>;
}
