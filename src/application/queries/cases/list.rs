use super::{CaseQueryService, common};
use crate::{
    application::{
        dto::{AuthenticatedUser, CaseListDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::case::{CaseListFilter, SortDirection},
};

#[derive(Debug, Clone, Default)]
pub struct ListCasesQuery {
    pub q: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
}

impl CaseQueryService {
    pub async fn list_cases(
        &self,
        actor: &AuthenticatedUser,
        query: ListCasesQuery,
    ) -> ApplicationResult<CaseListDto> {
        common::ensure_read_capability(actor)?;

        let filter = CaseListFilter {
            q: query
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            year: parse_year(query.year.as_deref())?,
            sort: match query.sort.as_deref().map(str::trim) {
                None | Some("") => SortDirection::default(),
                Some(raw) => raw.parse()?,
            },
        };

        let cases = self.read_repo.list(&filter).await?;
        let years = self.read_repo.distinct_years().await?;

        Ok(CaseListDto {
            items: cases.into_iter().map(Into::into).collect(),
            years,
        })
    }
}

fn parse_year(raw: Option<&str>) -> ApplicationResult<Option<i32>> {
    let Some(raw) = raw.map(str::trim).filter(|y| !y.is_empty()) else {
        return Ok(None);
    };
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApplicationError::validation("year must have four digits"));
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ApplicationError::validation("year must have four digits"))
}
