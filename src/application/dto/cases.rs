use crate::domain::case::Case;
use crate::domain::checklist::{ChecklistItem, ChecklistState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseDto {
    pub id: i64,
    #[schema(example = "0035/0126/DPCJM")]
    pub code: String,
    pub property_name: String,
    pub legal_representative: Option<String>,
    pub agents: Option<String>,
    pub inspection_address: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "Propietario")]
    pub requested_by: String,
    #[schema(example = "Archivo 1")]
    pub archive_location: Option<String>,
    pub visit_count: u32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
}

impl From<Case> for CaseDto {
    fn from(case: Case) -> Self {
        let fields = case.fields;
        Self {
            id: case.id.into(),
            code: fields.code.into(),
            property_name: fields.property_name.into(),
            legal_representative: fields.legal_representative,
            agents: fields.agents,
            inspection_address: fields.inspection_address,
            phone: fields.phone,
            requested_by: fields.requested_by.to_string(),
            archive_location: fields.archive_location.map(|a| a.to_string()),
            visit_count: case.visit_count,
            created_at: case.created_at,
            created_by: case.created_by.map(Into::into),
            updated_at: case.updated_at,
            updated_by: case.updated_by.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItemDto {
    pub id: i64,
    pub label: String,
    pub sort_order: i64,
}

impl From<ChecklistItem> for ChecklistItemDto {
    fn from(item: ChecklistItem) -> Self {
        Self {
            id: item.id.into(),
            label: item.label,
            sort_order: item.sort_order,
        }
    }
}

/// One catalog item with this case's status: `presenta`, `no_presenta` or null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistEntryDto {
    pub item_id: i64,
    pub label: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseDetailDto {
    pub case: CaseDto,
    pub checklist: Vec<ChecklistEntryDto>,
}

impl CaseDetailDto {
    pub fn from_parts(case: Case, catalog: Vec<ChecklistItem>, state: &ChecklistState) -> Self {
        let checklist = catalog
            .into_iter()
            .map(|item| ChecklistEntryDto {
                item_id: item.id.into(),
                status: state.status_of(item.id).map(|s| s.to_string()),
                label: item.label,
            })
            .collect();
        Self {
            case: case.into(),
            checklist,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseListDto {
    pub items: Vec<CaseDto>,
    /// Creation years present in storage, most recent first.
    pub years: Vec<i32>,
}
