// src/infrastructure/repositories/sqlite_checklist.rs
use super::error::map_sqlx;
use crate::domain::case::CaseId;
use crate::domain::checklist::{
    ChecklistItem, ChecklistItemId, ChecklistRepository, ChecklistState, ChecklistStatus,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteChecklistRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteChecklistRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChecklistItemRow {
    id: i64,
    label: String,
    sort_order: i64,
}

impl From<ChecklistItemRow> for ChecklistItem {
    fn from(row: ChecklistItemRow) -> Self {
        ChecklistItem {
            id: ChecklistItemId(row.id),
            label: row.label,
            sort_order: row.sort_order,
        }
    }
}

#[async_trait]
impl ChecklistRepository for SqliteChecklistRepository {
    async fn catalog(&self) -> DomainResult<Vec<ChecklistItem>> {
        let rows = sqlx::query_as::<_, ChecklistItemRow>(
            "SELECT id, label, sort_order FROM checklist_items ORDER BY sort_order, id",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn state_for(&self, case_id: CaseId) -> DomainResult<ChecklistState> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT item_id, status FROM case_checklist WHERE case_id = ? AND status IS NOT NULL",
        )
        .bind(i64::from(case_id))
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut state = ChecklistState::new();
        for (item_id, status) in rows {
            state.set(
                ChecklistItemId(item_id),
                ChecklistStatus::parse_lenient(&status),
            );
        }
        Ok(state)
    }
}
