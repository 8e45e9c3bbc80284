// src/infrastructure/repositories/sqlite_case.rs
use super::audit_entries::{insert_entries, insert_entry};
use super::error::map_sqlx;
use crate::domain::audit::NewAuditEntry;
use crate::domain::case::{
    ArchiveLocation, Case, CaseCode, CaseFields, CaseId, CaseListFilter, CaseReadRepository,
    CaseUpdate, CaseWriteRepository, NewCase, PropertyName, VisitCountChange,
};
use crate::domain::checklist::ChecklistState;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;

macro_rules! case_columns {
    () => {
        "id, code, property_name, legal_representative, agents, inspection_address, phone, requested_by, archive_location, visit_count, created_at, created_by, updated_at, updated_by"
    };
}

/// Columns matched by the free-text filter.
const SEARCH_COLUMNS: [&str; 6] = [
    "code",
    "property_name",
    "legal_representative",
    "agents",
    "inspection_address",
    "phone",
];

#[derive(Clone)]
pub struct SqliteCaseWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCaseWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteCaseReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCaseReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CaseRow {
    id: i64,
    code: String,
    property_name: String,
    legal_representative: Option<String>,
    agents: Option<String>,
    inspection_address: Option<String>,
    phone: Option<String>,
    requested_by: String,
    archive_location: Option<String>,
    visit_count: i64,
    created_at: DateTime<Utc>,
    created_by: Option<i64>,
    updated_at: DateTime<Utc>,
    updated_by: Option<i64>,
}

impl TryFrom<CaseRow> for Case {
    type Error = DomainError;

    fn try_from(row: CaseRow) -> Result<Self, Self::Error> {
        let visit_count = u32::try_from(row.visit_count).map_err(|_| {
            DomainError::Persistence(format!("invalid visit count {}", row.visit_count))
        })?;

        Ok(Case {
            id: CaseId::new(row.id)?,
            fields: CaseFields {
                code: CaseCode::parse(&row.code)?,
                property_name: PropertyName::new(row.property_name)?,
                legal_representative: row.legal_representative,
                agents: row.agents,
                inspection_address: row.inspection_address,
                phone: row.phone,
                requested_by: row.requested_by.parse()?,
                archive_location: ArchiveLocation::parse_lenient(row.archive_location.as_deref()),
            },
            visit_count,
            created_at: row.created_at,
            created_by: row.created_by.map(UserId::new).transpose()?,
            updated_at: row.updated_at,
            updated_by: row.updated_by.map(UserId::new).transpose()?,
        })
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Make sure a link row exists for every catalog item, then overwrite all
/// statuses with `state`.
async fn write_checklist(
    conn: &mut SqliteConnection,
    case_id: i64,
    state: &ChecklistState,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT OR IGNORE INTO case_checklist (case_id, item_id, status) SELECT ?, id, NULL FROM checklist_items",
    )
    .bind(case_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("UPDATE case_checklist SET status = NULL WHERE case_id = ?")
        .bind(case_id)
        .execute(&mut *conn)
        .await?;

    for (item_id, status) in state.iter() {
        sqlx::query(
            "INSERT INTO case_checklist (case_id, item_id, status) VALUES (?, ?, ?) ON CONFLICT (case_id, item_id) DO UPDATE SET status = excluded.status",
        )
        .bind(case_id)
        .bind(i64::from(item_id))
        .bind(status.as_str())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl CaseWriteRepository for SqliteCaseWriteRepository {
    async fn insert(&self, new_case: NewCase, creation: NewAuditEntry) -> DomainResult<Case> {
        let NewCase {
            fields,
            checklist,
            created_at,
            created_by,
        } = new_case;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, CaseRow>(concat!(
            "INSERT INTO cases (code, property_name, legal_representative, agents, inspection_address, phone, requested_by, archive_location, visit_count, created_at, created_by, updated_at, updated_by) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?) RETURNING ",
            case_columns!()
        ))
        .bind(fields.code.as_str())
        .bind(fields.property_name.as_str())
        .bind(fields.legal_representative.as_deref())
        .bind(fields.agents.as_deref())
        .bind(fields.inspection_address.as_deref())
        .bind(fields.phone.as_deref())
        .bind(fields.requested_by.as_str())
        .bind(fields.archive_location.map(|a| a.as_str()))
        .bind(created_at)
        .bind(created_by.map(i64::from))
        .bind(created_at)
        .bind(created_by.map(i64::from))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        write_checklist(&mut tx, row.id, &checklist)
            .await
            .map_err(map_sqlx)?;
        insert_entry(&mut tx, &creation.with_entity_id(row.id))
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Case::try_from(row)
    }

    async fn update(
        &self,
        update: CaseUpdate,
        changes: Vec<NewAuditEntry>,
    ) -> DomainResult<Case> {
        let CaseUpdate {
            id,
            fields,
            checklist,
            updated_at,
            updated_by,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, CaseRow>(concat!(
            "UPDATE cases SET code = ?, property_name = ?, legal_representative = ?, agents = ?, inspection_address = ?, phone = ?, requested_by = ?, archive_location = ?, updated_at = ?, updated_by = ? WHERE id = ? RETURNING ",
            case_columns!()
        ))
        .bind(fields.code.as_str())
        .bind(fields.property_name.as_str())
        .bind(fields.legal_representative.as_deref())
        .bind(fields.agents.as_deref())
        .bind(fields.inspection_address.as_deref())
        .bind(fields.phone.as_deref())
        .bind(fields.requested_by.as_str())
        .bind(fields.archive_location.map(|a| a.as_str()))
        .bind(updated_at)
        .bind(updated_by.map(i64::from))
        .bind(i64::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("case not found".into()))?;

        write_checklist(&mut tx, row.id, &checklist)
            .await
            .map_err(map_sqlx)?;
        insert_entries(&mut tx, &changes).await.map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Case::try_from(row)
    }

    async fn set_visit_count(
        &self,
        change: VisitCountChange,
        changes: Vec<NewAuditEntry>,
    ) -> DomainResult<Case> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, CaseRow>(concat!(
            "UPDATE cases SET visit_count = ?, updated_at = ?, updated_by = ? WHERE id = ? RETURNING ",
            case_columns!()
        ))
        .bind(i64::from(change.visit_count))
        .bind(change.updated_at)
        .bind(change.updated_by.map(i64::from))
        .bind(i64::from(change.id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("case not found".into()))?;

        insert_entries(&mut tx, &changes).await.map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Case::try_from(row)
    }

    async fn delete(&self, id: CaseId, deletion: NewAuditEntry) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        insert_entry(&mut tx, &deletion).await.map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM cases WHERE id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("case not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl CaseReadRepository for SqliteCaseReadRepository {
    async fn find_by_id(&self, id: CaseId) -> DomainResult<Option<Case>> {
        let row = sqlx::query_as::<_, CaseRow>(concat!(
            "SELECT ",
            case_columns!(),
            " FROM cases WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Case::try_from).transpose()
    }

    async fn find_many(&self, ids: &[CaseId]) -> DomainResult<Vec<Case>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(concat!("SELECT ", case_columns!(), " FROM cases WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(i64::from(*id));
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<CaseRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut by_id: HashMap<CaseId, Case> = HashMap::with_capacity(rows.len());
        for row in rows {
            let case = Case::try_from(row)?;
            by_id.insert(case.id, case);
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn list(&self, filter: &CaseListFilter) -> DomainResult<Vec<Case>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(concat!("SELECT ", case_columns!(), " FROM cases WHERE 1 = 1"));

        if let Some(q) = filter.q.as_deref() {
            let pattern = format!("%{}%", escape_like(q));
            builder.push(" AND (");
            for (idx, column) in SEARCH_COLUMNS.iter().enumerate() {
                if idx > 0 {
                    builder.push(" OR ");
                }
                builder.push(*column);
                builder.push(" LIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" ESCAPE '\\'");
            }
            builder.push(")");
        }

        if let Some(year) = filter.year {
            builder.push(" AND substr(created_at, 1, 4) = ");
            builder.push_bind(format!("{year:04}"));
        }

        builder.push(" ORDER BY CAST(substr(code, 1, 4) AS INTEGER) ");
        builder.push(filter.sort.as_sql());
        builder.push(", created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<CaseRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Case::try_from).collect()
    }

    async fn distinct_years(&self) -> DomainResult<Vec<i32>> {
        let years = sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT CAST(substr(created_at, 1, 4) AS INTEGER) AS year FROM cases ORDER BY year DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        years
            .into_iter()
            .map(|year| {
                i32::try_from(year)
                    .map_err(|_| DomainError::Persistence(format!("invalid year {year}")))
            })
            .collect()
    }
}
