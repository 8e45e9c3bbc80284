// src/infrastructure/repositories/sqlite_audit_log.rs
use super::audit_entries::{AuditEntryRow, insert_entry};
use super::error::map_sqlx;
use crate::domain::audit::{AuditEntry, AuditLogFilter, AuditLogRepository, NewAuditEntry};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn record(&self, entry: NewAuditEntry) -> DomainResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        insert_entry(&mut *conn, &entry).await.map_err(map_sqlx)
    }

    async fn list(&self, filter: &AuditLogFilter) -> DomainResult<Vec<AuditEntry>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT a.id, a.at, a.user_id, u.username, a.action, a.entity, a.entity_id, a.field, a.old_value, a.new_value FROM audit_log a LEFT JOIN users u ON u.id = a.user_id WHERE 1 = 1",
        );

        if let Some(entity) = filter.entity {
            builder.push(" AND a.entity = ");
            builder.push_bind(entity.as_str());
        }
        if let Some(entity_id) = filter.entity_id {
            builder.push(" AND a.entity_id = ");
            builder.push_bind(entity_id);
        }
        if let Some(user_id) = filter.user_id {
            builder.push(" AND a.user_id = ");
            builder.push_bind(i64::from(user_id));
        }

        builder.push(" ORDER BY a.id DESC LIMIT ");
        builder.push_bind(i64::from(filter.limit));

        let rows = builder
            .build_query_as::<AuditEntryRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
