// src/infrastructure/repositories/audit_entries.rs
use crate::domain::audit::{AuditAction, AuditEntity, AuditEntry, NewAuditEntry};
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};

/// Append one audit row on the given connection, usually inside the
/// transaction of the write it describes.
pub(super) async fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &NewAuditEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_log (at, user_id, action, entity, entity_id, field, old_value, new_value) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.at)
    .bind(entry.user_id.map(i64::from))
    .bind(entry.action.as_str())
    .bind(entry.entity.as_str())
    .bind(entry.entity_id)
    .bind(entry.field.as_deref())
    .bind(entry.old_value.as_deref())
    .bind(entry.new_value.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}

pub(super) async fn insert_entries(
    conn: &mut SqliteConnection,
    entries: &[NewAuditEntry],
) -> Result<(), sqlx::Error> {
    for entry in entries {
        insert_entry(&mut *conn, entry).await?;
    }
    Ok(())
}

#[derive(Debug, FromRow)]
pub(super) struct AuditEntryRow {
    id: i64,
    at: DateTime<Utc>,
    user_id: Option<i64>,
    username: Option<String>,
    action: String,
    entity: String,
    entity_id: Option<i64>,
    field: Option<String>,
    old_value: Option<String>,
    new_value: Option<String>,
}

impl TryFrom<AuditEntryRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditEntryRow) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: row.id,
            at: row.at,
            user_id: row.user_id.map(UserId::new).transpose()?,
            username: row.username,
            action: row.action.parse::<AuditAction>()?,
            entity: row.entity.parse::<AuditEntity>()?,
            entity_id: row.entity_id,
            field: row.field,
            old_value: row.old_value,
            new_value: row.new_value,
        })
    }
}
