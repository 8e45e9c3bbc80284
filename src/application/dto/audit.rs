use crate::domain::audit::AuditEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    #[serde(with = "serde_time")]
    pub at: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    #[schema(example = "UPDATE")]
    pub action: String,
    #[schema(example = "cases")]
    pub entity: String,
    pub entity_id: Option<i64>,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl From<AuditEntry> for AuditLogDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            at: entry.at,
            user_id: entry.user_id.map(Into::into),
            username: entry.username,
            action: entry.action.to_string(),
            entity: entry.entity.to_string(),
            entity_id: entry.entity_id,
            field: entry.field,
            old_value: entry.old_value,
            new_value: entry.new_value,
        }
    }
}
