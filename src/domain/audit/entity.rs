// src/domain/audit/entity.rs
use crate::domain::audit::diff::FieldChange;
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(DomainError::Validation(format!(
                "unknown audit action '{other}'"
            ))),
        }
    }
}

/// Kind of record an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditEntity {
    Case,
    CaseChecklist,
    User,
}

impl AuditEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntity::Case => "cases",
            AuditEntity::CaseChecklist => "case_checklist",
            AuditEntity::User => "users",
        }
    }
}

impl fmt::Display for AuditEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEntity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cases" => Ok(AuditEntity::Case),
            "case_checklist" => Ok(AuditEntity::CaseChecklist),
            "users" => Ok(AuditEntity::User),
            other => Err(DomainError::Validation(format!(
                "unknown audit entity '{other}'"
            ))),
        }
    }
}

/// An audit entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub at: DateTime<Utc>,
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Option<i64>,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl NewAuditEntry {
    pub fn created(
        at: DateTime<Utc>,
        user_id: Option<UserId>,
        entity: AuditEntity,
        entity_id: Option<i64>,
    ) -> Self {
        Self {
            at,
            user_id,
            action: AuditAction::Create,
            entity,
            entity_id,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// `snapshot` identifies what was removed, e.g. `EXP:0035/0126/DPCJM`.
    pub fn deleted(
        at: DateTime<Utc>,
        user_id: Option<UserId>,
        entity: AuditEntity,
        entity_id: i64,
        snapshot: impl Into<String>,
    ) -> Self {
        Self {
            at,
            user_id,
            action: AuditAction::Delete,
            entity,
            entity_id: Some(entity_id),
            field: None,
            old_value: None,
            new_value: Some(snapshot.into()),
        }
    }

    pub fn changed(
        at: DateTime<Utc>,
        user_id: Option<UserId>,
        entity: AuditEntity,
        entity_id: i64,
        change: FieldChange,
    ) -> Self {
        Self {
            at,
            user_id,
            action: AuditAction::Update,
            entity,
            entity_id: Some(entity_id),
            field: Some(change.field),
            old_value: Some(change.old_value),
            new_value: Some(change.new_value),
        }
    }

    pub fn with_entity_id(mut self, entity_id: i64) -> Self {
        self.entity_id = Some(entity_id);
        self
    }
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub at: DateTime<Utc>,
    pub user_id: Option<UserId>,
    /// Current username of the acting user, if that user still exists.
    pub username: Option<String>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Option<i64>,
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}
