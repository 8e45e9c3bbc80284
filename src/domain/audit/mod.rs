// src/domain/audit/mod.rs
pub mod diff;
pub mod entity;
pub mod repository;

pub use diff::{AuditedField, FieldChange, diff_checklist, diff_fields, diff_values};
pub use entity::{AuditAction, AuditEntity, AuditEntry, NewAuditEntry};
pub use repository::{AuditLogFilter, AuditLogRepository};
