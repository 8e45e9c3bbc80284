// src/infrastructure/repositories/mod.rs
mod audit_entries;
mod error;
mod sqlite_audit_log;
mod sqlite_case;
mod sqlite_checklist;
mod sqlite_user;

pub use error::map_sqlx;
pub use sqlite_audit_log::SqliteAuditLogRepository;
pub use sqlite_case::{SqliteCaseReadRepository, SqliteCaseWriteRepository};
pub use sqlite_checklist::SqliteChecklistRepository;
pub use sqlite_user::SqliteUserRepository;
