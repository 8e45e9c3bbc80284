// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

// SQLite reports unique violations as "UNIQUE constraint failed: <table>.<column>".
const UNIQUE_CASE_CODE: &str = "cases.code";
const UNIQUE_USERNAME: &str = "users.username";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            match db_err.kind() {
                ErrorKind::UniqueViolation if message.contains(UNIQUE_CASE_CODE) => {
                    DomainError::Conflict("case code already exists".into())
                }
                ErrorKind::UniqueViolation if message.contains(UNIQUE_USERNAME) => {
                    DomainError::Conflict("username already exists".into())
                }
                ErrorKind::UniqueViolation => {
                    DomainError::Conflict("unique constraint violated".into())
                }
                ErrorKind::ForeignKeyViolation => {
                    DomainError::NotFound("referenced record not found".into())
                }
                ErrorKind::CheckViolation => {
                    DomainError::Validation("check constraint violated".into())
                }
                _ => DomainError::Persistence(message.to_string()),
            }
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
