use crate::application::error::{ApplicationError, ApplicationResult};

/// Passwords are trimmed before use; only an empty result is rejected.
pub(super) fn normalize_password(password: &str) -> ApplicationResult<&str> {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation("password cannot be empty"));
    }
    Ok(trimmed)
}

/// An optional new password; blank means "keep the current one".
pub(super) fn optional_password(password: Option<&str>) -> Option<&str> {
    password.map(str::trim).filter(|p| !p.is_empty())
}
