use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};

pub(super) fn ensure_read_capability(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.has_capability("cases", "read") {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("missing capability cases:read"))
    }
}

pub(super) fn ensure_export_capability(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.has_capability("cases", "export") {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("missing capability cases:export"))
    }
}
