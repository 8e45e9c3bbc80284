use super::UserQueryService;
use crate::application::{
    dto::{AuthenticatedUser, UserDto},
    error::{ApplicationError, ApplicationResult},
};

impl UserQueryService {
    /// All accounts, newest first.
    pub async fn list_users(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<UserDto>> {
        if !actor.has_capability("users", "read") {
            return Err(ApplicationError::forbidden("missing capability users:read"));
        }

        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
