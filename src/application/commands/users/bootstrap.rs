use super::{UserCommandService, password::normalize_password};
use crate::{
    application::{dto::UserDto, error::ApplicationResult},
    domain::user::{Role, Username},
};
use tracing::info;

impl UserCommandService {
    /// Create the initial administrator unless an account with that name exists.
    ///
    /// Returns the created account, or `None` when nothing was done.
    pub async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> ApplicationResult<Option<UserDto>> {
        let username = Username::new(username)?;
        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Ok(None);
        }

        let password = normalize_password(password)?;
        let user = self
            .create_and_insert_user(username, password, Role::Admin, true, None)
            .await?;
        info!(user_id = %user.id, username = %user.username, "bootstrap administrator created");

        Ok(Some(user.into()))
    }
}
