use super::{
    UserCommandService, capability::ensure_capability, password::normalize_password,
};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Role, Username},
};
use tracing::info;

pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub is_active: bool,
}

impl UserCommandService {
    pub async fn create_user(
        &self,
        actor: &AuthenticatedUser,
        command: CreateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "create")?;

        let username = Username::new(command.username)?;
        let password = normalize_password(&command.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .create_and_insert_user(
                username,
                password,
                command.role,
                command.is_active,
                Some(actor.id),
            )
            .await?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "user created");

        Ok(user.into())
    }
}
