use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{User, Username},
};
use tracing::{info, warn};

pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

const INVALID_CREDENTIALS: &str = "invalid credentials";

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let username = Username::new(command.username)
            .map_err(|_| ApplicationError::unauthorized(INVALID_CREDENTIALS))?;
        let user = self
            .find_and_authenticate_user(username, command.password.trim())
            .await?;

        let token = self.token_manager.issue(TokenSubject::from(&user)).await?;
        info!(user_id = %user.id, username = %user.username, "user logged in");

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    // Unknown users, inactive users and wrong passwords are indistinguishable to the caller.
    async fn find_and_authenticate_user(
        &self,
        username: Username,
        password: &str,
    ) -> ApplicationResult<User> {
        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            warn!(username = %username, "login rejected: unknown user");
            return Err(ApplicationError::unauthorized(INVALID_CREDENTIALS));
        };

        if !user.is_active {
            warn!(username = %username, "login rejected: account inactive");
            return Err(ApplicationError::unauthorized(INVALID_CREDENTIALS));
        }

        if let Err(err) = self
            .password_hasher
            .verify(password, user.password_hash.as_str())
            .await
        {
            warn!(username = %username, "login rejected: password mismatch");
            return match err {
                ApplicationError::Unauthorized(_) => {
                    Err(ApplicationError::unauthorized(INVALID_CREDENTIALS))
                }
                other => Err(other),
            };
        }

        Ok(user)
    }
}
