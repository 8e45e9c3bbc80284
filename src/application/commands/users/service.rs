use std::sync::Arc;

use crate::application::{
    error::ApplicationResult,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
};
use crate::domain::audit::{AuditEntity, NewAuditEntry};
use crate::domain::user::{NewUser, PasswordHash, Role, User, UserId, UserRepository, Username};

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            token_manager,
            clock,
        }
    }

    pub(super) async fn hash_password(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let hashed = self.password_hasher.hash(password).await?;
        Ok(PasswordHash::new(hashed)?)
    }

    // Shared by admin creation and bootstrap seeding.
    pub(super) async fn create_and_insert_user(
        &self,
        username: Username,
        password: &str,
        role: Role,
        is_active: bool,
        actor: Option<UserId>,
    ) -> ApplicationResult<User> {
        let password_hash = self.hash_password(password).await?;
        let created_at = self.clock.now();

        let new_user =
            NewUser::new(username, password_hash, role, created_at).with_is_active(is_active);
        let creation = NewAuditEntry::created(created_at, actor, AuditEntity::User, None);

        Ok(self.user_repo.insert(new_user, creation).await?)
    }
}
