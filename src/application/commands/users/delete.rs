use super::{UserCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditEntity, NewAuditEntry},
        user::{UserId, is_self_lockout},
    },
};
use tracing::info;

pub struct DeleteUserCommand {
    pub user_id: i64,
}

impl UserCommandService {
    pub async fn delete_user(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteUserCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "users", "delete")?;

        let user_id = UserId::new(command.user_id)?;
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        if is_self_lockout(actor.id, user_id, false) {
            return Err(ApplicationError::self_modification(
                "you cannot delete your own account",
            ));
        }

        let deletion = NewAuditEntry::deleted(
            self.clock.now(),
            Some(actor.id),
            AuditEntity::User,
            user_id.0,
            user.snapshot_tag(),
        );
        self.user_repo.delete(user_id, deletion).await?;
        info!(user_id = %user_id, username = %user.username, "user deleted");

        Ok(())
    }
}
