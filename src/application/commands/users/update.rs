use super::{UserCommandService, capability::ensure_capability, password::optional_password};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditEntity, FieldChange, NewAuditEntry, diff_fields},
        user::{
            PASSWORD_CHANGED_MARKER, PASSWORD_FIELD, Role, USER_AUDITED_FIELDS, UserId,
            UserUpdate, Username, is_self_lockout,
        },
    },
};
use tracing::info;

pub struct UpdateUserCommand {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    /// Blank or missing keeps the current password.
    pub password: Option<String>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "update")?;

        let user_id = UserId::new(command.user_id)?;
        let current = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let username = Username::new(command.username)?;

        if let Some(existing) = self.user_repo.find_by_username(&username).await? {
            if existing.id != user_id {
                return Err(ApplicationError::conflict("username already exists"));
            }
        }

        if is_self_lockout(actor.id, user_id, command.is_active) {
            return Err(ApplicationError::self_modification(
                "you cannot deactivate your own account",
            ));
        }

        let password_hash = match optional_password(command.password.as_deref()) {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let update = UserUpdate {
            id: user_id,
            username,
            role: command.role,
            is_active: command.is_active,
            password_hash,
        };

        let now = self.clock.now();
        let actor_id = Some(actor.id);
        let proposed = current.with_update(&update);
        let mut changes: Vec<NewAuditEntry> = diff_fields(USER_AUDITED_FIELDS, &current, &proposed)
            .into_iter()
            .map(|change| NewAuditEntry::changed(now, actor_id, AuditEntity::User, user_id.0, change))
            .collect();
        if update.password_hash.is_some() {
            changes.push(NewAuditEntry::changed(
                now,
                actor_id,
                AuditEntity::User,
                user_id.0,
                FieldChange {
                    field: PASSWORD_FIELD.to_string(),
                    old_value: String::new(),
                    new_value: PASSWORD_CHANGED_MARKER.to_string(),
                },
            ));
        }

        let user = self.user_repo.update(update, changes).await?;
        info!(user_id = %user.id, username = %user.username, "user updated");

        Ok(user.into())
    }
}
