// src/domain/user/entity.rs
use crate::domain::audit::AuditedField;
use crate::domain::user::value_objects::{PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Human-readable tag recorded when the user is deleted.
    pub fn snapshot_tag(&self) -> String {
        format!("USER:{}", self.username)
    }

    /// The user as it would look after `update` is applied.
    pub fn with_update(&self, update: &UserUpdate) -> User {
        User {
            id: self.id,
            username: update.username.clone(),
            password_hash: update
                .password_hash
                .clone()
                .unwrap_or_else(|| self.password_hash.clone()),
            role: update.role,
            is_active: update.is_active,
            created_at: self.created_at,
        }
    }
}

/// Profile fields diffed on update. The password is audited separately.
pub const USER_AUDITED_FIELDS: &[AuditedField<User>] = &[
    AuditedField {
        name: "username",
        read: |u: &User| Some(u.username.to_string()),
    },
    AuditedField {
        name: "role",
        read: |u: &User| Some(u.role.to_string()),
    },
    AuditedField {
        name: "is_active",
        read: |u: &User| Some(if u.is_active { "1" } else { "0" }.to_string()),
    },
];

pub const PASSWORD_FIELD: &str = "password_hash";
pub const PASSWORD_CHANGED_MARKER: &str = "CHANGED";

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        password_hash: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            role,
            is_active: true,
            created_at,
        }
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Full replacement of a user's editable fields; the password is optional.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub is_active: bool,
    pub password_hash: Option<PasswordHash>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::diff_fields;

    fn user() -> User {
        User {
            id: UserId(3),
            username: Username::new("maria").unwrap(),
            password_hash: PasswordHash::new("hash").unwrap(),
            role: Role::Reader,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_and_activity_changes_are_diffed() {
        let before = user();
        let after = before.with_update(&UserUpdate {
            id: before.id,
            username: before.username.clone(),
            role: Role::Capture,
            is_active: false,
            password_hash: None,
        });

        let changes = diff_fields(USER_AUDITED_FIELDS, &before, &after);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field, "role");
        assert_eq!(changes[0].old_value, "LECTURA");
        assert_eq!(changes[0].new_value, "CAPTURA");
        assert_eq!(changes[1].field, "is_active");
        assert_eq!(changes[1].old_value, "1");
        assert_eq!(changes[1].new_value, "0");
        assert_eq!(after.password_hash.as_str(), "hash");
    }

    #[test]
    fn snapshot_tag_names_the_user() {
        assert_eq!(user().snapshot_tag(), "USER:maria");
    }
}
