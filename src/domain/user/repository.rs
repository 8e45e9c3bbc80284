use crate::domain::audit::NewAuditEntry;
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{UserId, Username},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `creation` is stored with `entity_id` set to the new user id.
    async fn insert(&self, new_user: NewUser, creation: NewAuditEntry) -> DomainResult<User>;

    async fn update(&self, update: UserUpdate, changes: Vec<NewAuditEntry>) -> DomainResult<User>;

    /// References to the user elsewhere are nulled, not cascaded.
    async fn delete(&self, id: UserId, deletion: NewAuditEntry) -> DomainResult<()>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// All users, newest first.
    async fn list(&self) -> DomainResult<Vec<User>>;
}
