// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{
    NewUser, PASSWORD_CHANGED_MARKER, PASSWORD_FIELD, USER_AUDITED_FIELDS, User, UserUpdate,
};
pub use repository::UserRepository;
pub use specifications::{CapabilitySpecification, HasCapability, is_self_lockout};
pub use value_objects::{Capability, PasswordHash, Role, UserId, Username};
