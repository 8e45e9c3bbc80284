// src/domain/checklist/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{ChecklistItem, ChecklistItemId, ChecklistState, ChecklistStatus};
pub use repository::ChecklistRepository;
