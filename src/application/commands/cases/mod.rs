// src/application/commands/cases/mod.rs
mod capability;
mod create;
mod delete;
mod service;
mod update;
mod visits;

pub use create::CreateCaseCommand;
pub use delete::DeleteCaseCommand;
pub use service::CaseCommandService;
pub use update::UpdateCaseCommand;
pub use visits::{AdjustVisitsCommand, VisitAdjustment};
