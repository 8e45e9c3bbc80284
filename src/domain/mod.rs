pub mod audit;
pub mod case;
pub mod checklist;
pub mod errors;
pub mod user;
