pub mod database;
pub mod export;
pub mod repositories;
pub mod security;
pub mod time;
