// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod auth;
pub mod cases;
pub mod users;
