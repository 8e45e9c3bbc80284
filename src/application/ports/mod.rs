// src/application/ports/mod.rs
pub mod export;
pub mod security;
pub mod time;

