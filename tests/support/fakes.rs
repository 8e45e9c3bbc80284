// tests/support/fakes.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use expedientes::application::{
    ApplicationError, ApplicationResult,
    ports::{security::PasswordHasher, time::Clock},
};

/// Stores passwords behind a fixed prefix so tests skip Argon2's cost.
#[derive(Default, Clone)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash.strip_prefix("plain:") == Some(password) {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

#[derive(Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
