// src/config.rs
use std::{env, fmt, path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Prod,
    Dev,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Prod => "prod",
            AppEnv::Dev => "dev",
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    app_env: AppEnv,
    data_dir: PathBuf,
    database_url: String,
    listen_addr: String,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    bootstrap_admin_username: String,
    bootstrap_admin_password: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_listen_addr(app_env: AppEnv) -> String {
    match app_env {
        AppEnv::Prod => "0.0.0.0:5000".into(),
        AppEnv::Dev => "0.0.0.0:5001".into(),
    }
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_bootstrap_admin_username() -> String {
    "admin".into()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Build configuration from environment variables, loading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = match non_blank(lookup("APP_ENV")).as_deref().map(str::trim) {
            None | Some("prod") => AppEnv::Prod,
            Some("dev") => AppEnv::Dev,
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "APP_ENV must be 'prod' or 'dev', got '{other}'"
                )));
            }
        };

        let data_dir = non_blank(lookup("EXPEDIENTES_DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let database_url = non_blank(lookup("DATABASE_URL")).unwrap_or_else(|| {
            format!(
                "sqlite://{}/expedientes_{app_env}.db",
                data_dir.display()
            )
        });

        let listen_addr =
            non_blank(lookup("LISTEN_ADDR")).unwrap_or_else(|| default_listen_addr(app_env));

        let biscuit_private_key = lookup("BISCUIT_ROOT_PRIVATE_KEY")
            .map(|key| key.trim().to_string())
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;
        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = match non_blank(lookup("TOKEN_TTL_SECONDS")) {
            None => default_token_ttl(),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "TOKEN_TTL_SECONDS must be a positive integer, got '{raw}'"
                    ))
                })?,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let bootstrap_admin_username = non_blank(lookup("BOOTSTRAP_ADMIN_USERNAME"))
            .unwrap_or_else(default_bootstrap_admin_username);
        let bootstrap_admin_password = non_blank(lookup("BOOTSTRAP_ADMIN_PASSWORD"));

        Ok(Self {
            app_env,
            data_dir,
            database_url,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            bootstrap_admin_username,
            bootstrap_admin_password,
        })
    }

    pub fn app_env(&self) -> AppEnv {
        self.app_env
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn bootstrap_admin_username(&self) -> &str {
        &self.bootstrap_admin_username
    }

    pub fn bootstrap_admin_password(&self) -> Option<&str> {
        self.bootstrap_admin_password.as_deref()
    }

    /// CORS origins for router construction where a full `AppConfig` is not
    /// at hand (tests build the router directly).
    pub fn allowed_origins_from_env() -> Vec<String> {
        env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_the_environment() {
        let prod = config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY)]).unwrap();
        assert_eq!(prod.app_env(), AppEnv::Prod);
        assert_eq!(prod.listen_addr(), "0.0.0.0:5000");
        assert_eq!(prod.database_url(), "sqlite://./data/expedientes_prod.db");
        assert_eq!(prod.token_ttl(), Duration::from_secs(3600));
        assert_eq!(prod.bootstrap_admin_username(), "admin");
        assert_eq!(prod.bootstrap_admin_password(), None);
        assert!(prod.allowed_origins().is_empty());

        let dev = config(&[
            ("BISCUIT_ROOT_PRIVATE_KEY", KEY),
            ("APP_ENV", "dev"),
            ("EXPEDIENTES_DATA_DIR", "/var/lib/expedientes"),
        ])
        .unwrap();
        assert_eq!(dev.listen_addr(), "0.0.0.0:5001");
        assert_eq!(
            dev.database_url(),
            "sqlite:///var/lib/expedientes/expedientes_dev.db"
        );
    }

    #[test]
    fn explicit_values_win() {
        let cfg = config(&[
            ("BISCUIT_ROOT_PRIVATE_KEY", KEY),
            ("DATABASE_URL", "sqlite::memory:"),
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("TOKEN_TTL_SECONDS", "60"),
            ("ALLOWED_ORIGINS", "http://a.test/, ,http://b.test"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "s3creta"),
        ])
        .unwrap();

        assert_eq!(cfg.database_url(), "sqlite::memory:");
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.token_ttl(), Duration::from_secs(60));
        assert_eq!(cfg.allowed_origins(), ["http://a.test", "http://b.test"]);
        assert_eq!(cfg.bootstrap_admin_password(), Some("s3creta"));
    }

    #[test]
    fn signing_key_is_required_and_validated() {
        assert!(matches!(
            config(&[]),
            Err(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))
        ));
        assert!(matches!(
            config(&[("BISCUIT_ROOT_PRIVATE_KEY", "abc")]),
            Err(ConfigError::Invalid(_))
        ));
        let not_hex = "z".repeat(64);
        assert!(matches!(
            config(&[("BISCUIT_ROOT_PRIVATE_KEY", not_hex.as_str())]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY), ("APP_ENV", "staging")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY), ("TOKEN_TTL_SECONDS", "0")]),
            Err(ConfigError::Invalid(_))
        ));
    }
}
