// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

const TOKEN_CODE: &str = r#"
    user({uid}, {uname});
    role({urole});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
"#;

#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }

    /// Fresh signing key, for deployments that did not configure one.
    /// Tokens do not survive a restart.
    pub fn ephemeral(ttl: Duration) -> Self {
        let keypair = KeyPair::new();
        let public = keypair.public();
        Self {
            root: Arc::new(keypair),
            public,
            ttl,
        }
    }
}

fn token_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> HashMap<String, Term> {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("uname".to_string(), subject.username.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());
    params
}

fn ttl_to_expires_in_seconds(ttl: Duration) -> i64 {
    ChronoDuration::from_std(ttl)
        .map(|ttl| ttl.num_seconds())
        .unwrap_or(i64::MAX)
        .max(0)
}

fn build_and_serialize_biscuit(
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(TOKEN_CODE, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let token = build_and_serialize_biscuit(
            token_params(&subject, issued_at, expires_at),
            self.root.as_ref(),
        )?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: ttl_to_expires_in_seconds(self.ttl),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let mut authorizer = AuthorizerBuilder::new()
            .code("allow if user($id, $name);")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .time()
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let (facts, _, _, _) = authorizer.dump();
        parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    fn manager(ttl: Duration) -> BiscuitTokenManager {
        BiscuitTokenManager::ephemeral(ttl)
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: UserId(7),
            username: "captura".into(),
            role: Role::Capture,
        }
    }

    #[tokio::test]
    async fn issued_token_authenticates_with_role_capabilities() {
        let tokens = manager(Duration::from_secs(3600));
        let issued = tokens.issue(subject()).await.unwrap();
        assert_eq!(issued.expires_in, 3600);

        let user = tokens.authenticate(&issued.token).await.unwrap();
        assert_eq!(user.id, UserId(7));
        assert_eq!(user.username, "captura");
        assert_eq!(user.role, Role::Capture);
        assert!(user.has_capability("cases", "create"));
        assert!(!user.has_capability("users", "read"));
    }

    #[tokio::test]
    async fn token_from_another_key_is_rejected() {
        let issued = manager(Duration::from_secs(60))
            .issue(subject())
            .await
            .unwrap();

        let result = manager(Duration::from_secs(60))
            .authenticate(&issued.token)
            .await;
        assert!(matches!(result, Err(ApplicationError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let result = manager(Duration::from_secs(60))
            .authenticate("not-a-token")
            .await;
        assert!(matches!(result, Err(ApplicationError::Unauthorized(_))));
    }
}
