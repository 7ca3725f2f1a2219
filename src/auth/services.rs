pub(crate) use crate::auth::dto::{Claims, JwtKeys, TokenKind};
use crate::{
    auth::{password::hash_password, repo_types::User},
    config::JwtConfig,
    error::{ModelError, ModelResult},
    ids,
    state::AppState,
    store::Store,
};
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, info};

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl User {
    /// Validate credentials, hash the password and insert a new user.
    pub async fn create(
        store: &dyn Store,
        username: &str,
        email: &str,
        password: &str,
    ) -> ModelResult<User> {
        let username = username.trim();
        let email = email.trim().to_lowercase();

        if username.is_empty() {
            return Err(ModelError::invalid("username must not be empty"));
        }
        if !is_valid_email(&email) {
            return Err(ModelError::invalid("invalid email"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ModelError::invalid("password too short"));
        }
        if store.find_user_by_email(&email).await?.is_some() {
            return Err(ModelError::Constraint("email already registered".into()));
        }

        let hashed = hash_password(password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            ModelError::internal("password could not be hashed")
        })?;

        let user = store
            .insert_user(&User {
                id: ids::generate(),
                username: username.to_owned(),
                email,
                hash: hashed.hash,
                salt: hashed.salt,
                avatar: None,
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Lookup by normalized (trimmed, lowercased) email.
    pub async fn find_by_email(store: &dyn Store, email: &str) -> ModelResult<Option<User>> {
        store.find_user_by_email(&email.trim().to_lowercase()).await
    }

    pub async fn find_by_id(store: &dyn Store, user_id: &str) -> ModelResult<User> {
        store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ModelError::not_found("user", user_id))
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
            refresh_ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            access_ttl: Duration::from_secs((ttl_minutes as u64) * 60),
            refresh_ttl: Duration::from_secs((refresh_ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    fn sign_with_kind(&self, user_id: &str, kind: TokenKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id.to_owned(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%user_id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, user_id: &str) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Access)
    }
    pub fn sign_refresh(&self, user_id: &str) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, TokenKind::Refresh)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            anyhow::bail!("not a refresh token");
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod jwt_tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_access_token() {
        let keys = make_keys();
        let user_id = ids::generate();
        let token = keys.sign_access(&user_id).expect("sign access");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[tokio::test]
    async fn sign_and_verify_refresh_token_and_verify_refresh() {
        let keys = make_keys();
        let user_id = ids::generate();
        let token = keys.sign_refresh(&user_id).expect("sign refresh");
        let claims = keys.verify_refresh(&token).expect("verify refresh");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn verify_refresh_rejects_access_token() {
        let keys = make_keys();
        let token = keys.sign_access(&ids::generate()).expect("sign access");
        let err = keys.verify_refresh(&token).unwrap_err();
        assert!(err.to_string().contains("not a refresh token"));
    }

    #[tokio::test]
    async fn verify_rejects_wrong_audience() {
        let good_keys = make_keys();
        let mut bad_keys = make_keys();
        bad_keys.audience = "someone-else".into();
        let token = good_keys.sign_access(&ids::generate()).expect("sign access");
        assert!(bad_keys.verify(&token).is_err());
    }
}
