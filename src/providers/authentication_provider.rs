use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CryptoProvider;
use crate::stores::{SessionStore, UserStore};
use crate::types::db::user;
use crate::types::internal::Principal;

/// A freshly opened session; `token` is only ever handed to the client
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: i64,
}

/// Verifies credentials and manages server-side sessions
pub struct AuthenticationProvider {
    user_store: Arc<UserStore>,
    session_store: Arc<SessionStore>,
    crypto_provider: Arc<CryptoProvider>,
    secret_manager: Arc<SecretManager>,
    session_ttl: Duration,
}

impl AuthenticationProvider {
    pub fn new(
        user_store: Arc<UserStore>,
        session_store: Arc<SessionStore>,
        crypto_provider: Arc<CryptoProvider>,
        secret_manager: Arc<SecretManager>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_store,
            session_store,
            crypto_provider,
            secret_manager,
            session_ttl,
        }
    }

    fn hash_token(&self, token: &str) -> Result<String, InternalError> {
        self.crypto_provider
            .hmac_sha256_token(self.secret_manager.session_secret(), token)
    }

    /// Check a username/password pair
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - Credentials are valid
    /// * `Err(InternalError::Credential(InvalidCredentials))` - Unknown user or wrong password
    pub async fn verify_credential(&self, username: &str, password: &str) -> Result<user::Model, InternalError> {
        let Some(user) = self.user_store.get_user_by_username(username).await? else {
            tracing::debug!(username, "Login for unknown username");
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self
            .crypto_provider
            .verify_password(&user.password_hash, password)
            .await?
        {
            tracing::debug!(username, "Login with wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Start a session for `user_id`
    ///
    /// Stores only the HMAC of the generated token.
    pub async fn open_session(&self, user_id: &str) -> Result<IssuedSession, InternalError> {
        let token = self.crypto_provider.generate_session_token();
        let token_hash = self.hash_token(&token)?;

        let now = Utc::now().timestamp();
        let expires_at = now + self.session_ttl.as_secs() as i64;

        self.session_store
            .create_session(token_hash, user_id.to_string(), now, expires_at)
            .await?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Resolve a presented session token into the principal it belongs to
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - Token matches an unexpired session
    /// * `Ok(None)` - Unknown or expired token
    /// * `Err(InternalError)` - Database failure, or the user row carries an unknown role
    pub async fn resolve_session(&self, token: &str) -> Result<Option<Principal>, InternalError> {
        let token_hash = self.hash_token(token)?;
        let now = Utc::now().timestamp();

        match self.session_store.find_active_session(&token_hash, now).await? {
            Some(user) => Ok(Some(Principal::try_from(user)?)),
            None => Ok(None),
        }
    }

    /// End the session for `token`
    ///
    /// # Returns
    /// * `Ok(true)` - A session was removed
    /// * `Ok(false)` - Nothing matched (already logged out or never existed)
    pub async fn close_session(&self, token: &str) -> Result<bool, InternalError> {
        let token_hash = self.hash_token(token)?;
        self.session_store.delete_session(&token_hash).await
    }

    /// Drop expired session rows
    pub async fn purge_expired_sessions(&self) -> Result<u64, InternalError> {
        self.session_store.purge_expired(Utc::now().timestamp()).await
    }
}
