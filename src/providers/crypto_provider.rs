use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash};
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

/// Cryptographic operations provider
///
/// Session token generation and hashing, argon2 password hashing, and random
/// password generation for CLI-created accounts.
pub struct CryptoProvider;

impl CryptoProvider {
    pub fn new() -> Self {
        Self
    }

    /// Compute HMAC-SHA256 of a session token as lowercase hex
    ///
    /// # Arguments
    /// * `key` - The secret key for HMAC computation
    /// * `token` - The token to hash
    pub fn hmac_sha256_token(&self, key: &str, token: &str) -> Result<String, InternalError> {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
        mac.update(token.as_bytes());
        Ok(format!("{:x}", mac.finalize().into_bytes()))
    }

    /// Generate an opaque 256-bit session token
    ///
    /// URL-safe base64 without padding, so it can travel in a cookie unquoted.
    pub fn generate_session_token(&self) -> String {
        let random_bytes: [u8; 32] = rand::rng().random();
        general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
    }

    /// Hash a password with Argon2id and a random salt
    ///
    /// Runs on the blocking pool, like verification.
    ///
    /// # Returns
    /// * `Ok(String)` - PHC-formatted hash
    /// * `Err(InternalError)` - Hashing failed or the task failed
    pub async fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt_bytes: [u8; 16] = rand::rng().random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| InternalError::crypto("argon2_salt", e.to_string()))?;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::crypto("argon2_hash", e.to_string()))
        })
        .await
        .map_err(|e| InternalError::crypto("argon2_hash", e.to_string()))?
    }

    /// Verify a password against a stored PHC hash
    ///
    /// Hashing is CPU bound, so it runs on the blocking pool.
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(InternalError)` - Stored hash is malformed or the task failed
    pub async fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| InternalError::crypto("argon2_parse_hash", e.to_string()))?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(InternalError::crypto("argon2_verify", e.to_string())),
            }
        })
        .await
        .map_err(|e| InternalError::crypto("argon2_verify", e.to_string()))?
    }

    /// Generate a cryptographically secure random password
    ///
    /// 20 characters drawn from upper and lower case letters, digits and symbols.
    pub fn generate_secure_password(&self) -> String {
        const PASSWORD_LENGTH: usize = 20;
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789\
                                 !@#$%^&*()_+-=[]{}|;:,.<>?";

        let mut rng = rand::rng();
        (0..PASSWORD_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}
