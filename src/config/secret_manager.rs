use std::fmt;

use crate::config::{ConfigError, EnvironmentProvider};

/// Where a secret is loaded from
#[derive(Debug, Clone)]
pub enum SecretType {
    EnvVar { name: String },
}

/// Loading rules for a single secret
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub secret_type: SecretType,
    pub required: bool,
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn new(secret_type: SecretType) -> Self {
        Self {
            secret_type,
            required: true,
            min_length: None,
        }
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}

/// Centralized manager for application secrets
pub struct SecretManager {
    session_secret: String,
}

impl SecretManager {
    /// Minimum length of the session HMAC key
    pub const SESSION_SECRET_MIN_LENGTH: usize = 32;

    /// Load and validate all secrets
    ///
    /// # Errors
    /// Returns `ConfigError` if a required secret is missing or too short
    pub fn init(env_provider: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let session_secret = Self::load_secret(env_provider, &Self::session_secret_config())?;
        Ok(Self { session_secret })
    }

    /// Build a manager around an already-known secret
    pub fn from_session_secret(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
        }
    }

    fn session_secret_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "SESSION_SECRET".to_string(),
        })
        .min_length(Self::SESSION_SECRET_MIN_LENGTH)
    }

    /// Key used to HMAC session tokens before they are stored
    pub fn session_secret(&self) -> &str {
        &self.session_secret
    }

    pub(crate) fn load_secret(
        env_provider: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, ConfigError> {
        let SecretType::EnvVar { name } = &config.secret_type;

        let value = match env_provider.get_var(name) {
            Some(v) => v,
            None if !config.required => return Ok(String::new()),
            None => {
                return Err(ConfigError::MissingSecret {
                    secret_name: name.clone(),
                });
            }
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(ConfigError::SecretTooShort {
                    secret_name: name.clone(),
                    expected: min_len,
                    actual: value.len(),
                });
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("session_secret", &"<redacted>")
            .finish()
    }
}
