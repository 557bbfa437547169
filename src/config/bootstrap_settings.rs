use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, ConfigSpec, EnvironmentProvider};

/// Longest session lifetime accepted, one week
const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Infrastructure settings read once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    session_ttl: Duration,
}

impl BootstrapSettings {
    /// Load bootstrap settings through ConfigSpec
    ///
    /// # Arguments
    /// * `env_provider` - Source of environment variables
    ///
    /// # Returns
    /// * `Ok(BootstrapSettings)` - Every setting resolved and validated
    /// * `Err(ConfigError)` - A value failed validation or parsing
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://nodue.db?mode=rwc")
            .min_length(1)
            .load()?;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load()?;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load()?;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let ttl_value = ConfigSpec::new(env_provider)
            .env_override("SESSION_TTL_MINUTES")
            .default_value("480")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, MAX_SESSION_TTL_MINUTES))
            .load()?;
        let session_ttl = ConfigSpec::parse_duration_minutes(&ttl_value, "SESSION_TTL_MINUTES")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            session_ttl,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn load(vars: &[(&str, &str)]) -> Result<BootstrapSettings, ConfigError> {
        BootstrapSettings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let settings = load(&[]).unwrap();

        assert_eq!(settings.database_url(), "sqlite://nodue.db?mode=rwc");
        assert_eq!(settings.server_host(), "0.0.0.0");
        assert_eq!(settings.server_port(), 3000);
        assert_eq!(settings.session_ttl(), Duration::from_secs(480 * 60));
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let settings = load(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SESSION_TTL_MINUTES", "15"),
        ])
        .unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.session_ttl(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(load(&[("PORT", "99999")]).is_err());
        assert!(load(&[("PORT", "abc")]).is_err());
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        assert!(load(&[("HOST", "300.0.0.1")]).is_err());
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert!(load(&[("SESSION_TTL_MINUTES", "0")]).is_err());
        assert!(load(&[("SESSION_TTL_MINUTES", "20000")]).is_err());
        assert!(load(&[("SESSION_TTL_MINUTES", "10080")]).is_ok());
    }
}
