use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, EnvironmentProvider};

/// Specification for one setting: environment variable -> default, plus validation
///
/// ```ignore
/// let ttl = ConfigSpec::new(env.clone())
///     .env_override("SESSION_TTL_MINUTES")
///     .default_value("480")
///     .validator(|v| ConfigSpec::validate_integer_range(v, 1, 10_080))
///     .load()?;
/// ```
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            max_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Resolve the setting value
    ///
    /// The environment variable wins over the default. Whichever value is
    /// chosen is validated; a required setting with no value is an error and an
    /// optional one resolves to the empty string.
    pub fn load(&self) -> Result<String, ConfigError> {
        let from_env = self
            .env_override
            .as_deref()
            .and_then(|name| self.env_provider.get_var(name));

        let Some(value) = from_env.or_else(|| self.default_value.clone()) else {
            if self.required {
                return Err(ConfigError::invalid(
                    self.setting_name(),
                    "Required setting has no value from any source",
                ));
            }
            return Ok(String::new());
        };

        self.validate_value(&value)?;
        Ok(value)
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str) -> Result<(), ConfigError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ConfigError::invalid(
                    self.setting_name(),
                    format!("Value must be at least {} characters long", min_len),
                ));
            }
        }

        if let Some(max_len) = self.max_length {
            if value.len() > max_len {
                return Err(ConfigError::invalid(
                    self.setting_name(),
                    format!("Value must be at most {} characters long", max_len),
                ));
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ConfigError::invalid(self.setting_name(), reason))?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse a duration value in minutes from string
    ///
    /// # Arguments
    /// * `value` - String value to parse (e.g., "15", "480")
    /// * `setting_name` - Name of the setting for error messages
    pub fn parse_duration_minutes(value: &str, setting_name: &str) -> Result<Duration, ConfigError> {
        let minutes = value.trim().parse::<u64>().map_err(|e| {
            ConfigError::parse(
                setting_name,
                format!("Expected positive integer for minutes, got '{}': {}", value, e),
            )
        })?;

        Ok(Duration::from_secs(minutes * 60))
    }

    /// Parse a port number from string
    ///
    /// # Returns
    /// * `Ok(u16)` - Parsed port number
    /// * `Err(ConfigError)` - Not a number, or zero
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ConfigError> {
        let port = value.trim().parse::<u16>().map_err(|e| {
            ConfigError::parse(
                setting_name,
                format!("Expected port number (1-65535), got '{}': {}", value, e),
            )
        })?;

        if port == 0 {
            return Err(ConfigError::invalid(
                setting_name,
                "Port number must be between 1 and 65535",
            ));
        }

        Ok(port)
    }
}

/// Range validation utilities
impl ConfigSpec {
    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate an IPv4 address format (4 dot-separated integers 0-255, no leading zeros)
    pub fn validate_ipv4_address(value: &str) -> Result<(), String> {
        let parts: Vec<&str> = value.split('.').collect();

        if parts.len() != 4 {
            return Err(format!(
                "IPv4 address must have exactly 4 parts separated by dots, got {}",
                parts.len()
            ));
        }

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(format!("IPv4 address part {} cannot be empty", i + 1));
            }

            if part.len() > 1 && part.starts_with('0') {
                return Err(format!(
                    "IPv4 address part {} cannot have leading zeros: '{}'",
                    i + 1,
                    part
                ));
            }

            let octet = part
                .parse::<u16>()
                .map_err(|_| format!("IPv4 address part {} must be a number: '{}'", i + 1, part))?;

            if octet > 255 {
                return Err(format!(
                    "IPv4 address part {} must be between 0-255, got {}",
                    i + 1,
                    octet
                ));
            }
        }

        Ok(())
    }

    /// Validate a host address (IPv4, IPv6, or hostname)
    ///
    /// Dotted all-numeric values are checked strictly as IPv4. Anything with a
    /// colon is accepted as IPv6 as long as a bracketed form is not empty.
    /// Everything else is a hostname and only has to be free of whitespace.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') {
                let ipv6_part = &value[1..value.len() - 1];
                if ipv6_part.is_empty() || !ipv6_part.contains(':') {
                    return Err("Invalid IPv6 address format".to_string());
                }
            }
            return Ok(());
        }

        if value == "[]" {
            return Err("Invalid IPv6 address format".to_string());
        }

        if value.contains('.') {
            let parts: Vec<&str> = value.split('.').collect();
            if parts.len() == 4 && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit())) {
                return Self::validate_ipv4_address(value);
            }
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }
}
