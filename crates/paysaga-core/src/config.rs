use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// Explicit API configuration handed to each transaction.
///
/// The credential is a plain value owned by the caller; there is no
/// process-global state to initialize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Secret API key used to authenticate every call.
    pub api_key: String,

    /// Base URL of the payments API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl ApiConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: default_api_base(),
        }
    }

    /// Override the API base URL, e.g. to point at a test double.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the key is empty and
    /// [`ConfigError::InvalidApiBase`] if the base URL is not HTTP(S).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::InvalidApiBase(self.api_base.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_default_api_base() {
        let config = ApiConfig::new("sk_test_123");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = ApiConfig::new("sk_test_123");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_api_key_fails_validation() {
        let config = ApiConfig::new("");
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn whitespace_api_key_fails_validation() {
        let config = ApiConfig::new("   ");
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn non_http_api_base_fails_validation() {
        let config = ApiConfig::new("sk_test_123").with_api_base("ftp://example.com");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidApiBase("ftp://example.com".to_string()))
        );
    }

    #[test]
    fn custom_http_api_base_passes_validation() {
        let config = ApiConfig::new("sk_test_123").with_api_base("http://localhost:12111");
        assert!(config.validate().is_ok());
    }
}
