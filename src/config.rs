//! Configuration Management
//!
//! Provider credentials for the adapters: a JSON config file under the user
//! config directory, with environment variables taking precedence.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Provider credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_api_key: Option<String>,
    /// Facebook application id
    #[serde(default)]
    pub facebook_client_id: Option<String>,
    /// Facebook application secret
    #[serde(default)]
    pub facebook_client_secret: Option<String>,
    /// Foursquare client id
    #[serde(default)]
    pub foursquare_client_id: Option<String>,
    /// Foursquare client secret
    #[serde(default)]
    pub foursquare_client_secret: Option<String>,
    /// Twitter app-only bearer token
    #[serde(default)]
    pub twitter_bearer_token: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("apibridge").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            serde_json::to_string_pretty(self).expect("Config is always serializable");
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Effective Stripe key (`STRIPE_API_KEY` > config file)
    pub fn effective_stripe_api_key(&self) -> Option<String> {
        env_or(&self.stripe_api_key, "STRIPE_API_KEY")
    }

    /// Effective Facebook credentials (env > config file)
    pub fn effective_facebook(&self) -> Option<(String, String)> {
        let id = env_or(&self.facebook_client_id, "FACEBOOK_CLIENT_ID")?;
        let secret = env_or(&self.facebook_client_secret, "FACEBOOK_CLIENT_SECRET")?;
        Some((id, secret))
    }

    /// Effective Foursquare credentials (env > config file)
    pub fn effective_foursquare(&self) -> Option<(String, String)> {
        let id = env_or(&self.foursquare_client_id, "FOURSQUARE_CLIENT_ID")?;
        let secret = env_or(&self.foursquare_client_secret, "FOURSQUARE_CLIENT_SECRET")?;
        Some((id, secret))
    }

    /// Effective Twitter bearer token (`TWITTER_BEARER_TOKEN` > config file)
    pub fn effective_twitter_bearer_token(&self) -> Option<String> {
        env_or(&self.twitter_bearer_token, "TWITTER_BEARER_TOKEN")
    }
}

fn env_or(configured: &Option<String>, var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => configured.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.stripe_api_key.is_none());
        assert!(config.effective_facebook().is_none());
    }

    #[test]
    fn test_env_or_prefers_environment() {
        std::env::set_var("APIBRIDGE_ENV_OR_TEST", "from-env");
        let got = env_or(&Some("from-file".to_string()), "APIBRIDGE_ENV_OR_TEST");
        std::env::remove_var("APIBRIDGE_ENV_OR_TEST");
        assert_eq!(got.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_env_or_falls_back_to_config() {
        let got = env_or(&Some("from-file".to_string()), "APIBRIDGE_ENV_OR_UNSET");
        assert_eq!(got.as_deref(), Some("from-file"));
    }
}
