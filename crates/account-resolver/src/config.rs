//! Resolver configuration

use std::time::Duration;

use twitter_api::{parse_keys, TwitterClient};

use crate::batch::BatchOptions;
use crate::error::{ResolverError, Result};
use crate::keys::TWITTER_PROVIDER_CODE;

/// Configuration for [`crate::TwitterResolver`]
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Bearer tokens to rotate between
    pub api_keys: Vec<String>,
    /// Skip accounts that fail to resolve instead of aborting
    pub ignore_resolving_errors: bool,
    pub base_url: String,
    pub provider_code: String,
    pub batch: BatchOptions,
    pub request_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            ignore_resolving_errors: false,
            base_url: TwitterClient::DEFAULT_BASE_URL.to_string(),
            provider_code: TWITTER_PROVIDER_CODE.to_string(),
            batch: BatchOptions::BULK,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from the environment.
    ///
    /// - `TWITTER_API_KEY`: comma-separated bearer tokens
    /// - `SH_IGNORE_RESOLVING_ERRORS`: `1`, `true` or `yes` to tolerate unresolved accounts
    /// - `TWITTER_API_URL`: override the API root
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(keys) = std::env::var("TWITTER_API_KEY") {
            config.api_keys = parse_keys(&keys);
        }

        config.ignore_resolving_errors = std::env::var("SH_IGNORE_RESOLVING_ERRORS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        if let Ok(url) = std::env::var("TWITTER_API_URL") {
            config.base_url = url;
        }

        config
    }

    /// Check limits before any request goes out
    pub fn validate(&self) -> Result<()> {
        let batch_size = self.batch.batch_size();
        if batch_size > TwitterClient::MAX_USERNAMES_PER_REQUEST {
            return Err(ResolverError::Config(format!(
                "batch size {} exceeds the lookup limit of {}",
                batch_size,
                TwitterClient::MAX_USERNAMES_PER_REQUEST
            )));
        }
        if self.provider_code.is_empty() || self.provider_code.contains(':') {
            return Err(ResolverError::Config(format!(
                "invalid provider code '{}'",
                self.provider_code
            )));
        }
        Ok(())
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
