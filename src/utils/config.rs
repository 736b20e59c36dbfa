//! Configuration and constants for the CLI.
//!
//! Defaults live here as constants. An optional TOML file can override
//! any of them; missing keys fall back to the defaults below.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Trailing days rendered in the activity heatmap (today inclusive)
pub const DEFAULT_WINDOW_DAYS: u32 = 366;

/// Length of the "this week" window for delta and weekly stats
pub const WEEK_SECONDS: i64 = 7 * SECONDS_PER_DAY;

/// Number of tags kept for the skill radar
pub const DEFAULT_TOP_TAGS: usize = 8;

/// Width of one difficulty histogram bucket
pub const DIFFICULTY_BUCKET_WIDTH: u32 = 200;

/// Language used when a submission does not report one
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Only this verdict counts towards solve statistics
pub const ACCEPTED_VERDICT: &str = "OK";

// Remote API
pub const DEFAULT_API_URL: &str = "https://codeforces.com/api/";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
pub const DEFAULT_SUBMISSION_COUNT: u32 = 10_000;

// Session timers
pub const DEFAULT_CHAT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Dashboard configuration file contents
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Heatmap window in days
    pub window_days: Option<u32>,

    /// Tags kept for visualisation
    pub top_tags: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub chat_poll_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn window_days(&self) -> u32 {
        self.analytics.window_days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }

    pub fn top_tags(&self) -> usize {
        self.analytics.top_tags.unwrap_or(DEFAULT_TOP_TAGS)
    }

    pub fn api_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn cache_ttl(&self) -> Duration {
        self.api
            .cache_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL)
    }

    pub fn api_timeout(&self) -> Duration {
        self.api
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_API_TIMEOUT)
    }

    pub fn chat_poll_interval(&self) -> Duration {
        self.session
            .chat_poll_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CHAT_POLL_INTERVAL)
    }

    /// Reject values the aggregators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days() == 0 {
            return Err(ConfigError::Invalid(
                "analytics.window_days must be greater than 0".to_string(),
            ));
        }
        if self.top_tags() == 0 {
            return Err(ConfigError::Invalid(
                "analytics.top_tags must be greater than 0".to_string(),
            ));
        }
        if self.chat_poll_interval().is_zero() {
            return Err(ConfigError::Invalid(
                "session.chat_poll_secs must be greater than 0".to_string(),
            ));
        }
        let url = self.api_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        Ok(())
    }
}

/// Load dashboard configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(contents: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.window_days(), DEFAULT_WINDOW_DAYS);
        assert_eq!(config.top_tags(), DEFAULT_TOP_TAGS);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.cache_ttl(), DEFAULT_CACHE_TTL);
        assert_eq!(config.chat_poll_interval(), DEFAULT_CHAT_POLL_INTERVAL);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [analytics]
            window_days = 30

            [api]
            cache_ttl_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.window_days(), 30);
        assert_eq!(config.top_tags(), DEFAULT_TOP_TAGS);
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = parse_config("[analytics]\nwindow_days = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_url_rejected() {
        let result = parse_config("[api]\nbase_url = \"ftp://example.com\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = parse_config("[analytics\nwindow_days = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
