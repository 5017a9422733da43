//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default backend base URL when `ONBOARDING_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Onboarding engine configuration.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Base URL of the profile backend (no trailing slash).
    pub api_base_url: String,
    /// Quiet period before auto-saving ordinary form steps.
    pub autosave_delay: Duration,
    /// Quiet period before auto-saving upload-heavy steps.
    pub upload_autosave_delay: Duration,
    /// Request timeout applied by the HTTP client. `None` leaves requests unbounded.
    pub http_timeout: Option<Duration>,
    /// Port for the read-only status routes.
    pub status_port: u16,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            autosave_delay: Duration::from_millis(2000),
            upload_autosave_delay: Duration::from_millis(3000),
            http_timeout: None,
            status_port: 8080,
        }
    }
}

impl OnboardingConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("ONBOARDING_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let autosave_delay = parse_number::<u64, _>(&lookup, "ONBOARDING_AUTOSAVE_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.autosave_delay);

        let upload_autosave_delay =
            parse_number::<u64, _>(&lookup, "ONBOARDING_UPLOAD_AUTOSAVE_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.upload_autosave_delay);

        let http_timeout = parse_number::<u64, _>(&lookup, "ONBOARDING_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        let status_port = parse_number::<u16, _>(&lookup, "ONBOARDING_STATUS_PORT")?
            .unwrap_or(defaults.status_port);

        Ok(Self {
            api_base_url,
            autosave_delay,
            upload_autosave_delay,
            http_timeout,
            status_port,
        })
    }
}

fn parse_number<N, F>(lookup: &F, key: &str) -> Result<Option<N>, ConfigError>
where
    N: std::str::FromStr,
    N::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<N>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
    }
}
