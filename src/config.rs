use crate::domain::values::retry_policy::RetryPolicy;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub fresh_ttl: Duration,
    pub fallback_ttl: Duration,
    /// Minimum spacing between two dispatches.
    pub min_interval: Duration,
    /// Extra pause after each queued request completes.
    pub request_pause: Duration,
    pub retry: RetryPolicy,
    /// Per-call deadline. `None` leaves calls unbounded.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            fresh_ttl: Duration::from_secs(60),
            fallback_ttl: Duration::from_secs(24 * 60 * 60),
            min_interval: Duration::from_millis(100),
            request_pause: Duration::from_millis(50),
            retry: RetryPolicy::default(),
            request_timeout: None,
            user_agent: "coinwatch/0.1".into(),
        }
    }
}

impl Settings {
    /// Defaults overridden by `COINWATCH_*` environment variables.
    /// Malformed values are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("COINWATCH_BASE_URL").unwrap_or(defaults.base_url),
            fresh_ttl: env_parse("COINWATCH_FRESH_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.fresh_ttl),
            fallback_ttl: env_parse("COINWATCH_FALLBACK_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.fallback_ttl),
            min_interval: env_parse("COINWATCH_MIN_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_interval),
            request_pause: env_parse("COINWATCH_REQUEST_PAUSE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_pause),
            retry: RetryPolicy::new(
                env_parse("COINWATCH_MAX_RETRIES").unwrap_or(defaults.retry.max_attempts),
                env_parse("COINWATCH_BASE_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.retry.base_delay),
            ),
            request_timeout: env_parse("COINWATCH_REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
            user_agent: std::env::var("COINWATCH_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring malformed setting");
            None
        }
    }
}

/// Converts a std duration into a chrono one, saturating on overflow.
pub(crate) fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(d.as_millis().min(i64::MAX as u128 / 1000) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.fresh_ttl, Duration::from_secs(60));
        assert_eq!(s.fallback_ttl, Duration::from_secs(86_400));
        assert_eq!(s.retry.max_attempts, 3);
        assert!(s.request_timeout.is_none());
    }

    #[test]
    fn test_to_chrono() {
        assert_eq!(to_chrono(Duration::from_secs(60)), chrono::Duration::seconds(60));
    }
}
