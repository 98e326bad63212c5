//! # Configuration
//!
//! [`ConsoleConfig`] is read from `ADMIN_*` environment variables. Anything unset
//! keeps its default; anything set but unparsable is a [`ConfigError`] naming the
//! variable.

use crate::model::DateRange;
use resource_slice::{DebounceConfig, TransportConfig};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const BASE_URL: &str = "ADMIN_API_BASE_URL";
pub const TOKEN: &str = "ADMIN_API_TOKEN";
pub const REQUEST_TIMEOUT: &str = "ADMIN_REQUEST_TIMEOUT_SECS";
pub const SEARCH_DEBOUNCE: &str = "ADMIN_SEARCH_DEBOUNCE_MS";
pub const SEARCH_MIN_CHARS: &str = "ADMIN_SEARCH_MIN_CHARS";
pub const DASHBOARD_RANGE: &str = "ADMIN_DASHBOARD_RANGE";
pub const STATE_DIR: &str = "ADMIN_STATE_DIR";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{var} has an invalid value {value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
    pub search: DebounceConfig,
    /// Dashboard window. `None` means the three months up to today.
    pub dashboard_range: Option<DateRange>,
    pub state_dir: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            request_timeout: Duration::from_secs(30),
            search: DebounceConfig::default(),
            dashboard_range: None,
            state_dir: PathBuf::from("./.admin-console"),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(BASE_URL) {
            config.base_url = url.trim().to_string();
        }
        config.auth_token = get(TOKEN);
        if let Some(secs) = parse::<u64>(REQUEST_TIMEOUT, get(REQUEST_TIMEOUT))? {
            if secs == 0 {
                return Err(invalid(REQUEST_TIMEOUT, "0", "must be at least 1"));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse::<u64>(SEARCH_DEBOUNCE, get(SEARCH_DEBOUNCE))? {
            config.search.window = Duration::from_millis(ms);
        }
        if let Some(min) = parse::<usize>(SEARCH_MIN_CHARS, get(SEARCH_MIN_CHARS))? {
            config.search.min_chars = min;
        }
        config.dashboard_range = parse::<DateRange>(DASHBOARD_RANGE, get(DASHBOARD_RANGE))?;
        if let Some(dir) = get(STATE_DIR) {
            config.state_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn transport(&self) -> TransportConfig {
        let mut transport = TransportConfig::new(self.base_url.clone());
        transport.auth_token = self.auth_token.clone();
        transport.timeout = self.request_timeout;
        transport
    }

    pub fn dashboard_range(&self) -> DateRange {
        self.dashboard_range
            .unwrap_or_else(DateRange::last_three_months_from_now)
    }
}

fn parse<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| invalid(var, &value, &e.to_string()))
        })
        .transpose()
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.search.window, Duration::from_millis(300));
        assert_eq!(config.search.min_chars, 2);
    }

    #[test]
    fn variables_override_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (BASE_URL, "https://ims.example.in/api/"),
            (TOKEN, "secret"),
            (REQUEST_TIMEOUT, "10"),
            (SEARCH_DEBOUNCE, "150"),
            (SEARCH_MIN_CHARS, "3"),
            (DASHBOARD_RANGE, "01-01-2025-31-03-2025"),
            (STATE_DIR, "/var/lib/admin-console"),
        ]))
        .unwrap();

        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search.window, Duration::from_millis(150));
        assert_eq!(config.search.min_chars, 3);
        assert_eq!(
            config.dashboard_range().from,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.state_dir, PathBuf::from("/var/lib/admin-console"));

        let transport = config.transport();
        assert_eq!(transport.base_url, "https://ims.example.in/api/");
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = ConsoleConfig::from_lookup(lookup(&[(SEARCH_MIN_CHARS, "two")])).unwrap_err();
        assert_eq!(err.var, SEARCH_MIN_CHARS);

        let err = ConsoleConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT, "0")])).unwrap_err();
        assert_eq!(err.var, REQUEST_TIMEOUT);

        let err = ConsoleConfig::from_lookup(lookup(&[(DASHBOARD_RANGE, "last quarter")])).unwrap_err();
        assert!(err.to_string().starts_with("ADMIN_DASHBOARD_RANGE"));
    }
}
