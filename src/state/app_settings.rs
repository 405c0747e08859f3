use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const MIN_REFRESH_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub log_level: Option<LevelFilter>,
    /// Liveness tick interval.
    pub refresh_interval: Duration,
    /// Ceiling for a single fetch.
    pub request_timeout: Duration,
    /// Data source base URL; `None` uses ESPN.
    pub api_base: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: None,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_base: None,
        }
    }
}

impl AppSettings {
    /// Read `SPORTSTERM_*` environment variables. Bad values fall back to
    /// defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let seconds = |key: &str, min: u64, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map_or(fallback, |secs| Duration::from_secs(secs.max(min)))
        };

        Self {
            log_level: lookup("SPORTSTERM_LOG_LEVEL").and_then(|v| LevelFilter::from_str(v.trim()).ok()),
            refresh_interval: seconds("SPORTSTERM_REFRESH_SECS", MIN_REFRESH_SECS, defaults.refresh_interval),
            request_timeout: seconds("SPORTSTERM_TIMEOUT_SECS", MIN_TIMEOUT_SECS, defaults.request_timeout),
            api_base: lookup("SPORTSTERM_API_BASE")
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]), AppSettings::default());
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            ("SPORTSTERM_LOG_LEVEL", "debug"),
            ("SPORTSTERM_REFRESH_SECS", "60"),
            ("SPORTSTERM_TIMEOUT_SECS", "3"),
            ("SPORTSTERM_API_BASE", "http://localhost:8080"),
        ]);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.refresh_interval, Duration::from_secs(60));
        assert_eq!(s.request_timeout, Duration::from_secs(3));
        assert_eq!(s.api_base.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn intervals_respect_minimums() {
        let s = settings(&[("SPORTSTERM_REFRESH_SECS", "1"), ("SPORTSTERM_TIMEOUT_SECS", "0")]);
        assert_eq!(s.refresh_interval, Duration::from_secs(MIN_REFRESH_SECS));
        assert_eq!(s.request_timeout, Duration::from_secs(MIN_TIMEOUT_SECS));
    }

    #[test]
    fn garbage_falls_back() {
        let s = settings(&[
            ("SPORTSTERM_LOG_LEVEL", "loud"),
            ("SPORTSTERM_REFRESH_SECS", "soon"),
            ("SPORTSTERM_API_BASE", "  "),
        ]);
        assert_eq!(s, AppSettings::default());
    }
}
