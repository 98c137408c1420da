//! Server configuration from environment variables
//!
//! Invalid values are logged and replaced by defaults; the server always
//! starts.

use std::env;
use gauge_core::Decimals;
use gauge_units::{UnitRegistry, units};

pub const ENV_DEFAULT_CATEGORY: &str = "GAUGE_DEFAULT_CATEGORY";
pub const ENV_DEFAULT_FROM: &str = "GAUGE_DEFAULT_FROM";
pub const ENV_DEFAULT_TO: &str = "GAUGE_DEFAULT_TO";
pub const ENV_DEFAULT_DECIMALS: &str = "GAUGE_DEFAULT_DECIMALS";
pub const ENV_HISTORY_LIMIT: &str = "GAUGE_HISTORY_LIMIT";

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Category selected when a session starts
    pub default_category: String,
    /// Initial source unit; must belong to `default_category`
    pub default_from: Option<String>,
    /// Initial target unit; must belong to `default_category`
    pub default_to: Option<String>,
    pub default_decimals: Decimals,
    /// Maximum number of history entries kept per session
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_category: units::LENGTH.to_string(),
            default_from: Some("m".to_string()),
            default_to: Some("ft".to_string()),
            default_decimals: Decimals::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env(registry: &UnitRegistry) -> Self {
        Self::from_lookup(registry, |key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function
    pub fn from_lookup<F>(registry: &UnitRegistry, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(category) = lookup(ENV_DEFAULT_CATEGORY) {
            if registry.category(&category).is_ok() {
                // Units chosen for the old default no longer apply
                config.default_from = None;
                config.default_to = None;
                config.default_category = category;
            } else {
                tracing::warn!(
                    value = %category,
                    "{} is not a known category, using {}",
                    ENV_DEFAULT_CATEGORY,
                    config.default_category
                );
            }
        }

        if let Some(from) = lookup(ENV_DEFAULT_FROM) {
            config.default_from = Some(from);
        }
        if let Some(to) = lookup(ENV_DEFAULT_TO) {
            config.default_to = Some(to);
        }

        if let Some(raw) = lookup(ENV_DEFAULT_DECIMALS) {
            match raw.trim().parse::<i64>().ok().and_then(|n| Decimals::try_from(n).ok()) {
                Some(decimals) => config.default_decimals = decimals,
                None => tracing::warn!(
                    value = %raw,
                    "{} must be a whole number between 0 and {}, using {}",
                    ENV_DEFAULT_DECIMALS,
                    Decimals::MAX,
                    config.default_decimals
                ),
            }
        }

        if let Some(raw) = lookup(ENV_HISTORY_LIMIT) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.history_limit = limit,
                _ => tracing::warn!(
                    value = %raw,
                    "{} must be a positive integer, using {}",
                    ENV_HISTORY_LIMIT,
                    config.history_limit
                ),
            }
        }

        config
    }
}
