//! Server configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use storefront_products::DEFAULT_PAGE_SIZE;

/// Upper bound on `limit` when `MAX_PAGE_SIZE` is unset.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DEFAULT_PAGE_SIZE must be >= 1")]
    ZeroPageSize,

    #[error("DEFAULT_PAGE_SIZE ({default}) exceeds MAX_PAGE_SIZE ({max})")]
    DefaultAboveMax { default: usize, max: usize },

    #[error("CATALOG_RELOAD_SECS must be >= 1")]
    ZeroReloadInterval,
}

/// Page size policy applied at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default: usize,
    pub max: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default: DEFAULT_PAGE_SIZE,
            max: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    pub categories_path: PathBuf,
    pub page_limits: PageLimits,
    /// `None` disables periodic catalog reloads.
    pub reload_interval: Option<Duration>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps).
    ///
    /// Unparseable values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            categories_path: lookup("CATEGORIES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.categories_path),
            page_limits: PageLimits {
                default: parsed(&lookup, "DEFAULT_PAGE_SIZE").unwrap_or(defaults.page_limits.default),
                max: parsed(&lookup, "MAX_PAGE_SIZE").unwrap_or(defaults.page_limits.max),
            },
            reload_interval: parsed::<u64>(&lookup, "CATALOG_RELOAD_SECS").map(Duration::from_secs),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let PageLimits { default, max } = self.page_limits;
        if default == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if default > max {
            return Err(ConfigError::DefaultAboveMax { default, max });
        }
        if self.reload_interval == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroReloadInterval);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            catalog_path: PathBuf::from("data/products.json"),
            categories_path: PathBuf::from("data/categories.json"),
            page_limits: PageLimits::default(),
            reload_interval: None,
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ApiConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.page_limits.default, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("CATALOG_PATH", "/srv/catalog.json"),
            ("DEFAULT_PAGE_SIZE", "24"),
            ("MAX_PAGE_SIZE", "48"),
            ("CATALOG_RELOAD_SECS", "30"),
        ]);
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.page_limits, PageLimits { default: 24, max: 48 });
        assert_eq!(config.reload_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "eighty"), ("DEFAULT_PAGE_SIZE", "-3")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_limits.default, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn validate_rejects_inconsistent_page_sizes() {
        let config = config_from(&[("DEFAULT_PAGE_SIZE", "0")]);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));

        let config = config_from(&[("DEFAULT_PAGE_SIZE", "50"), ("MAX_PAGE_SIZE", "20")]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DefaultAboveMax { default: 50, max: 20 })
        );

        let config = config_from(&[("CATALOG_RELOAD_SECS", "0")]);
        assert_eq!(config.validate(), Err(ConfigError::ZeroReloadInterval));
    }
}
