//! Metrics cache configuration
//!
//! Both metrics caches are on by default. The environment can tune them
//! without touching code:
//!
//! ```bash
//! GLYPHMARK_HEIGHT_CACHE=1024 ./my_app   # line-height cache capacity
//! GLYPHMARK_STYLE_CACHE=0 ./my_app       # reconfigure for every width query
//! ```
//!
//! The environment is read once per process; explicit [`MetricsConfig`]
//! values passed to a provider always win.

use std::sync::OnceLock;

/// Environment variable holding the line-height cache capacity
pub const HEIGHT_CACHE_ENV: &str = "GLYPHMARK_HEIGHT_CACHE";

/// Environment variable toggling the one-entry last-style cache
pub const STYLE_CACHE_ENV: &str = "GLYPHMARK_STYLE_CACHE";

pub const DEFAULT_HEIGHT_CACHE_CAPACITY: usize = 256;

static ENV_CONFIG: OnceLock<MetricsConfig> = OnceLock::new();

/// How a [`crate::metrics::MetricsProvider`] caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Maximum number of font descriptors whose line height is remembered
    pub height_cache_capacity: usize,
    /// Skip reconfiguring the measurer when the same style asks twice in a row
    pub reuse_last_style: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            height_cache_capacity: DEFAULT_HEIGHT_CACHE_CAPACITY,
            reuse_last_style: true,
        }
    }
}

impl MetricsConfig {
    /// Defaults overridden by the process environment (read once)
    pub fn from_env() -> Self {
        *ENV_CONFIG.get_or_init(|| {
            let config = Self::from_lookup(|key| std::env::var(key).ok());
            if config != Self::default() {
                log::info!("Glyphmark metrics configured from environment: {:?}", config);
            }
            config
        })
    }

    /// Defaults overridden by whatever `lookup` returns for the env keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(HEIGHT_CACHE_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.height_cache_capacity = capacity,
                _ => log::warn!(
                    "Ignoring {}={:?}: expected a positive integer",
                    HEIGHT_CACHE_ENV,
                    raw
                ),
            }
        }

        if let Some(raw) = lookup(STYLE_CACHE_ENV) {
            config.reuse_last_style = !matches!(
                raw.trim().to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = MetricsConfig::from_lookup(|_| None);
        assert_eq!(config, MetricsConfig::default());
        assert!(config.reuse_last_style);
        assert_eq!(config.height_cache_capacity, 256);
    }

    #[test]
    fn test_overrides() {
        let config = MetricsConfig::from_lookup(|key| match key {
            HEIGHT_CACHE_ENV => Some("32".into()),
            STYLE_CACHE_ENV => Some("off".into()),
            _ => None,
        });
        assert_eq!(config.height_cache_capacity, 32);
        assert!(!config.reuse_last_style);
    }

    #[test]
    fn test_bad_capacity_keeps_default() {
        let config = MetricsConfig::from_lookup(|key| {
            (key == HEIGHT_CACHE_ENV).then(|| "lots".to_string())
        });
        assert_eq!(config.height_cache_capacity, DEFAULT_HEIGHT_CACHE_CAPACITY);
    }
}
