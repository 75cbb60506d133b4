//! Configuration types for bujo.
//!
//! [`Config::load`] reads `~/.config/bujo/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `BUJO_`-prefixed
//! environment overrides (`BUJO_RESOLVER__CREATED_WINDOW_DAYS=3`).
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[normalizer]
parser_confidence   = 0.6
provider_confidence = 0.85

[resolver]
estimated_window_days = 30
created_window_days   = 7

[estimator]
morning_cutoff_hour    = 10
evening_cutoff_hour    = 18
filename_window_days   = 365
max_concurrent_lookups = 4
lookup_timeout_ms      = 2000
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level pipeline configuration, loaded from `~/.config/bujo/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

/// `[normalizer]` section of `config.toml`.
///
/// Confidence assigned to an entry whose candidate carries none, by
/// provenance.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_parser_confidence")]
    pub parser_confidence: f64,
    #[serde(default = "default_provider_confidence")]
    pub provider_confidence: f64,
}

fn default_parser_confidence() -> f64 { 0.6 }
fn default_provider_confidence() -> f64 { 0.85 }

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            parser_confidence: default_parser_confidence(),
            provider_confidence: default_provider_confidence(),
        }
    }
}

/// `[resolver]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// An image's estimated journal date is trusted only within this many
    /// days of now.
    #[serde(default = "default_estimated_window_days")]
    pub estimated_window_days: i64,
    /// An image's raw creation time is trusted only within this many days
    /// of now.
    #[serde(default = "default_created_window_days")]
    pub created_window_days: i64,
}

fn default_estimated_window_days() -> i64 { 30 }
fn default_created_window_days() -> i64 { 7 }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            estimated_window_days: default_estimated_window_days(),
            created_window_days: default_created_window_days(),
        }
    }
}

/// `[estimator]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Photos taken today before this hour belong to yesterday's page.
    #[serde(default = "default_morning_cutoff_hour")]
    pub morning_cutoff_hour: u32,
    /// Photos taken yesterday at or after this hour belong to today's page.
    #[serde(default = "default_evening_cutoff_hour")]
    pub evening_cutoff_hour: u32,
    /// Filename dates further than this from now are ignored.
    #[serde(default = "default_filename_window_days")]
    pub filename_window_days: i64,
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

fn default_morning_cutoff_hour() -> u32 { 10 }
fn default_evening_cutoff_hour() -> u32 { 18 }
fn default_filename_window_days() -> i64 { 365 }
fn default_max_concurrent_lookups() -> usize { 4 }
fn default_lookup_timeout_ms() -> u64 { 2000 }

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            morning_cutoff_hour: default_morning_cutoff_hour(),
            evening_cutoff_hour: default_evening_cutoff_hour(),
            filename_window_days: default_filename_window_days(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/bujo/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("BUJO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("bujo")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.resolver.estimated_window_days, 30);
        assert_eq!(cfg.resolver.created_window_days, 7);
        assert_eq!(cfg.estimator.morning_cutoff_hour, 10);
        assert_eq!(cfg.estimator.evening_cutoff_hour, 18);
        assert_eq!(cfg.estimator.filename_window_days, 365);
    }

    #[test]
    fn serde_defaults_match_embedded_toml() {
        let cfg = Config::defaults();
        assert_eq!(cfg.normalizer.parser_confidence, NormalizerConfig::default().parser_confidence);
        assert_eq!(cfg.estimator.lookup_timeout_ms, EstimatorConfig::default().lookup_timeout_ms);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/bujo/config.toml"))
            .expect("missing config file is not an error");
        assert_eq!(cfg.estimator.max_concurrent_lookups, 4);
    }
}
