//! g2g configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::publisher::GraphiteConfig;

/// Main g2g configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collector connection and cadence
    pub graphite: GraphiteConfig,

    /// Built-in process metrics
    pub metrics: MetricsConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        self.graphite.validate()?;
        if self.metrics.prefix.contains(' ') {
            return Err(eyre::eyre!("metrics prefix must not contain spaces: {:?}", self.metrics.prefix));
        }
        Ok(())
    }

    /// Load the publisher settings
    ///
    /// An explicit path must load. Otherwise the first readable file among
    /// [`Config::search_paths`] wins, and defaults apply when none does.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load g2g config {}", path.display()));
        }

        for candidate in Self::search_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => warn!(path = %candidate.display(), error = %e, "Skipping unreadable g2g config"),
            }
        }

        debug!("No g2g config found, publishing with defaults");
        Ok(Self::default())
    }

    /// `.g2g.yml` in the working directory, then `<config_dir>/g2g/g2g.yml`
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".g2g.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("g2g").join("g2g.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context("Failed to read g2g config")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse g2g config")?;

        info!(path = %path.display(), endpoint = %config.graphite.endpoint, "Loaded g2g config");
        Ok(config)
    }
}

/// Built-in process metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prefix for the built-in metric names, e.g. "g2g" -> "g2g.uptime_secs"
    pub prefix: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            prefix: "g2g".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Full metric name under the prefix
    pub fn metric_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.graphite.endpoint, "localhost:2003");
        assert_eq!(config.graphite.interval_ms, 10_000);
        assert_eq!(config.metrics.prefix, "g2g");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
graphite:
  endpoint: stats.internal:2003
  interval-ms: 5000
  timeout-ms: 250
  registration-buffer: 64

metrics:
  prefix: web01
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.graphite.endpoint, "stats.internal:2003");
        assert_eq!(config.graphite.interval_ms, 5000);
        assert_eq!(config.graphite.timeout_ms, 250);
        assert_eq!(config.graphite.registration_buffer, 64);
        assert_eq!(config.metrics.prefix, "web01");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
graphite:
  endpoint: stats:2003
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.graphite.endpoint, "stats:2003");

        // Defaults for unspecified
        assert_eq!(config.graphite.timeout_ms, 1_000);
        assert_eq!(config.metrics.prefix, "g2g");
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("g2g.yml");
        fs::write(&path, "graphite:\n  endpoint: 10.0.0.5:2003\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.graphite.endpoint, "10.0.0.5:2003");
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn test_load_explicit_path_bad_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("g2g.yml");
        fs::write(&path, "graphite:\n  interval-ms: soon\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_search_paths_prefer_local_file() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from(".g2g.yml"));
        assert!(paths.iter().skip(1).all(|p| p.ends_with("g2g/g2g.yml")));
    }

    #[test]
    fn test_validate_rejects_spaced_prefix() {
        let config = Config {
            metrics: MetricsConfig {
                prefix: "my app".to_string(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_metric_name() {
        let metrics = MetricsConfig::default();
        assert_eq!(metrics.metric_name("uptime_secs"), "g2g.uptime_secs");

        let bare = MetricsConfig { prefix: String::new() };
        assert_eq!(bare.metric_name("pid"), "pid");
    }
}
