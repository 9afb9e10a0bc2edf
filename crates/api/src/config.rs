//! Service Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `SCREENING__*` environment variables (`SCREENING__SERVER__ADDR`,
//! `SCREENING__DIAGNOSIS__DELAY_MS`, ...).

use crate::rate_limit::RateLimitConfig;
use crate::ApiError;
use clinical_features::Disease;
use config::{Config, Environment, File};
use inference_engine::ArtifactPaths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the config file path
pub const CONFIG_PATH_ENV: &str = "SCREENING_CONFIG";

/// Config file used when `SCREENING_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/screening.toml";

const ENV_PREFIX: &str = "SCREENING";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub diagnosis: DiagnosisConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory holding the six artifacts under their default names
    pub dir: PathBuf,
    /// Per-disease scaler overrides, keyed by disease wire name
    pub scalers: BTreeMap<String, PathBuf>,
    /// Per-disease classifier overrides, keyed by disease wire name
    pub classifiers: BTreeMap<String, PathBuf>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            scalers: BTreeMap::new(),
            classifiers: BTreeMap::new(),
        }
    }
}

impl ModelsConfig {
    /// Resolve the six artifact paths
    pub fn artifact_paths(&self) -> Result<ArtifactPaths, ApiError> {
        let mut paths = ArtifactPaths::in_dir(&self.dir);
        for (key, path) in &self.scalers {
            paths = paths.with_scaler(parse_disease_key(key)?, path);
        }
        for (key, path) in &self.classifiers {
            paths = paths.with_classifier(parse_disease_key(key)?, path);
        }
        Ok(paths)
    }
}

fn parse_disease_key(key: &str) -> Result<Disease, ApiError> {
    key.parse::<Disease>()
        .map_err(|_| ApiError::Configuration(format!("unknown disease in models config: {}", key)))
}

/// Diagnose request behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// Pacing delay before each result is computed
    pub delay_ms: u64,
    /// Reject select-box values outside the offered choices
    pub enforce_choices: bool,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            enforce_choices: true,
        }
    }
}

impl DiagnosisConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Logging output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Prometheus exporter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load from the file named by `SCREENING_CONFIG` (or the default
    /// path) plus environment overrides
    pub fn load() -> Result<Self, ApiError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    /// Load from a specific file plus environment overrides. A missing file
    /// is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ApiError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.diagnosis.delay(), Duration::from_secs(2));
        assert!(config.diagnosis.enforce_choices);
        assert_eq!(config.models.dir, PathBuf::from("models"));
        assert_eq!(config.logging.level, "info");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/screening.toml")).unwrap();
        assert_eq!(config.models.dir, PathBuf::from("models"));
    }

    #[test]
    fn test_shipped_config_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/screening.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.rate_limit.burst_size, 20);
        assert_eq!(config.diagnosis.delay_ms, 2000);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_model_overrides() {
        let mut models = ModelsConfig::default();
        models
            .classifiers
            .insert("parkinsons".to_string(), PathBuf::from("/srv/pd.json"));
        let paths = models.artifact_paths().unwrap();
        assert_eq!(paths.classifier(Disease::Parkinsons), Path::new("/srv/pd.json"));
        assert_eq!(paths.scaler(Disease::Heart), Path::new("models/scaler_heart.json"));
    }

    #[test]
    fn test_unknown_disease_override_rejected() {
        let mut models = ModelsConfig::default();
        models.scalers.insert("lungs".to_string(), PathBuf::from("x.json"));
        assert!(matches!(models.artifact_paths(), Err(ApiError::Configuration(_))));
    }
}
