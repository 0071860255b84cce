//! Configuration file model
//!
//! ```toml
//! [processing]
//! precision = 0.00001
//! reducer = "enhanced"
//! simplify_tolerance = 0.5
//!
//! [output]
//! suffix = ".cancel"
//! ```

use std::path::{Path, PathBuf};

use cancelkit_core::{ReducerKind, DEFAULT_PRECISION, DEFAULT_SIMPLIFY_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Directory name under the platform config directory
const APP_DIR: &str = "cancelkit";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Hull and reducer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Quantization grid size for object hulls
    pub precision: f64,
    /// Footprint reducer
    pub reducer: ReducerKind,
    /// Vertex-reduction tolerance of the enhanced reducer
    pub simplify_tolerance: f64,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            reducer: ReducerKind::default(),
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// Where processed files go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    /// Suffix inserted before the extension; absent means rewrite in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// cancelkit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub processing: ProcessingSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let load_error = |reason: String| SettingsError::LoadError {
            path: path.display().to_string(),
            reason,
        };
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?,
            Format::Toml => toml::from_str(&content).map_err(|e| load_error(e.to_string()))?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let precision = self.processing.precision;
        if !(precision.is_finite() && precision > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "processing.precision".to_string(),
                value: precision.to_string(),
            });
        }

        let tolerance = self.processing.simplify_tolerance;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "processing.simplify_tolerance".to_string(),
                value: tolerance.to_string(),
            });
        }

        Ok(())
    }

    /// Default config file location, `<config dir>/cancelkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load the default config file if it exists, otherwise defaults
    pub fn discover() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!("{}, using default configuration", e);
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert_eq!(config.processing.precision, DEFAULT_PRECISION);
        assert_eq!(config.processing.reducer, ReducerKind::Enhanced);
        assert_eq!(config.output.suffix, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[processing]\nreducer = \"basic\"\n").unwrap();
        assert_eq!(config.processing.reducer, ReducerKind::Basic);
        assert_eq!(config.processing.simplify_tolerance, DEFAULT_SIMPLIFY_TOLERANCE);
        assert_eq!(config.output, OutputSettings::default());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::new();
        config.processing.precision = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "processing.precision"
        ));

        let mut config = Config::new();
        config.processing.simplify_tolerance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::of(Path::new("a.toml")), Ok(Format::Toml));
        assert_eq!(Format::of(Path::new("a.JSON")), Ok(Format::Json));
        assert_eq!(
            Format::of(Path::new("a.yaml")),
            Err(ConfigError::UnsupportedFormat("yaml".to_string()))
        );
        assert!(Format::of(Path::new("config")).is_err());
    }
}
