//! Configuration management for RasterSketch
//!
//! Provides the configuration file model, validation and file I/O.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Service settings (rasterization service URL, request timeout)
//! - Canvas settings (surface size)
//! - UI preferences (theme)
//! - Workflow defaults (batch policy, clip and draw algorithms)

use rastersketch_core::{ClipAlgorithm, DrawAlgorithm, Theme, TransformBatchPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Rasterization service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Base URL of the service
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Canvas surface settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// UI preference settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Render palette
    pub theme: Theme,
}

/// Workflow defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    pub transform_batch_policy: TransformBatchPolicy,
    pub clip_algorithm: ClipAlgorithm,
    pub draw_algorithm: DrawAlgorithm,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceSettings,
    pub canvas: CanvasSettings,
    pub ui: UiSettings,
    pub workflow: WorkflowSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(format!(
            "{} (config file must be .json or .toml)",
            other.unwrap_or("no extension")
        ))
        .into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or use defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let url = self.service.base_url.trim();
        if url.is_empty() {
            return Err(SettingsError::invalid_setting(
                "service.base_url",
                "must not be empty",
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::invalid_setting(
                "service.base_url",
                format!("'{}' is not an http(s) URL", url),
            ));
        }

        if self.service.timeout_ms == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "service.timeout_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "canvas".to_string(),
                value: format!("{}x{}", self.canvas.width, self.canvas.height),
            }
            .into());
        }

        Ok(())
    }
}

/// Default location of the config file: `<config dir>/rastersketch/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("rastersketch").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory(
                "no configuration directory on this platform".to_string(),
            )
        })
}
