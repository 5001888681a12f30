//! RasterSketch Settings Crate
//!
//! Handles application configuration: the file model, validation and
//! JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CanvasSettings, Config, ServiceSettings, UiSettings, WorkflowSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
