//! # RasterSketch
//!
//! Client core of a 2D raster scene editor. Lines and circles are
//! rasterized, transformed and clipped by a remote service; this crate keeps
//! the scene, selection and clip preview consistent around those calls.
//!
//! ## Architecture
//!
//! RasterSketch is organized as a workspace with multiple crates:
//!
//! 1. **rastersketch-core** - Geometry data model, errors, scene events
//! 2. **rastersketch-service** - Wire protocol and HTTP client for the service
//! 3. **rastersketch-scene** - Scene store, selection, workflows, renderer
//! 4. **rastersketch-settings** - Configuration file model and persistence
//! 5. **rastersketch** - Session runner and the command-line binary

pub mod session;

pub use rastersketch_core::{
    ClipAlgorithm, DrawAlgorithm, Error, PixelPoint, RawParams, Result, SceneEvent,
    ServiceError, Theme, TransformKind, TransformParams, ValidationError,
};

pub use rastersketch_scene::{
    handle_click, run_clip, run_transform, ClipOutcome, EditorConfig, EditorMode, EditorState,
    TransformBatchPolicy, TransformOutcome,
};

pub use rastersketch_service::{HttpRasterService, HttpServiceConfig, RasterService};

pub use rastersketch_settings::{default_config_path, Config, SettingsError};

pub use session::{parse_script, run_session, SessionReport, SessionStep, StepFailure};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

/// Editor settings taken from the loaded configuration.
pub fn editor_config(config: &Config) -> EditorConfig {
    EditorConfig {
        width: config.canvas.width,
        height: config.canvas.height,
        draw_algorithm: config.workflow.draw_algorithm,
        ..EditorConfig::default()
    }
}

/// HTTP client settings taken from the loaded configuration.
pub fn service_config(config: &Config) -> HttpServiceConfig {
    HttpServiceConfig {
        base_url: config.service.base_url.clone(),
        timeout_ms: config.service.timeout_ms,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support (default level INFO)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
