//! Event type definitions for the scene event bus.
//!
//! Events are cloneable so they can be fanned out to both synchronous
//! handlers and async receivers.

use serde::{Deserialize, Serialize};

/// Notification emitted by the editor after a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A single object was added and can be drawn on its own
    ObjectAdded { id: u64 },
    /// Selection flags were recomputed
    SelectionChanged { selected: Vec<u64> },
    /// A clip produced a new preview layer
    PreviewUpdated { entries: usize },
    /// The preview layer was discarded
    PreviewCleared,
    /// Objects received new raw params and pixels
    ObjectsTransformed { ids: Vec<u64> },
    /// All objects, selection, preview and snapshot were dropped
    SceneCleared,
    /// The full scene must be redrawn
    RenderRequested,
    /// A workflow stopped with an error
    WorkflowFailed { workflow: String, message: String },
}

impl SceneEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            Self::ObjectAdded { .. } | Self::ObjectsTransformed { .. } | Self::SceneCleared => {
                EventCategory::Scene
            }
            Self::SelectionChanged { .. } => EventCategory::Selection,
            Self::PreviewUpdated { .. } | Self::PreviewCleared => EventCategory::Preview,
            Self::RenderRequested => EventCategory::Render,
            Self::WorkflowFailed { .. } => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            Self::ObjectAdded { id } => format!("Object {} added", id),
            Self::SelectionChanged { selected } => {
                format!("{} object(s) selected", selected.len())
            }
            Self::PreviewUpdated { entries } => format!("Clip preview with {} entries", entries),
            Self::PreviewCleared => "Clip preview cleared".to_string(),
            Self::ObjectsTransformed { ids } => format!("{} object(s) transformed", ids.len()),
            Self::SceneCleared => "Scene cleared".to_string(),
            Self::RenderRequested => "Render requested".to_string(),
            Self::WorkflowFailed { workflow, message } => {
                format!("{} failed: {}", workflow, message)
            }
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Object lifecycle events.
    Scene,
    /// Selection flag changes.
    Selection,
    /// Clip preview layer changes.
    Preview,
    /// Redraw requests.
    Render,
    /// Workflow failures.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene => write!(f, "Scene"),
            Self::Selection => write!(f, "Selection"),
            Self::Preview => write!(f, "Preview"),
            Self::Render => write!(f, "Render"),
            Self::Error => write!(f, "Error"),
        }
    }
}
