//! Error handling for RasterSketch
//!
//! Errors come in two tiers:
//! - Validation errors: detected locally before any request is sent; they
//!   never mutate editor state.
//! - Service errors: the rasterization service failed (transport, timeout,
//!   non-success status or unparsable body). A failure in the middle of a
//!   batch is wrapped in [`Error::BatchAborted`].
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::fmt;
use thiserror::Error;

/// Workflow that can hold the editor's single workflow slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    Draw,
    Clip,
    Transform,
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "draw"),
            Self::Clip => write!(f, "clip"),
            Self::Transform => write!(f, "transform"),
        }
    }
}

/// Local validation failure
///
/// Reported directly to the user; no request was sent and no state changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No marquee rectangle has been dragged
    #[error("Select a region first")]
    NoSelectionRectangle,

    /// The marquee rectangle has no area
    #[error("Selection region is degenerate ({width}x{height})")]
    DegenerateRectangle {
        /// Rectangle width in model units.
        width: i32,
        /// Rectangle height in model units.
        height: i32,
    },

    /// Circles cannot be clipped; the whole batch is rejected
    #[error("Clipping circles is unsupported ({count} circle(s) inside the region)")]
    CircleClipUnsupported {
        /// Number of circles that qualified for the clip.
        count: usize,
    },

    /// A transform needs at least one selected object
    #[error("Select an object first")]
    EmptySelection,

    /// Reset was requested without an active clip preview
    #[error("No clip preview to reset")]
    NoActivePreview,

    /// Another workflow is still running
    #[error("A {active} workflow is already running")]
    WorkflowBusy {
        /// The workflow holding the slot.
        active: WorkflowKind,
    },

    /// Transform parameters are unusable
    #[error("Invalid transform parameters: {reason}")]
    InvalidTransformParams {
        /// Why the parameters were rejected.
        reason: String,
    },

    /// The gesture does not apply in the current editor mode
    #[error("Operation requires {expected} mode, editor is in {actual} mode")]
    WrongMode {
        /// Mode the operation needs.
        expected: String,
        /// Mode the editor is in.
        actual: String,
    },
}

/// Rasterization service error
///
/// Represents a failed request/response exchange with the remote service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The request could not be delivered or the connection broke
    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        /// Endpoint path, e.g. `/draw`.
        endpoint: String,
        /// Underlying transport error.
        reason: String,
    },

    /// No response within the configured timeout
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout {
        /// Endpoint path.
        endpoint: String,
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The service answered with a non-success status
    #[error("Service returned status {status} for {endpoint}. Body: {body}")]
    Status {
        /// Endpoint path.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be interpreted
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// Endpoint path.
        endpoint: String,
        /// What was wrong with the body.
        reason: String,
    },
}

impl ServiceError {
    /// Endpoint the failed request was addressed to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::MalformedResponse { endpoint, .. } => endpoint,
        }
    }
}

/// Main error type for RasterSketch
///
/// A unified error type used by every public workflow entry point.
#[derive(Error, Debug)]
pub enum Error {
    /// Local validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Single-request service error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A batch stopped at its first remote failure
    #[error("{workflow} aborted after {completed} of {total} object(s): {source}")]
    BatchAborted {
        /// The workflow whose batch was aborted.
        workflow: WorkflowKind,
        /// Objects already committed when the failure occurred.
        completed: usize,
        /// Objects in the batch.
        total: usize,
        /// The failure that stopped the batch.
        source: ServiceError,
    },
}

impl Error {
    /// Check if this is a local validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this failure came from the rasterization service
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Service(_) | Error::BatchAborted { .. })
    }

    /// The validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
