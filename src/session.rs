//! Scripted editing sessions.
//!
//! A session script is a JSON array of steps replayed against one
//! [`EditorState`]. A failing step is logged and recorded in the report;
//! the remaining steps still run.

use rastersketch_core::{ClipAlgorithm, DrawAlgorithm, TransformKind, TransformParams};
use rastersketch_scene::{
    handle_click, run_clip, run_transform, EditorMode, EditorState, TransformBatchPolicy,
};
use rastersketch_service::RasterService;
use serde::{Deserialize, Serialize};

/// One scripted user action. Pointer positions are canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionStep {
    Mode {
        mode: EditorMode,
    },
    Algorithm {
        algorithm: DrawAlgorithm,
    },
    Click {
        x: f64,
        y: f64,
    },
    Drag {
        from: (f64, f64),
        to: (f64, f64),
    },
    Clip {
        #[serde(default)]
        algorithm: Option<ClipAlgorithm>,
    },
    ResetClip,
    /// `params` only needs the fields of `kind`.
    Transform {
        kind: TransformKind,
        params: serde_json::Value,
    },
    Clear,
}

impl SessionStep {
    /// Short name used in logs and reports.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Mode { .. } => "mode",
            Self::Algorithm { .. } => "algorithm",
            Self::Click { .. } => "click",
            Self::Drag { .. } => "drag",
            Self::Clip { .. } => "clip",
            Self::ResetClip => "reset_clip",
            Self::Transform { .. } => "transform",
            Self::Clear => "clear",
        }
    }
}

/// A step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub index: usize,
    pub op: String,
    pub message: String,
}

/// Summary of a replayed session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub steps_run: usize,
    pub failures: Vec<StepFailure>,
}

impl SessionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses a session script.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<SessionStep>> {
    serde_json::from_str(json)
}

/// Replays `steps` in order.
///
/// `clip_default` is used by clip steps that name no algorithm.
pub async fn run_session<S>(
    state: &mut EditorState,
    service: &S,
    steps: &[SessionStep],
    policy: TransformBatchPolicy,
    clip_default: ClipAlgorithm,
) -> SessionReport
where
    S: RasterService + ?Sized,
{
    let mut report = SessionReport::default();

    for (index, step) in steps.iter().enumerate() {
        report.steps_run += 1;
        if let Err(message) = apply_step(state, service, step, policy, clip_default).await {
            tracing::warn!("Step {} ({}) failed: {}", index, step.op(), message);
            report.failures.push(StepFailure {
                index,
                op: step.op().to_string(),
                message,
            });
        }
    }

    tracing::info!(
        "Session finished: {} step(s), {} failure(s), {} object(s) in scene",
        report.steps_run,
        report.failures.len(),
        state.store().len()
    );
    report
}

async fn apply_step<S>(
    state: &mut EditorState,
    service: &S,
    step: &SessionStep,
    policy: TransformBatchPolicy,
    clip_default: ClipAlgorithm,
) -> Result<(), String>
where
    S: RasterService + ?Sized,
{
    match step {
        SessionStep::Mode { mode } => state.set_mode(*mode),
        SessionStep::Algorithm { algorithm } => state.set_draw_algorithm(*algorithm),
        SessionStep::Click { x, y } => {
            if let Some(id) = handle_click(state, service, *x, *y)
                .await
                .map_err(|e| e.to_string())?
            {
                tracing::debug!("Click added object {}", id);
            }
        }
        SessionStep::Drag { from, to } => {
            if !state.pointer_down(from.0, from.1) {
                return Err(format!("drag ignored in {} mode", state.mode()));
            }
            state.pointer_move(to.0, to.1);
            state.pointer_up();
        }
        SessionStep::Clip { algorithm } => {
            let outcome = run_clip(state, service, algorithm.unwrap_or(clip_default))
                .await
                .map_err(|e| e.to_string())?;
            tracing::debug!("Clip outcome: {:?}", outcome);
        }
        SessionStep::ResetClip => state.reset_clip().map_err(|e| e.to_string())?,
        SessionStep::Transform { kind, params } => {
            let params = TransformParams::from_record(*kind, params).map_err(|e| e.to_string())?;
            run_transform(state, service, params, policy)
                .await
                .map_err(|e| e.to_string())?;
        }
        SessionStep::Clear => state.clear_scene().map_err(|e| e.to_string())?,
    }
    Ok(())
}
