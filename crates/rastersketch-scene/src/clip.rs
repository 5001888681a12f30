//! Clip preview workflow.
//!
//! Clips every object touching the marquee rectangle against it and shows
//! the results as a preview layer on top of the untouched scene. A snapshot
//! of the scene taken just before the first request lets
//! [`EditorState::reset_clip`] go back.

use rastersketch_core::{
    ClipAlgorithm, Error, PrimitiveKind, Result, SceneEvent, ValidationError, WorkflowKind,
};
use rastersketch_service::{ClipRequest, RasterService};

use crate::editor_state::EditorState;
use crate::model::{ObjectId, PreviewEntry};

/// Result of a clip that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// At least one object was accepted; the preview layer was replaced.
    Previewed { requested: usize, clipped: usize },
    /// Nothing qualified, or every object was rejected. State is unchanged.
    NothingClipped { requested: usize },
}

/// Clips the objects under the marquee rectangle.
///
/// Local checks run before any request and never change state: gate free,
/// rectangle present and non-degenerate, no circle among the qualifying
/// objects. Requests are then sent one at a time in store order.
pub async fn run_clip<S>(
    state: &mut EditorState,
    service: &S,
    algorithm: ClipAlgorithm,
) -> Result<ClipOutcome>
where
    S: RasterService + ?Sized,
{
    let _ticket = state.gate.try_enter(WorkflowKind::Clip)?;

    let rect = state
        .selection
        .rectangle()
        .copied()
        .ok_or(ValidationError::NoSelectionRectangle)?;
    if rect.is_degenerate() {
        return Err(ValidationError::DegenerateRectangle {
            width: rect.width(),
            height: rect.height(),
        }
        .into());
    }

    let targets: Vec<_> = state.store.iter().filter(|o| o.touches(&rect)).collect();
    if targets.is_empty() {
        tracing::info!("Clip window {} contains no objects", rect);
        return Ok(ClipOutcome::NothingClipped { requested: 0 });
    }

    let circles = targets
        .iter()
        .filter(|o| o.kind == PrimitiveKind::Circle)
        .count();
    if circles > 0 {
        return Err(ValidationError::CircleClipUnsupported { count: circles }.into());
    }

    let (xmin, ymin, xmax, ymax) = rect.bounds();
    let requests: Vec<(ObjectId, ClipRequest)> = targets
        .into_iter()
        .map(|obj| {
            (
                obj.id,
                ClipRequest {
                    kind: obj.kind,
                    params: *obj.params(),
                    algorithm,
                    xmin,
                    ymin,
                    xmax,
                    ymax,
                },
            )
        })
        .collect();

    let snapshot = state.store.snapshot();
    let total = requests.len();
    let mut entries = Vec::new();

    for (completed, (id, request)) in requests.into_iter().enumerate() {
        tracing::debug!("Clipping object {} with {}", id, algorithm);
        let response = match service.clip(&request).await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(
                    "Clip aborted at object {} ({}/{}): {}",
                    id,
                    completed,
                    total,
                    source
                );
                state.emit(SceneEvent::WorkflowFailed {
                    workflow: WorkflowKind::Clip.to_string(),
                    message: source.to_string(),
                });
                return Err(Error::BatchAborted {
                    workflow: WorkflowKind::Clip,
                    completed,
                    total,
                    source,
                });
            }
        };

        if response.has_result() {
            entries.push(PreviewEntry {
                source_id: id,
                kind: request.kind,
                params: request.params,
                pixels: response.pixels,
            });
        } else {
            tracing::debug!("Object {} rejected by the clip window", id);
        }
    }

    if entries.is_empty() {
        tracing::info!("Clip rejected all {} object(s)", total);
        return Ok(ClipOutcome::NothingClipped { requested: total });
    }

    let clipped = entries.len();
    state.preview = entries;
    state.snapshot = Some(snapshot);

    tracing::info!("Clip preview shows {} of {} object(s)", clipped, total);
    state.emit(SceneEvent::PreviewUpdated { entries: clipped });
    state.emit(SceneEvent::RenderRequested);

    Ok(ClipOutcome::Previewed {
        requested: total,
        clipped,
    })
}
