//! Draw workflow: two clicks in draw mode make one primitive.

use rastersketch_core::{
    DrawAlgorithm, PixelPoint, RawParams, Result, SceneEvent, ServiceError, ValidationError,
    WorkflowKind,
};
use rastersketch_service::{DrawRequest, RasterService};

use crate::editor_state::EditorState;
use crate::model::{EditorMode, NewObject, ObjectId};

/// Raw params for the primitive spanned by two clicks.
///
/// A circle is centered on the first click with the distance to the second
/// as radius, rounded down.
pub fn params_for_clicks(
    algorithm: DrawAlgorithm,
    first: PixelPoint,
    second: PixelPoint,
) -> RawParams {
    match algorithm {
        DrawAlgorithm::BresenhamCircle => {
            let dx = i64::from(second.x) - i64::from(first.x);
            let dy = i64::from(second.y) - i64::from(first.y);
            let r = ((dx * dx + dy * dy) as f64).sqrt().floor() as i32;
            RawParams::circle(first, r)
        }
        line => RawParams::line(line, first, second),
    }
}

/// Handles a click at canvas `(x, y)` in draw mode.
///
/// The first click is kept as a pending point. The second one sends the
/// draw request and returns the id of the new object. Pending clicks are
/// dropped once the request finishes, whether or not it succeeded.
pub async fn handle_click<S>(
    state: &mut EditorState,
    service: &S,
    canvas_x: f64,
    canvas_y: f64,
) -> Result<Option<ObjectId>>
where
    S: RasterService + ?Sized,
{
    if state.mode != EditorMode::Draw {
        return Err(ValidationError::WrongMode {
            expected: EditorMode::Draw.to_string(),
            actual: state.mode.to_string(),
        }
        .into());
    }
    let _ticket = state.gate.try_enter(WorkflowKind::Draw)?;

    let point = state.coordinates.pointer_to_cartesian(canvas_x, canvas_y);
    state.pending_clicks.push(point);
    if state.pending_clicks.len() < 2 {
        state.emit(SceneEvent::RenderRequested);
        return Ok(None);
    }

    let params = params_for_clicks(
        state.draw_algorithm,
        state.pending_clicks[0],
        state.pending_clicks[1],
    );
    let result = request_object(service, params).await;
    state.pending_clicks.clear();

    match result {
        Ok(object) => {
            let id = state.store.add(object);
            tracing::info!("Object {} drawn with {}", id, params.algorithm());
            state.emit(SceneEvent::ObjectAdded { id });
            Ok(Some(id))
        }
        Err(e) => {
            tracing::warn!("Draw request failed: {}", e);
            state.emit(SceneEvent::WorkflowFailed {
                workflow: WorkflowKind::Draw.to_string(),
                message: e.to_string(),
            });
            state.emit(SceneEvent::RenderRequested);
            Err(e.into())
        }
    }
}

/// Asks the service to rasterize `params`.
///
/// When the response lacks pixels one more request is sent with the
/// returned params; if that fails too the object gets no pixels.
async fn request_object<S>(
    service: &S,
    params: RawParams,
) -> std::result::Result<NewObject, ServiceError>
where
    S: RasterService + ?Sized,
{
    let response = service.draw(&DrawRequest::new(params)).await?;

    let stored = response.params.unwrap_or(params);
    if let Some(kind) = response.kind {
        if kind != stored.kind() {
            tracing::warn!("Draw response says {} but carries {} params", kind, stored.kind());
        }
    }

    let pixels = match response.pixels {
        Some(pixels) => Some(pixels),
        None => {
            tracing::warn!("Draw response has no pixels, requesting rasterization again");
            match service.draw(&DrawRequest::new(stored)).await {
                Ok(retry) => retry.pixels,
                Err(e) => {
                    tracing::warn!("Fallback draw request failed: {}", e);
                    None
                }
            }
        }
    };

    Ok(NewObject {
        kind: stored.kind(),
        params: stored,
        pixels,
    })
}
