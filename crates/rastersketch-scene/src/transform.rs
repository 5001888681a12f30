//! Transform workflow.
//!
//! Sends one transform request per selected object, in selection order, and
//! writes the returned raw params and pixels back into the store.

pub use rastersketch_core::TransformBatchPolicy;

use rastersketch_core::{
    Error, RawParams, Result, SceneEvent, ServiceError, TransformParams, ValidationError,
    WorkflowKind,
};
use rastersketch_service::protocol::TRANSFORM_ENDPOINT;
use rastersketch_service::{RasterService, TransformRequest, TransformResponse};

use crate::editor_state::EditorState;
use crate::model::ObjectId;

/// Result of a transform batch that succeeded for every object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    pub transformed: Vec<ObjectId>,
}

fn check_kind(
    original: &RawParams,
    response: TransformResponse,
) -> std::result::Result<TransformResponse, ServiceError> {
    if response.params.kind() != original.kind() {
        return Err(ServiceError::MalformedResponse {
            endpoint: TRANSFORM_ENDPOINT.to_string(),
            reason: format!(
                "expected {} params, got {}",
                original.kind(),
                response.params.kind()
            ),
        });
    }
    Ok(response)
}

/// Applies `params` to every selected object.
pub async fn run_transform<S>(
    state: &mut EditorState,
    service: &S,
    params: TransformParams,
    policy: TransformBatchPolicy,
) -> Result<TransformOutcome>
where
    S: RasterService + ?Sized,
{
    let _ticket = state.gate.try_enter(WorkflowKind::Transform)?;

    if state.selection.selected_ids().is_empty() {
        return Err(ValidationError::EmptySelection.into());
    }
    params.validate()?;

    let targets: Vec<(ObjectId, RawParams)> = state
        .selection
        .selected_ids()
        .iter()
        .filter_map(|id| state.store.get(*id).map(|o| (o.id, *o.params())))
        .collect();
    let total = targets.len();

    let mut committed = Vec::with_capacity(total);
    let mut buffered = Vec::new();

    for (id, raw) in targets {
        tracing::debug!("Transforming object {} ({})", id, params.kind());
        let request = TransformRequest::new(raw, params);
        let result = service
            .transform(&request)
            .await
            .and_then(|response| check_kind(&raw, response));

        match result {
            Ok(response) => match policy {
                TransformBatchPolicy::BestEffort => {
                    if let Some(obj) = state.store.get_mut(id) {
                        obj.replace_geometry(response.params, response.pixels);
                    }
                    committed.push(id);
                }
                TransformBatchPolicy::Atomic => buffered.push((id, response)),
            },
            Err(source) => {
                tracing::warn!(
                    "Transform aborted at object {} ({} of {} committed): {}",
                    id,
                    committed.len(),
                    total,
                    source
                );
                if !committed.is_empty() {
                    state.emit(SceneEvent::ObjectsTransformed {
                        ids: committed.clone(),
                    });
                    state.emit(SceneEvent::RenderRequested);
                }
                state.emit(SceneEvent::WorkflowFailed {
                    workflow: WorkflowKind::Transform.to_string(),
                    message: source.to_string(),
                });
                return Err(Error::BatchAborted {
                    workflow: WorkflowKind::Transform,
                    completed: committed.len(),
                    total,
                    source,
                });
            }
        }
    }

    for (id, response) in buffered {
        if let Some(obj) = state.store.get_mut(id) {
            obj.replace_geometry(response.params, response.pixels);
        }
        committed.push(id);
    }

    tracing::info!("{} applied to {} object(s)", params.kind(), committed.len());
    state.emit(SceneEvent::ObjectsTransformed {
        ids: committed.clone(),
    });
    state.emit(SceneEvent::RenderRequested);

    Ok(TransformOutcome {
        transformed: committed,
    })
}
