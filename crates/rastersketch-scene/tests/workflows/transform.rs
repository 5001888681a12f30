use rastersketch_core::{
    DrawAlgorithm, Error, PixelPoint, RawParams, ReflectionAxis, TransformKind, TransformParams,
    ValidationError,
};
use rastersketch_scene::{run_transform, EditorMode, EditorState, TransformBatchPolicy};
use rastersketch_service::TransformResponse;

use super::mock_service::{transport_error, Call, MockService};
use super::{add_primitive, drag_marquee};

fn p(x: i32, y: i32) -> PixelPoint {
    PixelPoint::new(x, y)
}

fn transform_count(service: &MockService) -> usize {
    service
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Transform(_)))
        .count()
}

#[tokio::test]
async fn test_translate_selected_line() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let a = add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;
    let b = add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(50, 50), p(60, 50)).await;
    let untouched = state.store().get(b).unwrap().clone();

    drag_marquee(&mut state, EditorMode::Selection, p(-1, -1), p(2, 1));
    assert_eq!(state.selection().selected_ids(), &[a]);

    let outcome = run_transform(
        &mut state,
        &service,
        TransformParams::Translation { dx: 5, dy: 0 },
        TransformBatchPolicy::BestEffort,
    )
    .await
    .unwrap();
    assert_eq!(outcome.transformed, vec![a]);

    let moved = state.store().get(a).unwrap();
    assert_eq!(
        moved.params(),
        &RawParams::line(DrawAlgorithm::Dda, p(5, 0), p(10, 0))
    );
    assert_eq!(moved.pixels(), &[p(5, 0), p(10, 0)]);
    assert_eq!(state.store().get(b).unwrap(), &untouched);

    let requests: Vec<_> = service
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Transform(req) => Some(req),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].transform, TransformKind::Translation);
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;

    let err = run_transform(
        &mut state,
        &service,
        TransformParams::Rotation { angle: 90.0 },
        TransformBatchPolicy::BestEffort,
    )
    .await
    .unwrap_err();

    assert_eq!(err.as_validation(), Some(&ValidationError::EmptySelection));
    assert_eq!(transform_count(&service), 0);
}

#[tokio::test]
async fn test_invalid_params_send_nothing() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;
    drag_marquee(&mut state, EditorMode::Selection, p(-1, -1), p(1, 1));

    let err = run_transform(
        &mut state,
        &service,
        TransformParams::Scale { sx: 0.0, sy: 2.0 },
        TransformBatchPolicy::BestEffort,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::InvalidTransformParams { .. })
    ));
    assert_eq!(transform_count(&service), 0);
}

async fn three_selected_lines(service: &MockService) -> (EditorState, Vec<u64>) {
    let mut state = EditorState::new(800, 600);
    let mut ids = Vec::new();
    for y in 0..3 {
        ids.push(add_primitive(&mut state, service, DrawAlgorithm::Dda, p(0, y), p(4, y)).await);
    }
    drag_marquee(&mut state, EditorMode::Selection, p(-1, -1), p(5, 3));
    assert_eq!(state.selection().selected_ids(), ids.as_slice());
    (state, ids)
}

#[tokio::test]
async fn test_best_effort_keeps_earlier_updates() {
    let service = MockService::new();
    let (mut state, ids) = three_selected_lines(&service).await;
    let third_before = state.store().get(ids[2]).unwrap().clone();

    let moved = RawParams::line(DrawAlgorithm::Dda, p(10, 0), p(14, 0));
    service.push_transform(Ok(TransformResponse {
        kind: None,
        params: moved,
        pixels: vec![p(10, 0), p(14, 0)],
    }));
    service.push_transform(Err(transport_error("/transform")));

    let err = run_transform(
        &mut state,
        &service,
        TransformParams::Translation { dx: 10, dy: 0 },
        TransformBatchPolicy::BestEffort,
    )
    .await
    .unwrap_err();

    match err {
        Error::BatchAborted {
            completed, total, ..
        } => {
            assert_eq!(completed, 1);
            assert_eq!(total, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transform_count(&service), 2);
    assert_eq!(state.store().get(ids[0]).unwrap().params(), &moved);
    assert_eq!(state.store().get(ids[2]).unwrap(), &third_before);
}

#[tokio::test]
async fn test_atomic_applies_nothing_on_failure() {
    let service = MockService::new();
    let (mut state, _ids) = three_selected_lines(&service).await;
    let before = state.store().objects().to_vec();

    service.push_transform(Ok(TransformResponse {
        kind: None,
        params: RawParams::line(DrawAlgorithm::Dda, p(0, 0), p(0, 4)),
        pixels: vec![p(0, 0)],
    }));
    service.push_transform(Err(transport_error("/transform")));

    let err = run_transform(
        &mut state,
        &service,
        TransformParams::Reflection {
            axis: ReflectionAxis::Origin,
        },
        TransformBatchPolicy::Atomic,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::BatchAborted { completed: 0, .. }));
    assert_eq!(state.store().objects(), before.as_slice());
}

#[tokio::test]
async fn test_atomic_commits_all_on_success() {
    let service = MockService::new();
    let (mut state, ids) = three_selected_lines(&service).await;

    let outcome = run_transform(
        &mut state,
        &service,
        TransformParams::Translation { dx: 0, dy: 7 },
        TransformBatchPolicy::Atomic,
    )
    .await
    .unwrap();

    assert_eq!(outcome.transformed, ids);
    for (y, id) in ids.iter().enumerate() {
        let obj = state.store().get(*id).unwrap();
        let y = y as i32 + 7;
        assert_eq!(obj.params(), &RawParams::line(DrawAlgorithm::Dda, p(0, y), p(4, y)));
        assert_eq!(obj.pixels(), &[p(0, y), p(4, y)]);
    }
}

#[tokio::test]
async fn test_kind_mismatch_aborts() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let id = add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;
    drag_marquee(&mut state, EditorMode::Selection, p(-1, -1), p(1, 1));
    let before = state.store().get(id).unwrap().clone();

    service.push_transform(Ok(TransformResponse {
        kind: None,
        params: RawParams::circle(p(0, 0), 3),
        pixels: vec![p(3, 0)],
    }));

    let err = run_transform(
        &mut state,
        &service,
        TransformParams::Scale { sx: 2.0, sy: 2.0 },
        TransformBatchPolicy::BestEffort,
    )
    .await
    .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(state.store().get(id).unwrap(), &before);
}
