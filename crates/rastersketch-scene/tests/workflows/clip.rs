use rastersketch_core::{
    ClipAlgorithm, DrawAlgorithm, Error, PixelPoint, ValidationError, WorkflowKind,
};
use rastersketch_scene::{run_clip, ClipOutcome, EditorMode, EditorState};
use rastersketch_service::ClipResponse;

use super::mock_service::{transport_error, Call, MockService};
use super::{add_primitive, drag_marquee};

fn p(x: i32, y: i32) -> PixelPoint {
    PixelPoint::new(x, y)
}

fn clip_calls(service: &MockService) -> Vec<rastersketch_service::ClipRequest> {
    service
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Clip(req) => Some(req),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_window_without_objects_sends_nothing() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(20, 20), p(30, 20)).await;
    let before = state.store().objects().to_vec();

    drag_marquee(&mut state, EditorMode::Clip, p(0, 0), p(10, 10));
    let outcome = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::NothingClipped { requested: 0 });
    assert!(clip_calls(&service).is_empty());
    assert_eq!(state.store().objects(), before.as_slice());
    assert!(!state.has_preview());
    assert!(state.snapshot().is_none());
}

#[tokio::test]
async fn test_clip_builds_preview_without_touching_store() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let id = add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(-50, 0), p(5, 0)).await;
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(100, 100), p(120, 100)).await;
    let before = state.store().objects().to_vec();

    drag_marquee(&mut state, EditorMode::Clip, p(-10, -10), p(10, 10));
    let outcome = run_clip(&mut state, &service, ClipAlgorithm::LiangBarsky)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ClipOutcome::Previewed {
            requested: 1,
            clipped: 1
        }
    );
    assert_eq!(state.store().objects(), before.as_slice());
    assert_eq!(state.preview().len(), 1);
    assert_eq!(state.preview()[0].source_id, id);
    assert_eq!(state.preview()[0].pixels, vec![p(-10, -10)]);
    assert_eq!(state.snapshot().unwrap().objects(), before.as_slice());

    let requests = clip_calls(&service);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].algorithm, ClipAlgorithm::LiangBarsky);
    assert_eq!(
        (requests[0].xmin, requests[0].ymin, requests[0].xmax, requests[0].ymax),
        (-10, -10, 10, 10)
    );
}

#[tokio::test]
async fn test_circle_in_window_rejects_whole_batch() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(2, 0)).await;
    add_primitive(&mut state, &service, DrawAlgorithm::BresenhamCircle, p(0, 0), p(3, 0)).await;

    drag_marquee(&mut state, EditorMode::Clip, p(-5, -5), p(5, 5));
    let err = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::CircleClipUnsupported { count: 1 })
    );
    assert!(clip_calls(&service).is_empty());
    assert!(state.snapshot().is_none());
}

#[tokio::test]
async fn test_missing_rectangle() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);

    let err = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::NoSelectionRectangle));
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_degenerate_rectangle() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(0, 5)).await;

    drag_marquee(&mut state, EditorMode::Clip, p(0, 0), p(0, 10));
    let err = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::DegenerateRectangle {
            width: 0,
            height: 10
        })
    );
    assert!(clip_calls(&service).is_empty());
}

#[tokio::test]
async fn test_all_rejected_keeps_state() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(4, 0)).await;
    service.push_clip(Ok(ClipResponse {
        accepted: false,
        pixels: Vec::new(),
        params: None,
    }));

    drag_marquee(&mut state, EditorMode::Clip, p(-2, -2), p(2, 2));
    let outcome = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();

    assert_eq!(outcome, ClipOutcome::NothingClipped { requested: 1 });
    assert!(!state.has_preview());
    assert!(state.snapshot().is_none());
}

#[tokio::test]
async fn test_remote_failure_discards_partial_preview() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(4, 0)).await;
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 1), p(4, 1)).await;
    service.push_clip(Ok(ClipResponse {
        accepted: true,
        pixels: vec![p(0, 0)],
        params: None,
    }));
    service.push_clip(Err(transport_error("/clip")));

    drag_marquee(&mut state, EditorMode::Clip, p(-2, -2), p(2, 2));
    let err = run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap_err();

    match err {
        Error::BatchAborted {
            workflow,
            completed,
            total,
            ..
        } => {
            assert_eq!(workflow, WorkflowKind::Clip);
            assert_eq!(completed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!state.has_preview());
    assert!(state.snapshot().is_none());
    assert!(state.gate().active().is_none());
}

#[tokio::test]
async fn test_reset_restores_pre_clip_scene() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let id = add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;

    drag_marquee(&mut state, EditorMode::Selection, p(-1, -1), p(2, 1));
    assert_eq!(state.selection().selected_ids(), &[id]);
    let before = state.store().objects().to_vec();

    drag_marquee(&mut state, EditorMode::Clip, p(-3, -3), p(3, 3));
    run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();
    assert!(state.has_preview());

    state.reset_clip().unwrap();
    assert_eq!(state.store().objects(), before.as_slice());
    assert_eq!(state.selection().selected_ids(), &[id]);
    assert!(!state.has_preview());
    assert!(state.snapshot().is_none());
    assert!(state.selection().rectangle().is_none());
    assert_eq!(state.mode(), EditorMode::Draw);

    let err = state.reset_clip().unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::NoActivePreview));
}

#[tokio::test]
async fn test_second_clip_replaces_preview() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(0, 0), p(5, 0)).await;
    add_primitive(&mut state, &service, DrawAlgorithm::Dda, p(50, 50), p(55, 50)).await;

    drag_marquee(&mut state, EditorMode::Clip, p(-3, -3), p(3, 3));
    run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();
    let first_source = state.preview()[0].source_id;

    drag_marquee(&mut state, EditorMode::Clip, p(49, 49), p(56, 51));
    run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();

    assert_eq!(state.preview().len(), 1);
    assert_ne!(state.preview()[0].source_id, first_source);
}
