use rastersketch_core::{DrawAlgorithm, PixelPoint, PrimitiveKind, RawParams, ValidationError};
use rastersketch_scene::{handle_click, EditorMode, EditorState};
use rastersketch_service::DrawResponse;

use super::add_primitive;
use super::mock_service::{transport_error, Call, MockService};

fn draw_requests(service: &MockService) -> Vec<RawParams> {
    service
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Draw(req) => Some(req.params),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_two_clicks_make_a_line() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);

    // Canvas (410.7, 290.2) floors to (410, 290), cartesian (10, 10)
    let first = handle_click(&mut state, &service, 410.7, 290.2).await.unwrap();
    assert_eq!(first, None);
    assert_eq!(state.pending_clicks(), &[PixelPoint::new(10, 10)]);
    assert_eq!(service.call_count(), 0);

    let id = handle_click(&mut state, &service, 400.0, 300.0)
        .await
        .unwrap()
        .unwrap();
    assert!(state.pending_clicks().is_empty());

    let obj = state.store().get(id).unwrap();
    assert_eq!(obj.kind, PrimitiveKind::Line);
    assert_eq!(
        obj.params(),
        &RawParams::line(DrawAlgorithm::Dda, PixelPoint::new(10, 10), PixelPoint::new(0, 0))
    );
    assert_eq!(obj.pixels().len(), 2);
    assert!(!obj.selected);
}

#[tokio::test]
async fn test_circle_uses_first_click_as_center() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let id = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::BresenhamCircle,
        PixelPoint::new(1, 1),
        PixelPoint::new(4, 5),
    )
    .await;

    let obj = state.store().get(id).unwrap();
    assert_eq!(obj.kind, PrimitiveKind::Circle);
    assert_eq!(obj.params(), &RawParams::circle(PixelPoint::new(1, 1), 5));
}

#[tokio::test]
async fn test_missing_pixels_trigger_one_fallback() {
    let service = MockService::new();
    let returned = RawParams::line(
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(3, 0),
    );
    service.push_draw(Ok(DrawResponse {
        kind: Some(PrimitiveKind::Line),
        params: Some(returned),
        pixels: None,
    }));

    let mut state = EditorState::new(800, 600);
    let id = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(2, 0),
    )
    .await;

    let requests = draw_requests(&service);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1], returned);

    let obj = state.store().get(id).unwrap();
    assert_eq!(obj.params(), &returned);
    assert_eq!(obj.pixels(), &[PixelPoint::new(0, 0), PixelPoint::new(3, 0)]);
}

#[tokio::test]
async fn test_failed_fallback_adds_empty_placeholder() {
    let service = MockService::new();
    service.push_draw(Ok(DrawResponse::default()));
    service.push_draw(Err(transport_error("/draw")));

    let mut state = EditorState::new(800, 600);
    let id = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::BresenhamLine,
        PixelPoint::new(0, 0),
        PixelPoint::new(2, 2),
    )
    .await;

    let obj = state.store().get(id).unwrap();
    assert!(obj.pixels().is_empty());
    assert_eq!(
        obj.params(),
        &RawParams::line(DrawAlgorithm::BresenhamLine, PixelPoint::new(0, 0), PixelPoint::new(2, 2))
    );
}

#[tokio::test]
async fn test_primary_failure_adds_nothing() {
    let service = MockService::new();
    service.push_draw(Err(transport_error("/draw")));
    let mut state = EditorState::new(800, 600);

    handle_click(&mut state, &service, 400.0, 300.0).await.unwrap();
    let err = handle_click(&mut state, &service, 410.0, 300.0)
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert!(state.store().is_empty());
    assert!(state.pending_clicks().is_empty());
    assert_eq!(draw_requests(&service).len(), 1);
}

#[tokio::test]
async fn test_clicks_outside_draw_mode_are_refused() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    state.set_mode(EditorMode::Selection);

    let err = handle_click(&mut state, &service, 400.0, 300.0)
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::WrongMode { .. })
    ));
    assert!(state.pending_clicks().is_empty());
}

#[tokio::test]
async fn test_object_added_event() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let mut events = state.events().receiver();

    let id = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(1, 1),
    )
    .await;

    let mut added = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let rastersketch_core::SceneEvent::ObjectAdded { id } = event {
            added.push(id);
        }
    }
    assert_eq!(added, vec![id]);
}
