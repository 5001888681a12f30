use std::sync::{Arc, Mutex};

use rastersketch_core::{
    ClipAlgorithm, DrawAlgorithm, EventBusConfig, EventCategory, EventFilter, PixelPoint,
    SceneEvent,
};
use rastersketch_scene::{run_clip, EditorConfig, EditorMode, EditorState};

use super::mock_service::MockService;
use super::{add_primitive, drag_marquee};

fn collect(state: &EditorState, categories: Vec<EventCategory>) -> Arc<Mutex<Vec<SceneEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    state
        .events()
        .subscribe(EventFilter::Categories(categories), move |event| {
            sink.lock().unwrap().push(event.clone());
        });
    seen
}

#[tokio::test]
async fn test_selection_drag_publishes_renders_and_one_selection() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let id = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(10, 0),
    )
    .await;
    state.set_mode(EditorMode::Selection);

    let renders = collect(&state, vec![EventCategory::Render]);
    let selections = collect(&state, vec![EventCategory::Selection]);
    drag_marquee(
        &mut state,
        EditorMode::Selection,
        PixelPoint::new(-5, -5),
        PixelPoint::new(20, 5),
    );

    // press, move, release
    assert_eq!(renders.lock().unwrap().len(), 3);
    assert!(renders
        .lock()
        .unwrap()
        .iter()
        .all(|e| *e == SceneEvent::RenderRequested));
    assert_eq!(
        *selections.lock().unwrap(),
        vec![SceneEvent::SelectionChanged { selected: vec![id] }]
    );
}

#[tokio::test]
async fn test_clip_and_reset_event_sequence() {
    let service = MockService::new();
    let mut state = EditorState::with_config(EditorConfig {
        events: EventBusConfig {
            journal_limit: 32,
            ..Default::default()
        },
        ..Default::default()
    });
    add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(10, 0),
    )
    .await;
    drag_marquee(
        &mut state,
        EditorMode::Clip,
        PixelPoint::new(-5, -5),
        PixelPoint::new(20, 5),
    );
    let before_clip = state.events().drain_recent_events();
    assert!(before_clip
        .iter()
        .all(|e| !matches!(e, SceneEvent::SelectionChanged { .. })));

    run_clip(&mut state, &service, ClipAlgorithm::CohenSutherland)
        .await
        .unwrap();
    assert_eq!(
        state.events().drain_recent_events(),
        vec![
            SceneEvent::PreviewUpdated { entries: 1 },
            SceneEvent::RenderRequested
        ]
    );

    state.reset_clip().unwrap();
    assert_eq!(
        state.events().drain_recent_events(),
        vec![
            SceneEvent::PreviewCleared,
            SceneEvent::SelectionChanged { selected: vec![] },
            SceneEvent::RenderRequested
        ]
    );
}

#[tokio::test]
async fn test_scene_subscriber_sees_added_objects_only() {
    let service = MockService::new();
    let mut state = EditorState::new(800, 600);
    let scene = collect(&state, vec![EventCategory::Scene]);

    let first = add_primitive(
        &mut state,
        &service,
        DrawAlgorithm::Dda,
        PixelPoint::new(0, 0),
        PixelPoint::new(1, 1),
    )
    .await;
    state.clear_scene().unwrap();

    assert_eq!(
        *scene.lock().unwrap(),
        vec![SceneEvent::ObjectAdded { id: first }, SceneEvent::SceneCleared]
    );
}
