//! Editor state threaded through every workflow.
//!
//! This module is split into submodules:
//! - `gestures`: mode switching and pointer press/move/release
//! - `lifecycle`: scene clear and clip reset

mod gestures;
mod lifecycle;

use image::RgbImage;
use rastersketch_core::{
    DrawAlgorithm, EventBus, EventBusConfig, PixelPoint, SceneEvent, Theme,
};

use crate::coordinates::CoordinateSystem;
use crate::gate::WorkflowGate;
use crate::model::{EditorMode, PreviewEntry, SelectionRectangle};
use crate::renderer::{render_scene, RenderInput};
use crate::scene_store::{SceneSnapshot, SceneStore};
use crate::selection::SelectionEngine;

/// Settings used to build an [`EditorState`].
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    pub draw_algorithm: DrawAlgorithm,
    pub events: EventBusConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            draw_algorithm: DrawAlgorithm::default(),
            events: EventBusConfig::default(),
        }
    }
}

/// Owned editor state: scene, selection, clip preview, mode and pending clicks.
pub struct EditorState {
    pub(crate) store: SceneStore,
    pub(crate) selection: SelectionEngine,
    pub(crate) preview: Vec<PreviewEntry>,
    pub(crate) snapshot: Option<SceneSnapshot>,
    pub(crate) mode: EditorMode,
    pub(crate) pending_clicks: Vec<PixelPoint>,
    pub(crate) coordinates: CoordinateSystem,
    pub(crate) draw_algorithm: DrawAlgorithm,
    events: EventBus,
    pub(crate) gate: WorkflowGate,
}

impl EditorState {
    /// Creates an empty editor for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(EditorConfig {
            width,
            height,
            ..EditorConfig::default()
        })
    }

    pub fn with_config(config: EditorConfig) -> Self {
        tracing::debug!("Editor created for a {}x{} canvas", config.width, config.height);
        Self {
            store: SceneStore::new(),
            selection: SelectionEngine::new(),
            preview: Vec::new(),
            snapshot: None,
            mode: EditorMode::default(),
            pending_clicks: Vec::new(),
            coordinates: CoordinateSystem::new(config.width, config.height),
            draw_algorithm: config.draw_algorithm,
            events: EventBus::with_config(config.events),
            gate: WorkflowGate::new(),
        }
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    /// Active clip preview entries; empty when no preview is shown.
    pub fn preview(&self) -> &[PreviewEntry] {
        &self.preview
    }

    pub fn has_preview(&self) -> bool {
        !self.preview.is_empty()
    }

    /// Store copy taken before the active clip preview.
    pub fn snapshot(&self) -> Option<&SceneSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Cartesian points of draw clicks not yet turned into an object.
    pub fn pending_clicks(&self) -> &[PixelPoint] {
        &self.pending_clicks
    }

    pub fn coordinates(&self) -> &CoordinateSystem {
        &self.coordinates
    }

    pub fn draw_algorithm(&self) -> DrawAlgorithm {
        self.draw_algorithm
    }

    /// Sets the algorithm used for the next primitive.
    pub fn set_draw_algorithm(&mut self, algorithm: DrawAlgorithm) {
        tracing::debug!("Draw algorithm set to {}", algorithm);
        self.draw_algorithm = algorithm;
    }

    /// Resizes the surface. The cartesian origin stays where it was.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.coordinates.set_canvas_size(width, height);
        self.emit(SceneEvent::RenderRequested);
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn gate(&self) -> &WorkflowGate {
        &self.gate
    }

    /// Rectangle shown on screen: while dragging, or the finished clip window.
    pub fn visible_marquee(&self) -> Option<SelectionRectangle> {
        let rect = self.selection.rectangle().copied()?;
        if self.selection.is_dragging() || self.mode == EditorMode::Clip {
            Some(rect)
        } else {
            None
        }
    }

    /// Renders the whole scene with the given theme.
    pub fn render(&self, theme: Theme) -> RgbImage {
        render_scene(&RenderInput {
            coordinates: self.coordinates,
            objects: self.store.objects(),
            preview: &self.preview,
            marquee: self.visible_marquee(),
            pending_clicks: &self.pending_clicks,
            theme,
        })
    }

    /// Publishes a scene event. Nobody listening is fine.
    pub(crate) fn emit(&self, event: SceneEvent) {
        if self.events.publish(event).is_err() {
            tracing::trace!("Scene event dropped, no subscribers");
        }
    }

    pub(crate) fn emit_selection(&self) {
        self.emit(SceneEvent::SelectionChanged {
            selected: self.selection.selected_ids().to_vec(),
        });
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("mode", &self.mode)
            .field("objects", &self.store.len())
            .field("selected", &self.selection.selected_ids())
            .field("preview", &self.preview.len())
            .field("snapshot", &self.snapshot.is_some())
            .field("pending_clicks", &self.pending_clicks)
            .finish()
    }
}
