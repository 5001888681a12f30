//! Mode switching and pointer gestures.

use rastersketch_core::SceneEvent;

use super::EditorState;
use crate::model::EditorMode;

impl EditorState {
    /// Switches the editor mode.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.emit(SceneEvent::RenderRequested);
    }

    /// Pointer pressed at canvas `(x, y)`.
    ///
    /// Starts a marquee drag in selection or clip mode and returns whether
    /// one started. Draw mode clicks go through
    /// [`draw::handle_click`](crate::draw::handle_click) instead.
    pub fn pointer_down(&mut self, canvas_x: f64, canvas_y: f64) -> bool {
        if !self.mode.drags_marquee() {
            return false;
        }
        let point = self.coordinates.pointer_to_cartesian(canvas_x, canvas_y);
        self.selection.press(point);
        self.emit(SceneEvent::RenderRequested);
        true
    }

    /// Pointer moved to canvas `(x, y)`.
    ///
    /// Returns `true` when the marquee changed and a redraw was requested.
    pub fn pointer_move(&mut self, canvas_x: f64, canvas_y: f64) -> bool {
        if !self.mode.drags_marquee() {
            return false;
        }
        let point = self.coordinates.pointer_to_cartesian(canvas_x, canvas_y);
        let changed = self.selection.drag_to(point);
        if changed {
            self.emit(SceneEvent::RenderRequested);
        }
        changed
    }

    /// Pointer released.
    ///
    /// In selection mode the finished rectangle recomputes every object's
    /// selection flag. In clip mode the rectangle is only kept for the next
    /// clip. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        if !self.mode.drags_marquee() {
            return false;
        }
        let Some(rect) = self.selection.release() else {
            return false;
        };

        if self.mode == EditorMode::Selection {
            let count = self.selection.select_in_rect(&mut self.store, &rect).len();
            tracing::debug!("Marquee {} selected {} object(s)", rect, count);
            self.emit_selection();
        }
        self.emit(SceneEvent::RenderRequested);
        true
    }
}
