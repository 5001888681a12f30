//! Marquee selection.
//!
//! [`SelectionEngine`] tracks the marquee drag and the list of selected
//! objects:
//!
//! ```text
//! Idle --press--> Dragging --move--> Dragging --release--> Idle
//! ```
//!
//! The rectangle survives the release so a clip can use it, until the next
//! press, a clip reset or a scene clear.

use rastersketch_core::PixelPoint;

use crate::model::{ObjectId, SelectionRectangle};
use crate::scene_store::SceneStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Marquee drag state and selection list.
///
/// # Selection Model
///
/// - Objects carry a `selected` flag; the engine keeps the ids of the
///   flagged objects in store order (the selection order).
/// - Only a release in selection mode recomputes the flags. Every object
///   with at least one cached pixel inside the rectangle is selected, every
///   other object is deselected.
/// - The id list is always rebuilt from the flags, never edited on its own.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: DragState,
    rect: Option<SelectionRectangle>,
    selected: Vec<ObjectId>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// The current marquee rectangle, if any.
    pub fn rectangle(&self) -> Option<&SelectionRectangle> {
        self.rect.as_ref()
    }

    /// Ids of the selected objects in store order.
    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Starts a drag at `point`, replacing any previous rectangle.
    pub fn press(&mut self, point: PixelPoint) {
        self.state = DragState::Dragging;
        self.rect = Some(SelectionRectangle::new(point, point));
    }

    /// Moves the drag end point.
    ///
    /// Returns `true` when the rectangle changed and the scene should be
    /// redrawn; moves while idle are ignored.
    pub fn drag_to(&mut self, point: PixelPoint) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        match self.rect.as_mut() {
            Some(rect) => {
                rect.x2 = point.x;
                rect.y2 = point.y;
                true
            }
            None => false,
        }
    }

    /// Ends the drag and returns the finished rectangle.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn release(&mut self) -> Option<SelectionRectangle> {
        if self.state != DragState::Dragging {
            return None;
        }
        self.state = DragState::Idle;
        self.rect
    }

    /// Recomputes every object's `selected` flag against `rect`.
    ///
    /// Returns the new selection order.
    pub fn select_in_rect(
        &mut self,
        store: &mut SceneStore,
        rect: &SelectionRectangle,
    ) -> &[ObjectId] {
        for obj in store.iter_mut() {
            obj.selected = obj.touches(rect);
        }
        self.sync_from_store(store)
    }

    /// Rebuilds the selection list from the objects' flags.
    pub fn sync_from_store(&mut self, store: &SceneStore) -> &[ObjectId] {
        self.selected = store.iter().filter(|o| o.selected).map(|o| o.id).collect();
        &self.selected
    }

    /// Drops the rectangle and ends any drag.
    pub fn clear_rectangle(&mut self) {
        self.state = DragState::Idle;
        self.rect = None;
    }

    /// Clears the rectangle and the selection list.
    ///
    /// Object flags are left alone; callers clearing the scene drop the
    /// objects anyway.
    pub fn reset(&mut self) {
        self.clear_rectangle();
        self.selected.clear();
    }
}
