//! Scene clear and clip reset.

use rastersketch_core::{Result, SceneEvent, ValidationError};

use super::EditorState;
use crate::model::EditorMode;

impl EditorState {
    /// Drops every object together with selection, marquee, pending clicks,
    /// clip preview and snapshot.
    pub fn clear_scene(&mut self) -> Result<()> {
        self.gate.ensure_idle()?;

        let removed = self.store.len();
        self.store.clear();
        self.selection.reset();
        self.pending_clicks.clear();
        self.preview.clear();
        self.snapshot = None;

        tracing::info!("Scene cleared ({} object(s) removed)", removed);
        self.emit(SceneEvent::SceneCleared);
        self.emit(SceneEvent::RenderRequested);
        Ok(())
    }

    /// Discards the clip preview and restores the scene as it was before the clip.
    ///
    /// Fails with `NoActivePreview` without touching anything when no preview
    /// is shown. Afterwards the marquee is gone, the selection list matches the
    /// restored flags and the editor is back in draw mode.
    pub fn reset_clip(&mut self) -> Result<()> {
        self.gate.ensure_idle()?;
        if self.preview.is_empty() {
            return Err(ValidationError::NoActivePreview.into());
        }

        match self.snapshot.take() {
            Some(snapshot) => {
                tracing::debug!("Restoring {} object(s) from the clip snapshot", snapshot.len());
                self.store.restore(snapshot);
            }
            None => {
                tracing::warn!("Clip preview has no snapshot, keeping the current scene");
            }
        }

        self.preview.clear();
        self.selection.clear_rectangle();
        self.selection.sync_from_store(&self.store);
        self.mode = EditorMode::Draw;

        tracing::info!("Clip preview reset");
        self.emit(SceneEvent::PreviewCleared);
        self.emit_selection();
        self.emit(SceneEvent::RenderRequested);
        Ok(())
    }
}
