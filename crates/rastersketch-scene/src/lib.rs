//! # RasterSketch Scene
//!
//! Client-side scene model and workflow orchestration for RasterSketch.
//!
//! The editor keeps a scene of lines and circles whose pixels come from a
//! remote rasterization service. This crate owns everything around those
//! pixels:
//!
//! - [`CoordinateSystem`]: cartesian model space vs. canvas pixel space
//! - [`SceneStore`]: ordered objects with monotonic ids and snapshots
//! - [`SelectionEngine`]: marquee drag and selection flags
//! - [`clip`]: clip preview over the marquee rectangle
//! - [`transform`]: transforms of the selected objects
//! - [`draw`]: two-click primitive creation
//! - [`renderer`]: RGB image of the scene
//! - [`EditorState`]: the state all of the above operate on
//! - [`WorkflowGate`]: one workflow at a time

pub mod clip;
pub mod coordinates;
pub mod draw;
pub mod editor_state;
pub mod gate;
pub mod model;
pub mod renderer;
pub mod scene_store;
pub mod selection;
pub mod transform;

pub use clip::{run_clip, ClipOutcome};
pub use coordinates::CoordinateSystem;
pub use draw::handle_click;
pub use editor_state::{EditorConfig, EditorState};
pub use gate::{WorkflowGate, WorkflowTicket};
pub use model::{
    EditorMode, NewObject, ObjectId, PreviewEntry, SceneObject, SelectionRectangle,
};
pub use renderer::{render_scene, Palette, RenderInput, RenderTheme};
pub use scene_store::{SceneSnapshot, SceneStore};
pub use selection::SelectionEngine;
pub use transform::{run_transform, TransformBatchPolicy, TransformOutcome};
