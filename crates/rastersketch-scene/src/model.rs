use rastersketch_core::{PixelPoint, PrimitiveKind, RawParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a scene object, unique within a session.
pub type ObjectId = u64;

/// A primitive on the canvas: authoritative raw params plus the pixels the
/// service rasterized for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: PrimitiveKind,
    params: RawParams,
    pixels: Vec<PixelPoint>,
    pub selected: bool,
}

impl SceneObject {
    pub(crate) fn new(id: ObjectId, object: NewObject) -> Self {
        Self {
            id,
            kind: object.kind,
            params: object.params,
            pixels: object.pixels.unwrap_or_default(),
            selected: false,
        }
    }

    pub fn params(&self) -> &RawParams {
        &self.params
    }

    pub fn pixels(&self) -> &[PixelPoint] {
        &self.pixels
    }

    /// Replaces raw params and pixels in one step.
    pub fn replace_geometry(&mut self, params: RawParams, pixels: Vec<PixelPoint>) {
        self.kind = params.kind();
        self.params = params;
        self.pixels = pixels;
    }

    /// Whether any cached pixel lies inside `rect`.
    pub fn touches(&self, rect: &SelectionRectangle) -> bool {
        self.pixels.iter().any(|p| rect.contains(*p))
    }
}

/// Input for [`SceneStore::add`](crate::SceneStore::add).
#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    pub kind: PrimitiveKind,
    pub params: RawParams,
    /// `None` when the service returned no pixels.
    pub pixels: Option<Vec<PixelPoint>>,
}

impl NewObject {
    pub fn new(params: RawParams, pixels: Vec<PixelPoint>) -> Self {
        Self {
            kind: params.kind(),
            params,
            pixels: Some(pixels),
        }
    }
}

/// Marquee rectangle in cartesian coordinates, as dragged (not normalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRectangle {
    pub fn new(start: PixelPoint, end: PixelPoint) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        }
    }

    /// Normalized bounds `(xmin, ymin, xmax, ymax)`.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    /// Horizontal extent, saturating at `i32::MAX`.
    pub fn width(&self) -> i32 {
        i32::try_from(self.x2.abs_diff(self.x1)).unwrap_or(i32::MAX)
    }

    /// Vertical extent, saturating at `i32::MAX`.
    pub fn height(&self) -> i32 {
        i32::try_from(self.y2.abs_diff(self.y1)).unwrap_or(i32::MAX)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: PixelPoint) -> bool {
        let (xmin, ymin, xmax, ymax) = self.bounds();
        p.x >= xmin && p.x <= xmax && p.y >= ymin && p.y <= ymax
    }
}

impl fmt::Display for SelectionRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (xmin, ymin, xmax, ymax) = self.bounds();
        write!(f, "[{}, {}]-[{}, {}]", xmin, ymin, xmax, ymax)
    }
}

/// Clip result for one source object, drawn on top of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub source_id: ObjectId,
    pub kind: PrimitiveKind,
    pub params: RawParams,
    pub pixels: Vec<PixelPoint>,
}

/// What pointer gestures do on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Clicks place primitive endpoints.
    #[default]
    Draw,
    /// Drags select objects.
    Selection,
    /// Drags define the clip window.
    Clip,
}

impl EditorMode {
    /// Whether a press starts a marquee drag in this mode.
    pub fn drags_marquee(self) -> bool {
        matches!(self, Self::Selection | Self::Clip)
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "draw"),
            Self::Selection => write!(f, "selection"),
            Self::Clip => write!(f, "clip"),
        }
    }
}
