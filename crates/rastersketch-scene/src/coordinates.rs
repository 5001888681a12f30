//! Coordinate mapping between cartesian model space and canvas pixel space.
//!
//! Model space has its origin at the canvas center with +Y up. Canvas space
//! has its origin at the top-left corner with +Y down.
//!
//! Formula:
//! ```text
//! canvas_x = cx + x           x = canvas_x - cx
//! canvas_y = cy - y           y = cy - canvas_y
//! ```
//! where `(cx, cy) = (width / 2, height / 2)` using integer division.

use rastersketch_core::PixelPoint;
use serde::{Deserialize, Serialize};

/// Fixed mapping between model space and the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    width: u32,
    height: u32,
    center_x: i32,
    center_y: i32,
}

impl CoordinateSystem {
    /// Creates a coordinate system for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            center_x: (width / 2) as i32,
            center_y: (height / 2) as i32,
        }
    }

    /// Gets the canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas position of the cartesian origin.
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    /// Updates the surface dimensions.
    ///
    /// The center stays where it was computed at construction, so objects
    /// keep their canvas position after a resize.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Converts a cartesian point to canvas pixel coordinates.
    ///
    /// Saturates at the `i32` range; use [`Self::to_canvas_wide`] when the
    /// exact position of a far point matters.
    pub fn to_canvas(&self, p: PixelPoint) -> (i32, i32) {
        (
            self.center_x.saturating_add(p.x),
            self.center_y.saturating_sub(p.y),
        )
    }

    /// Converts a cartesian point to canvas coordinates without loss.
    pub fn to_canvas_wide(&self, p: PixelPoint) -> (i64, i64) {
        (
            i64::from(self.center_x) + i64::from(p.x),
            i64::from(self.center_y) - i64::from(p.y),
        )
    }

    /// Converts canvas pixel coordinates to a cartesian point.
    pub fn to_cartesian(&self, canvas_x: i32, canvas_y: i32) -> PixelPoint {
        PixelPoint::new(
            canvas_x.saturating_sub(self.center_x),
            self.center_y.saturating_sub(canvas_y),
        )
    }

    /// Floors a pointer position and converts it to a cartesian point.
    pub fn pointer_to_cartesian(&self, canvas_x: f64, canvas_y: f64) -> PixelPoint {
        self.to_cartesian(canvas_x.floor() as i32, canvas_y.floor() as i32)
    }

    /// Whether a canvas position lies on the surface.
    pub fn is_on_surface(&self, canvas_x: i64, canvas_y: i64) -> bool {
        canvas_x >= 0
            && canvas_y >= 0
            && canvas_x < i64::from(self.width)
            && canvas_y < i64::from(self.height)
    }

    /// Surface pixel of a cartesian point, or `None` when it falls off the canvas.
    pub fn surface_position(&self, p: PixelPoint) -> Option<(u32, u32)> {
        let (x, y) = self.to_canvas_wide(p);
        if !self.is_on_surface(x, y) {
            return None;
        }
        Some((u32::try_from(x).ok()?, u32::try_from(y).ok()?))
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
