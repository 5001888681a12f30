//! Scene renderer
//! Projects the scene onto an RGB image using tiny-skia.
//!
//! Draw order:
//! - background fill
//! - axis guides through the cartesian origin
//! - every object's pixels as 1x1 marks (selected objects highlighted)
//! - clip preview pixels as 3x3 accent marks on top
//! - marquee rectangle outline
//! - pending draw clicks as 3x3 marks

use image::{Rgb, RgbImage};
use rastersketch_core::{PixelPoint, Theme};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

use crate::coordinates::CoordinateSystem;
use crate::model::{PreviewEntry, SceneObject, SelectionRectangle};

/// Palette selector for [`render_scene`].
pub type RenderTheme = Theme;

/// Colors used for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub axes: [u8; 3],
    pub object: [u8; 3],
    pub selected: [u8; 3],
    pub preview: [u8; 3],
    pub marquee: [u8; 3],
    pub pending: [u8; 3],
}

impl Palette {
    pub fn for_theme(theme: RenderTheme) -> Self {
        match theme {
            Theme::Light => Self {
                background: [255, 255, 255],
                axes: [210, 210, 210],
                object: [0, 0, 255],
                selected: [255, 0, 0],
                preview: [255, 140, 0],
                marquee: [0, 160, 0],
                pending: [0, 0, 0],
            },
            Theme::Dark => Self {
                background: [30, 30, 30],
                axes: [70, 70, 70],
                object: [100, 160, 255],
                selected: [255, 90, 90],
                preview: [255, 200, 0],
                marquee: [80, 220, 120],
                pending: [240, 240, 240],
            },
        }
    }
}

/// Everything the renderer needs, borrowed from the editor.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub coordinates: CoordinateSystem,
    pub objects: &'a [SceneObject],
    pub preview: &'a [PreviewEntry],
    /// Rectangle outline to draw, if one should be visible.
    pub marquee: Option<SelectionRectangle>,
    pub pending_clicks: &'a [PixelPoint],
    pub theme: RenderTheme,
}

fn color(rgb: [u8; 3]) -> Color {
    Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255)
}

fn solid(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb));
    // Sharp pixel marks
    paint.anti_alias = false;
    paint
}

/// Fills a `w`x`h` block whose top-left corner is at canvas `(x, y)`.
fn fill_block(pixmap: &mut Pixmap, x: i32, y: i32, w: i32, h: i32, paint: &Paint) {
    if let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) {
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}

/// Draws a square mark of side `size` centered on a cartesian point.
///
/// Marks that do not touch the surface are skipped.
fn mark(pixmap: &mut Pixmap, cs: &CoordinateSystem, p: PixelPoint, size: i32, paint: &Paint) {
    if size == 1 {
        if let Some((x, y)) = cs.surface_position(p) {
            fill_block(pixmap, x as i32, y as i32, 1, 1, paint);
        }
        return;
    }
    let half = i64::from(size / 2);
    let (cx, cy) = cs.to_canvas_wide(p);
    let (left, top) = (cx - half, cy - half);
    let reach = i64::from(size);
    if left + reach <= 0
        || top + reach <= 0
        || left >= i64::from(cs.width())
        || top >= i64::from(cs.height())
    {
        return;
    }
    fill_block(pixmap, left as i32, top as i32, size, size, paint);
}

/// Clamps a canvas coordinate to one pixel beyond either edge of `extent`.
fn clamp_to_surface(value: i64, extent: u32) -> i32 {
    value.clamp(-1, i64::from(extent)) as i32
}

/// Render the scene to an image buffer
pub fn render_scene(input: &RenderInput<'_>) -> RgbImage {
    let cs = &input.coordinates;
    let width = cs.width();
    let height = cs.height();
    let palette = Palette::for_theme(input.theme);

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(color(palette.background));

    // Axes through the origin
    let axes = solid(palette.axes);
    let (origin_x, origin_y) = cs.to_canvas_wide(PixelPoint::new(0, 0));
    if origin_y >= 0 && origin_y < i64::from(height) {
        fill_block(&mut pixmap, 0, origin_y as i32, width as i32, 1, &axes);
    }
    if origin_x >= 0 && origin_x < i64::from(width) {
        fill_block(&mut pixmap, origin_x as i32, 0, 1, height as i32, &axes);
    }

    let normal = solid(palette.object);
    let selected = solid(palette.selected);
    for obj in input.objects {
        let paint = if obj.selected { &selected } else { &normal };
        for p in obj.pixels() {
            mark(&mut pixmap, cs, *p, 1, paint);
        }
    }

    let accent = solid(palette.preview);
    for entry in input.preview {
        for p in &entry.pixels {
            mark(&mut pixmap, cs, *p, 3, &accent);
        }
    }

    if let Some(rect) = input.marquee {
        let (xmin, ymin, xmax, ymax) = rect.bounds();
        let (left, top) = cs.to_canvas_wide(PixelPoint::new(xmin, ymax));
        let (right, bottom) = cs.to_canvas_wide(PixelPoint::new(xmax, ymin));
        let left = clamp_to_surface(left, width);
        let top = clamp_to_surface(top, height);
        let right = clamp_to_surface(right, width);
        let bottom = clamp_to_surface(bottom, height);
        let w = right - left + 1;
        let h = bottom - top + 1;
        let outline = solid(palette.marquee);
        fill_block(&mut pixmap, left, top, w, 1, &outline);
        fill_block(&mut pixmap, left, bottom, w, 1, &outline);
        fill_block(&mut pixmap, left, top, 1, h, &outline);
        fill_block(&mut pixmap, right, top, 1, h, &outline);
    }

    let pending = solid(palette.pending);
    for p in input.pending_clicks {
        mark(&mut pixmap, cs, *p, 3, &pending);
    }

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        // Opaque background, alpha ignored
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}
