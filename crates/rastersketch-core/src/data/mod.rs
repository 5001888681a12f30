//! Data models for RasterSketch
//!
//! Provides the geometric vocabulary shared by the scene and the service
//! protocol: integer cartesian points, primitive kinds, the raw parameters
//! that describe a primitive, and the algorithm/transform selectors the
//! rasterization service understands.
//!
//! Wire names (`serde` renames) follow the rasterization service protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer point in cartesian model space (origin at canvas center, Y up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Kind of scene primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    #[serde(rename = "linha")]
    Line,
    #[serde(rename = "circulo")]
    Circle,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Circle => write!(f, "circle"),
        }
    }
}

/// Rasterization algorithm requested when drawing a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawAlgorithm {
    /// Digital differential analyzer line.
    #[default]
    #[serde(rename = "dda")]
    Dda,
    /// Bresenham line.
    #[serde(rename = "bresenham")]
    BresenhamLine,
    /// Bresenham midpoint circle.
    #[serde(rename = "bresenham_circulo")]
    BresenhamCircle,
}

impl DrawAlgorithm {
    /// The primitive kind this algorithm produces.
    pub fn primitive_kind(self) -> PrimitiveKind {
        match self {
            Self::Dda | Self::BresenhamLine => PrimitiveKind::Line,
            Self::BresenhamCircle => PrimitiveKind::Circle,
        }
    }
}

impl fmt::Display for DrawAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dda => write!(f, "dda"),
            Self::BresenhamLine => write!(f, "bresenham"),
            Self::BresenhamCircle => write!(f, "bresenham_circulo"),
        }
    }
}

/// Line clipping algorithm variant requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipAlgorithm {
    #[default]
    CohenSutherland,
    LiangBarsky,
}

impl fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CohenSutherland => write!(f, "cohen_sutherland"),
            Self::LiangBarsky => write!(f, "liang_barsky"),
        }
    }
}

/// Raw parameters of a line: two endpoints plus the rasterizer that drew it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineParams {
    #[serde(rename = "algoritmo", default)]
    pub algorithm: DrawAlgorithm,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Raw parameters of a circle: center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleParams {
    #[serde(rename = "algoritmo", default = "circle_algorithm")]
    pub algorithm: DrawAlgorithm,
    pub xc: i32,
    pub yc: i32,
    pub r: i32,
}

fn circle_algorithm() -> DrawAlgorithm {
    DrawAlgorithm::BresenhamCircle
}

/// Authoritative geometric description of a primitive in cartesian space.
///
/// The rasterized pixels of a scene object are always derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParams {
    Line(LineParams),
    Circle(CircleParams),
}

impl RawParams {
    /// Line between two points.
    pub fn line(algorithm: DrawAlgorithm, from: PixelPoint, to: PixelPoint) -> Self {
        Self::Line(LineParams {
            algorithm,
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        })
    }

    /// Circle around `center`.
    pub fn circle(center: PixelPoint, radius: i32) -> Self {
        Self::Circle(CircleParams {
            algorithm: DrawAlgorithm::BresenhamCircle,
            xc: center.x,
            yc: center.y,
            r: radius,
        })
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Line(_) => PrimitiveKind::Line,
            Self::Circle(_) => PrimitiveKind::Circle,
        }
    }

    pub fn algorithm(&self) -> DrawAlgorithm {
        match self {
            Self::Line(l) => l.algorithm,
            Self::Circle(c) => c.algorithm,
        }
    }
}

/// Axis used by a reflection transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectionAxis {
    /// Mirror across the horizontal (X) axis: `(x, y) -> (x, -y)`.
    #[serde(rename = "x", alias = "horizontal")]
    Horizontal,
    /// Mirror across the vertical (Y) axis: `(x, y) -> (-x, y)`.
    #[serde(rename = "y", alias = "vertical")]
    Vertical,
    /// Point reflection through the origin.
    #[serde(rename = "xy", alias = "origin")]
    Origin,
}

/// Kind of geometric transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    #[serde(rename = "translacao", alias = "translation")]
    Translation,
    #[serde(rename = "escala", alias = "scale")]
    Scale,
    #[serde(rename = "rotacao", alias = "rotation")]
    Rotation,
    #[serde(rename = "reflexao", alias = "reflection")]
    Reflection,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::Scale => write!(f, "scale"),
            Self::Rotation => write!(f, "rotation"),
            Self::Reflection => write!(f, "reflection"),
        }
    }
}

/// Parameters of a transform, one shape per kind.
///
/// Serialized untagged: the kind travels separately as `transf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformParams {
    Translation { dx: i32, dy: i32 },
    Scale { sx: f64, sy: f64 },
    Rotation {
        #[serde(rename = "angulo", alias = "angle")]
        angle: f64,
    },
    Reflection {
        #[serde(rename = "eixo", alias = "axis")]
        axis: ReflectionAxis,
    },
}

impl TransformParams {
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Translation { .. } => TransformKind::Translation,
            Self::Scale { .. } => TransformKind::Scale,
            Self::Rotation { .. } => TransformKind::Rotation,
            Self::Reflection { .. } => TransformKind::Reflection,
        }
    }

    /// Builds parameters of `kind` from an opaque caller-supplied record.
    ///
    /// The record only has to carry the fields of that kind (`dx`/`dy`,
    /// `sx`/`sy`, `angle`, `axis`); extra fields are ignored.
    pub fn from_record(kind: TransformKind, record: &serde_json::Value) -> crate::Result<Self> {
        #[derive(Deserialize)]
        struct Translation {
            dx: i32,
            dy: i32,
        }
        #[derive(Deserialize)]
        struct Scale {
            sx: f64,
            sy: f64,
        }
        #[derive(Deserialize)]
        struct Rotation {
            #[serde(alias = "angulo")]
            angle: f64,
        }
        #[derive(Deserialize)]
        struct Reflection {
            #[serde(alias = "eixo")]
            axis: ReflectionAxis,
        }

        let invalid = |e: serde_json::Error| crate::ValidationError::InvalidTransformParams {
            reason: format!("{} record: {}", kind, e),
        };

        let params = match kind {
            TransformKind::Translation => {
                let t = Translation::deserialize(record).map_err(invalid)?;
                Self::Translation { dx: t.dx, dy: t.dy }
            }
            TransformKind::Scale => {
                let s = Scale::deserialize(record).map_err(invalid)?;
                Self::Scale { sx: s.sx, sy: s.sy }
            }
            TransformKind::Rotation => {
                let r = Rotation::deserialize(record).map_err(invalid)?;
                Self::Rotation { angle: r.angle }
            }
            TransformKind::Reflection => {
                let r = Reflection::deserialize(record).map_err(invalid)?;
                Self::Reflection { axis: r.axis }
            }
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that real-valued parameters are usable before any request.
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        let reason = match *self {
            Self::Scale { sx, sy } if !sx.is_finite() || !sy.is_finite() => {
                Some(format!("scale factors must be finite, got ({sx}, {sy})"))
            }
            Self::Scale { sx, sy } if sx == 0.0 || sy == 0.0 => {
                Some(format!("scale factors must be non-zero, got ({sx}, {sy})"))
            }
            Self::Rotation { angle } if !angle.is_finite() => {
                Some(format!("rotation angle must be finite, got {angle}"))
            }
            _ => None,
        };
        match reason {
            Some(reason) => Err(crate::ValidationError::InvalidTransformParams { reason }),
            None => Ok(()),
        }
    }
}

/// What happens to earlier results when a request in a transform batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformBatchPolicy {
    /// Each success is committed immediately; a failure stops the rest.
    #[default]
    BestEffort,
    /// Results are committed only if every request succeeds.
    Atomic,
}

impl fmt::Display for TransformBatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best_effort"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// Color palette used when rendering the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}
