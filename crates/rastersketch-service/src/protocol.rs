//! Wire protocol of the rasterization service
//!
//! Three JSON request/response exchanges:
//!
//! ```text
//! POST /draw       {algoritmo, x1,y1,x2,y2 | xc,yc,r}          -> {tipo, dados, pixels}
//! POST /transform  {tipo, dados, transf, params}                -> {tipo, dados, pixels}
//! POST /clip       {tipo, dados, algoritmo, xmin,ymin,xmax,ymax} -> {aceita, pixels, dados}
//! ```
//!
//! Pixels are integer cartesian points `{x, y}`.

use rastersketch_core::{
    ClipAlgorithm, PixelPoint, PrimitiveKind, RawParams, TransformKind, TransformParams,
};
use serde::{Deserialize, Serialize};

pub const DRAW_ENDPOINT: &str = "/draw";
pub const TRANSFORM_ENDPOINT: &str = "/transform";
pub const CLIP_ENDPOINT: &str = "/clip";

/// Request body for `/draw`: the raw params of the primitive, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawRequest {
    pub params: RawParams,
}

impl DrawRequest {
    pub fn new(params: RawParams) -> Self {
        Self { params }
    }

    /// Kind of primitive being requested.
    pub fn kind(&self) -> PrimitiveKind {
        self.params.kind()
    }
}

/// Response body of `/draw`. Every field may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawResponse {
    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveKind>,
    #[serde(rename = "dados", default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RawParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<PixelPoint>>,
}

/// Request body for `/transform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    #[serde(rename = "tipo")]
    pub kind: PrimitiveKind,
    #[serde(rename = "dados")]
    pub params: RawParams,
    #[serde(rename = "transf")]
    pub transform: TransformKind,
    #[serde(rename = "params")]
    pub transform_params: TransformParams,
}

impl TransformRequest {
    pub fn new(params: RawParams, transform_params: TransformParams) -> Self {
        Self {
            kind: params.kind(),
            params,
            transform: transform_params.kind(),
            transform_params,
        }
    }
}

/// Response body of `/transform`: the new raw params and their pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformResponse {
    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveKind>,
    #[serde(rename = "dados")]
    pub params: RawParams,
    pub pixels: Vec<PixelPoint>,
}

/// Request body for `/clip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRequest {
    #[serde(rename = "tipo")]
    pub kind: PrimitiveKind,
    #[serde(rename = "dados")]
    pub params: RawParams,
    #[serde(rename = "algoritmo")]
    pub algorithm: ClipAlgorithm,
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

/// Response body of `/clip`.
///
/// `pixels` is only meaningful when `accepted` is true.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipResponse {
    #[serde(rename = "aceita")]
    pub accepted: bool,
    #[serde(default)]
    pub pixels: Vec<PixelPoint>,
    #[serde(rename = "dados", default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RawParams>,
}

impl ClipResponse {
    /// Accepted with at least one pixel.
    pub fn has_result(&self) -> bool {
        self.accepted && !self.pixels.is_empty()
    }
}
