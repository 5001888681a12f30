//! # RasterSketch Service
//!
//! Protocol types and client for the remote rasterization service that
//! draws, transforms and clips primitives on behalf of the editor.

pub mod client;
pub mod protocol;

pub use client::{HttpRasterService, HttpServiceConfig, RasterService};
pub use protocol::{
    ClipRequest, ClipResponse, DrawRequest, DrawResponse, TransformRequest, TransformResponse,
};
