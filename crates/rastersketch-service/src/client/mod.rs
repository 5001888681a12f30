//! Rasterization service client interface
//!
//! Defines the [`RasterService`] trait the editor workflows talk to, plus the
//! HTTP implementation used against a real service.

mod http;

pub use http::{HttpRasterService, HttpServiceConfig};

use crate::protocol::{
    ClipRequest, ClipResponse, DrawRequest, DrawResponse, TransformRequest, TransformResponse,
};
use async_trait::async_trait;
use rastersketch_core::ServiceError;

/// Remote computation service that rasterizes, transforms and clips primitives.
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait]
pub trait RasterService: Send + Sync {
    /// Rasterize a primitive with the algorithm recorded in its params.
    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, ServiceError>;

    /// Apply a transform to a primitive and rasterize the result.
    async fn transform(&self, request: &TransformRequest)
        -> Result<TransformResponse, ServiceError>;

    /// Clip a primitive against a rectangular window.
    async fn clip(&self, request: &ClipRequest) -> Result<ClipResponse, ServiceError>;
}

#[async_trait]
impl<S: RasterService + ?Sized> RasterService for std::sync::Arc<S> {
    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, ServiceError> {
        (**self).draw(request).await
    }

    async fn transform(
        &self,
        request: &TransformRequest,
    ) -> Result<TransformResponse, ServiceError> {
        (**self).transform(request).await
    }

    async fn clip(&self, request: &ClipRequest) -> Result<ClipResponse, ServiceError> {
        (**self).clip(request).await
    }
}
