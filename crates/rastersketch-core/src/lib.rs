//! # RasterSketch Core
//!
//! Core types and utilities for RasterSketch.
//! Provides the geometric data model shared by the scene and the service
//! protocol, the error types, and the scene event bus.

pub mod data;
pub mod error;
pub mod event_bus;

pub use data::{
    CircleParams, ClipAlgorithm, DrawAlgorithm, LineParams, PixelPoint, PrimitiveKind, RawParams,
    ReflectionAxis, Theme, TransformBatchPolicy, TransformKind, TransformParams,
};

pub use error::{Error, Result, ServiceError, ValidationError, WorkflowKind};

pub use event_bus::{
    EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter, SceneEvent,
    SubscriptionId,
};
