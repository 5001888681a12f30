//! # Event Bus Module
//!
//! Publish/subscribe channel the editor uses to announce scene changes:
//! objects added or transformed, selection recomputed, preview updated and
//! redraws needed.
//!
//! ## Usage
//!
//! ```rust
//! use rastersketch_core::event_bus::{EventBus, EventCategory, EventFilter, SceneEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Render]),
//!     |event| println!("redraw: {}", event.description()),
//! );
//!
//! bus.publish(SceneEvent::RenderRequested).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
