#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and platform detection.
//!
//! # Role in headerbar
//! `headerbar-core` is the input layer. It owns the rectangle type used for
//! header slots and menu anchors, the normalized event types that overflow
//! surfaces consume, and the [`Platform`](platform::Platform) switch that
//! selects which surface a container builds.
//!
//! # How it fits in the system
//! `headerbar-widgets` consumes `headerbar-core::Event` values and turns them
//! into button dispatches. Nothing here knows about buttons, so hosts can feed
//! events from any windowing or touch layer after converting them once.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod platform;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, trace_span, warn, warn_span};
