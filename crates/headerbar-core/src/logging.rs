#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so dependent crates can write `headerbar_core::debug!(...)` without
//! a direct dependency. Without the feature the module is empty and every
//! call site is expected to sit behind `#[cfg(feature = "tracing")]`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, info_span, trace, trace_span, warn, warn_span};

/// Target used for all headerbar spans and events.
pub const TARGET: &str = "headerbar";
