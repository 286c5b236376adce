#![forbid(unsafe_code)]

//! Core: geometric primitives and logging shared by the stagger crates.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
