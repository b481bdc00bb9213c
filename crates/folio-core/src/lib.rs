#![forbid(unsafe_code)]

//! Core: canonical input events, hover tracking, animation primitives,
//! geometry, logging, and terminal lifecycle.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod hit;
pub mod hover;
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, warn};
