//! Routing metadata subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteConfig[] (handler, pattern)
//!     → registry.rs (validate, compile placeholders)
//!     → Freeze as immutable PatternRegistry
//!
//! Per request:
//!     handler id → registry lookup → Option<RoutePattern>
//!     → pattern.rs (pair placeholders with URL digit runs)
//!     → params map
//! ```

pub mod pattern;
pub mod registry;

pub use pattern::{extract_params, PatternError, RoutePattern};
pub use registry::PatternRegistry;
