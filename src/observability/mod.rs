//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! interceptor, registry, CLI produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters through the `metrics` facade)
//!
//! Consumers:
//!     → stderr via tracing-subscriber fmt layer
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (handler, error kind) rather than formatted strings
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
