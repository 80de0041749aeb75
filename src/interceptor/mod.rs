//! Request interceptor subsystem.
//!
//! # Data Flow
//! ```text
//! RpcCall<Value> (handler id, raw payload, remaining args)
//!     → request_parse.rs: registry lookup (Option<RoutePattern>)
//!     → request_parse.rs: require string payload, decode, read request fields
//!     → params (only with a pattern), headers (always), files (file mode)
//!     → RpcCall<ParsedRequest>
//!     → continuation (intercept) or inner tower Service (layer.rs)
//! ```
//!
//! # Design Decisions
//! - All enrichment happens before control is handed on
//! - The downstream result is forwarded untouched: no inspection, no retry
//! - Any decode-phase failure aborts the call with one error shape

pub mod call;
pub mod error;
mod request_parse;
pub mod layer;

pub use call::RpcCall;
pub use error::InterceptError;
pub use request_parse::RequestInterceptor;
pub use layer::{RequestParseLayer, RequestParseService};
