//! Request interceptor for a message-based microservice pipeline.
//!
//! Decodes reference-table payloads (cyclic graphs allowed), extracts path
//! parameters from a handler's route pattern, normalizes raw headers and
//! forwards the enriched request to the next stage.

pub mod codec;
pub mod config;
pub mod interceptor;
pub mod observability;
pub mod request;
pub mod routing;

pub use config::InterceptorConfig;
pub use interceptor::{InterceptError, RequestInterceptor, RequestParseLayer, RpcCall};
pub use request::ParsedRequest;
pub use routing::{PatternRegistry, RoutePattern};
