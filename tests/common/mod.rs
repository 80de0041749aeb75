//! Shared utilities for integration tests.

use serde_json::Value;
use std::sync::Arc;

use request_interceptor::codec::{encode, Graph};
use request_interceptor::{PatternRegistry, RequestInterceptor, RpcCall};

/// Registry used across the pipeline tests.
pub fn registry() -> Arc<PatternRegistry> {
    let registry = PatternRegistry::new()
        .with_route("orders.get", "/users/:id/orders/:orderId")
        .unwrap()
        .with_route("users.get", "/users/:id")
        .unwrap();
    Arc::new(registry)
}

pub fn interceptor(with_files: bool) -> RequestInterceptor {
    RequestInterceptor::new(registry(), with_files)
}

/// Encode a tree-shaped request as the transport would deliver it.
pub fn encoded(request: &Value) -> Value {
    Value::String(encode(&Graph::from_value(request)))
}

#[allow(dead_code)]
pub fn call(handler: &str, request: &Value) -> RpcCall {
    RpcCall::new(handler, encoded(request))
}
