//! Positional call envelope passed through the pipeline.

use serde_json::Value;

/// One invocation of a message handler.
///
/// `data` is the first positional argument. The interceptor swaps it for the
/// parsed request and leaves `handler` and `args` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall<D = Value> {
    /// Identity of the target handler, used for route metadata lookup.
    pub handler: String,
    pub data: D,
    /// Remaining positional arguments (transport context and so on).
    pub args: Vec<Value>,
}

impl<D> RpcCall<D> {
    pub fn new(handler: impl Into<String>, data: D) -> Self {
        Self {
            handler: handler.into(),
            data,
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Replace the first positional argument.
    pub fn replace_data<E>(self, data: E) -> RpcCall<E> {
        RpcCall {
            handler: self.handler,
            data,
            args: self.args,
        }
    }
}
