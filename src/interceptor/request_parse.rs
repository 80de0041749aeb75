//! Decode-and-enrich orchestration.
//!
//! # Responsibilities
//! - Resolve the handler's route pattern
//! - Decode the payload into a [`ParsedRequest`]
//! - Derive params, headers and files
//! - Hand the enriched call to the next stage
//!
//! # Design Decisions
//! - `params` stays `None` without a pattern; an empty map means "pattern
//!   found, nothing matched"
//! - `headers` is always assigned, even when empty
//! - Stateless per call; the registry is shared read-only

use serde_json::Value;
use std::sync::Arc;

use crate::codec::{self, value_kind, DecodeError};
use crate::config::InterceptorConfig;
use crate::interceptor::{InterceptError, RpcCall};
use crate::observability::metrics;
use crate::request::{files::decode_files, normalize_headers, ParsedRequest};
use crate::routing::{PatternError, PatternRegistry};

/// Parses raw RPC payloads into enriched requests.
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    registry: Arc<PatternRegistry>,
    with_files: bool,
}

impl RequestInterceptor {
    pub fn new(registry: Arc<PatternRegistry>, with_files: bool) -> Self {
        Self {
            registry,
            with_files,
        }
    }

    /// Build the registry from configured routes.
    pub fn from_config(config: &InterceptorConfig) -> Result<Self, PatternError> {
        let registry = PatternRegistry::from_routes(&config.routes)?;
        Ok(Self::new(Arc::new(registry), config.with_files))
    }

    pub fn with_files(&self) -> bool {
        self.with_files
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Decode and enrich the first positional argument of `call`.
    pub fn prepare(&self, call: RpcCall<Value>) -> Result<RpcCall<ParsedRequest>, InterceptError> {
        // 1. Route metadata
        let pattern = self.registry.pattern(&call.handler);

        // 2. Decode phase
        let mut request = match self.decode(&call.data) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(
                    handler = %call.handler,
                    kind = e.kind(),
                    error = %e,
                    "Rejecting request payload"
                );
                metrics::record_rejected(&e);
                return Err(e.into());
            }
        };

        // 3. Path params, only when the handler declares a pattern
        if let Some(pattern) = pattern {
            request.params = Some(pattern.extract(&request.original_url));
        }

        // 4. Headers, unconditionally
        request.headers = normalize_headers(&request.raw_headers);

        // 5. Files
        if self.with_files && request.files.is_none() {
            request.files = Some(Vec::new());
        }

        tracing::debug!(
            handler = %call.handler,
            url = %request.original_url,
            params = request.params.as_ref().map(|p| p.len()),
            headers = request.headers.len(),
            with_files = self.with_files,
            "Request parsed"
        );
        metrics::record_forwarded();

        Ok(call.replace_data(request))
    }

    /// Run [`prepare`](Self::prepare) and pass the result to `next`.
    ///
    /// Whatever `next` returns is handed back unchanged. On failure `next`
    /// is not called.
    pub fn intercept<F, R>(&self, call: RpcCall<Value>, next: F) -> Result<R, InterceptError>
    where
        F: FnOnce(RpcCall<ParsedRequest>) -> R,
    {
        let call = self.prepare(call)?;
        Ok(next(call))
    }

    fn decode(&self, data: &Value) -> Result<ParsedRequest, DecodeError> {
        let raw = match data {
            Value::String(raw) => raw,
            other => {
                return Err(DecodeError::NotAString {
                    found: value_kind(other),
                })
            }
        };

        let graph = codec::decode(raw)?;
        let files = if self.with_files {
            decode_files(&graph)?
        } else {
            None
        };

        let mut request = ParsedRequest::from_graph(graph)?;
        request.files = files;
        Ok(request)
    }
}
