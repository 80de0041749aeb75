//! tower integration.
//!
//! Wraps any `Service<RpcCall<ParsedRequest>>` so it can be fed raw calls.

use futures_util::future::{self, BoxFuture, FutureExt, TryFutureExt};
use serde_json::Value;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};

use crate::interceptor::{RequestInterceptor, RpcCall};
use crate::request::ParsedRequest;

/// Layer that parses raw calls before they reach the inner service.
#[derive(Debug, Clone)]
pub struct RequestParseLayer {
    interceptor: RequestInterceptor,
}

impl RequestParseLayer {
    pub fn new(interceptor: RequestInterceptor) -> Self {
        Self { interceptor }
    }
}

impl<S> Layer<S> for RequestParseLayer {
    type Service = RequestParseService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestParseService {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

/// Service produced by [`RequestParseLayer`].
#[derive(Debug, Clone)]
pub struct RequestParseService<S> {
    inner: S,
    interceptor: RequestInterceptor,
}

impl<S> Service<RpcCall<Value>> for RequestParseService<S>
where
    S: Service<RpcCall<ParsedRequest>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<S::Response, BoxError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, call: RpcCall<Value>) -> Self::Future {
        match self.interceptor.prepare(call) {
            Ok(call) => self.inner.call(call).err_into().boxed(),
            Err(e) => future::ready(Err(e.into())).boxed(),
        }
    }
}
