//! Interceptor metrics.
//!
//! # Metrics
//! - `interceptor_requests_total` (counter): calls by outcome (forwarded, rejected)
//! - `interceptor_decode_failures_total` (counter): decode failures by kind

use crate::codec::DecodeError;

pub fn record_forwarded() {
    ::metrics::counter!("interceptor_requests_total", "outcome" => "forwarded").increment(1);
}

pub fn record_rejected(error: &DecodeError) {
    ::metrics::counter!("interceptor_requests_total", "outcome" => "rejected").increment(1);
    ::metrics::counter!("interceptor_decode_failures_total", "kind" => error.kind()).increment(1);
}
