use thiserror::Error;

use crate::codec::DecodeError;

/// Failure that aborts an intercepted call.
#[derive(Debug, Error)]
pub enum InterceptError {
    /// Any failure while turning the raw payload into a request, including
    /// a payload that is not a string.
    #[error("Error parsing request JSON: {0}")]
    Decode(#[from] DecodeError),
}

impl InterceptError {
    pub fn decode_error(&self) -> &DecodeError {
        match self {
            InterceptError::Decode(e) => e,
        }
    }

    /// True when the payload was rejected before decoding because it was
    /// not a string.
    pub fn is_type_violation(&self) -> bool {
        self.decode_error().is_type_violation()
    }
}
