//! Payload codec subsystem.
//!
//! # Data Flow
//! ```text
//! encoded string (JSON array = reference table)
//!     → decode.rs (parse table, resolve references)
//!     → Graph (arena of nodes, root = entry 0)
//!
//! Graph
//!     → encode.rs (intern strings and containers)
//!     → encoded string
//! ```
//!
//! # Wire Format
//! ```text
//! [{"a":"1","self":"0"},"hello"]
//!   entry 0: object, "a" references entry 1, "self" references entry 0
//!   entry 1: the string "hello"
//! ```
//!
//! # Design Decisions
//! - Compatible with the `flatted` reference-table format
//! - Inside a container every string is a reference; numbers, booleans and
//!   null stay inline
//! - Entries referenced twice decode to one shared node

pub mod decode;
pub mod encode;
pub mod graph;

pub use decode::decode;
pub use encode::encode;
pub use graph::{Graph, Node, NodeId, MAX_TREE_DEPTH, MAX_TREE_NODES};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while turning an encoded payload into a request graph.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The raw payload was not a string.
    #[error("Request must be a string")]
    NotAString { found: &'static str },

    /// The payload is not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but not a reference table.
    #[error("expected a reference table (JSON array), found {found}")]
    NotATable { found: &'static str },

    /// The reference table has no root entry.
    #[error("reference table is empty")]
    EmptyTable,

    /// A nested string was not a table index.
    #[error("invalid reference {0:?}")]
    InvalidReference(String),

    /// A reference points past the end of the table.
    #[error("reference to missing entry {index} (table has {len} entries)")]
    DanglingReference { index: usize, len: usize },

    /// A tree was requested from a cyclic subgraph.
    #[error("cyclic reference at entry {index}")]
    Cycle { index: usize },

    /// A tree was requested that nests deeper than the limit.
    #[error("value nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// A tree was requested that expands to more nodes than the limit.
    #[error("value expands to more than {limit} nodes")]
    TooLarge { limit: usize },

    /// The decoded value does not have the shape of a request.
    #[error("{0}")]
    Shape(String),
}

impl DecodeError {
    /// True for the raw-payload type violation, which is raised before any
    /// decoding is attempted.
    pub fn is_type_violation(&self) -> bool {
        matches!(self, DecodeError::NotAString { .. })
    }

    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::NotAString { .. } => "not_a_string",
            DecodeError::Json(_) => "json",
            DecodeError::NotATable { .. } => "not_a_table",
            DecodeError::EmptyTable => "empty_table",
            DecodeError::InvalidReference(_) => "invalid_reference",
            DecodeError::DanglingReference { .. } => "dangling_reference",
            DecodeError::Cycle { .. } => "cycle",
            DecodeError::TooDeep { .. } => "too_deep",
            DecodeError::TooLarge { .. } => "too_large",
            DecodeError::Shape(_) => "shape",
        }
    }
}

/// Short type name of a JSON value, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
