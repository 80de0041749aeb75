//! Request model and normalization.
//!
//! # Responsibilities
//! - Read `originalUrl`, `rawHeaders` and `files` from a decoded graph
//! - Turn raw header pairs into a lower-cased lookup map
//! - Hold the enriched request handed to the next stage
//!
//! # Design Decisions
//! - The decoded graph is kept whole next to the typed fields, so handlers
//!   can still reach the rest of the payload
//! - Normalization never fails; malformed header lists degrade to empty

pub mod files;
pub mod headers;
mod parsed;

pub use files::{FileBuffer, FileData, FileRecord};
pub use headers::normalize_headers;
pub use parsed::ParsedRequest;
