//! Route patterns and path parameter extraction.
//!
//! # Responsibilities
//! - Find `:name` placeholders in a route pattern
//! - Find digit runs in a URL
//! - Pair them by position
//!
//! # Design Decisions
//! - Pairing is positional: the i-th placeholder takes the i-th digit run
//!   anywhere in the URL, literal segments are ignored
//! - Missing digit runs leave later placeholders unset, never an error
//! - ASCII classes only, so `\w` and `\d` match what the client side matches

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":((?-u:\w)+)").expect("placeholder regex is valid"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit regex is valid"));

/// Errors raised when a pattern or registry entry is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern {pattern:?} declares placeholder :{name} more than once")]
    DuplicatePlaceholder { pattern: String, name: String },

    #[error("handler {0:?} already has a route pattern")]
    DuplicateHandler(String),

    #[error("handler identity must not be empty")]
    EmptyHandler,
}

/// Placeholder names in `pattern`, left to right, without the colon.
pub fn placeholder_names(pattern: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(pattern)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Maximal runs of decimal digits in `url`, left to right.
pub fn digit_runs(url: &str) -> Vec<&str> {
    DIGIT_RUN.find_iter(url).map(|m| m.as_str()).collect()
}

/// Extract path parameters from `url` according to `pattern`.
///
/// Never fails; placeholders without a matching digit run are absent.
pub fn extract_params(url: &str, pattern: &str) -> IndexMap<String, String> {
    pair_positionally(&placeholder_names(pattern), url)
}

fn pair_positionally<S: AsRef<str>>(names: &[S], url: &str) -> IndexMap<String, String> {
    names
        .iter()
        .zip(digit_runs(url))
        .map(|(name, value)| (name.as_ref().to_string(), value.to_string()))
        .collect()
}

/// A validated route pattern with its placeholders precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    names: Vec<String>,
}

impl RoutePattern {
    /// Parse a pattern, rejecting duplicate placeholder names.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let raw = pattern.into();
        let mut names: Vec<String> = Vec::new();

        for name in placeholder_names(&raw) {
            if names.iter().any(|n| n == name) {
                return Err(PatternError::DuplicatePlaceholder {
                    pattern: raw.clone(),
                    name: name.to_string(),
                });
            }
            names.push(name.to_string());
        }

        Ok(Self { raw, names })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn placeholders(&self) -> &[String] {
        &self.names
    }

    /// Same result as [`extract_params`] on the raw pattern.
    pub fn extract(&self, url: &str) -> IndexMap<String, String> {
        pair_positionally(&self.names, url)
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
