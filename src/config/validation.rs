//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Handler identities are non-empty and unique
//! - Placeholder names are unique within each pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InterceptorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::InterceptorConfig;
use crate::routing::RoutePattern;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routes[{index}]: handler must not be empty")]
    EmptyHandler { index: usize },

    #[error("routes[{index}]: handler {handler:?} is declared more than once")]
    DuplicateHandler { index: usize, handler: String },

    #[error("routes[{index}]: {reason}")]
    InvalidPattern { index: usize, reason: String },
}

pub fn validate_config(config: &InterceptorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.handler.is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        } else if !seen.insert(route.handler.as_str()) {
            errors.push(ValidationError::DuplicateHandler {
                index,
                handler: route.handler.clone(),
            });
        }

        if let Err(e) = RoutePattern::parse(route.pattern.as_str()) {
            errors.push(ValidationError::InvalidPattern {
                index,
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
