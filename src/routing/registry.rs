//! Handler → route pattern lookup.
//!
//! # Responsibilities
//! - Store the route pattern declared for each handler
//! - Answer "which pattern belongs to this handler" per request
//!
//! # Design Decisions
//! - Built once at startup, immutable at runtime (shared via Arc)
//! - A handler without a pattern is a valid state, not an error
//! - O(1) lookup via HashMap

use std::collections::HashMap;

use crate::config::RouteConfig;
use crate::routing::pattern::{PatternError, RoutePattern};

/// Statically registered route patterns, keyed by handler identity.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: HashMap<String, RoutePattern>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured routes.
    pub fn from_routes(routes: &[RouteConfig]) -> Result<Self, PatternError> {
        let mut registry = Self::new();
        for route in routes {
            registry.register(&route.handler, &route.pattern)?;
        }
        Ok(registry)
    }

    /// Declare the route pattern of `handler`.
    pub fn register(&mut self, handler: &str, pattern: &str) -> Result<(), PatternError> {
        if handler.is_empty() {
            return Err(PatternError::EmptyHandler);
        }
        if self.patterns.contains_key(handler) {
            return Err(PatternError::DuplicateHandler(handler.to_string()));
        }

        let pattern = RoutePattern::parse(pattern)?;
        tracing::debug!(handler = %handler, pattern = %pattern, "Route pattern registered");
        self.patterns.insert(handler.to_string(), pattern);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_route(mut self, handler: &str, pattern: &str) -> Result<Self, PatternError> {
        self.register(handler, pattern)?;
        Ok(self)
    }

    /// Pattern declared for `handler`. An empty pattern counts as none.
    pub fn pattern(&self, handler: &str) -> Option<&RoutePattern> {
        self.patterns
            .get(handler)
            .filter(|pattern| !pattern.as_str().is_empty())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
