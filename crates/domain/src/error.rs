//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction and parsing,
//! so adapters never have to fall back to String errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., a cuboid with min > max)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for vocabulary enums read from storage or config)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The structure's blocks do not form the shape its archetype requires
    #[error("Invalid shape for {kind}: {reason}")]
    InvalidShape { kind: &'static str, reason: String },
}

impl DomainError {
    /// Creates a validation error for broken invariants.
    ///
    /// # Example
    /// ```ignore
    /// if min.x > max.x {
    ///     return Err(DomainError::validation("cuboid min.x exceeds max.x"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid shape error
    pub fn invalid_shape(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            kind,
            reason: reason.into(),
        }
    }
}
