//! Common error infrastructure for fight-core.
//!
//! This module provides shared types and traits used across all error types in
//! fight-core. Domain-specific errors (`ConfigError`, `MatchError`,
//! `MoveError`) are defined next to the code that produces them.
//!
//! The simulation itself never fails at runtime: numeric state is clamped and
//! simultaneous knockouts or timeouts are outcomes, not errors. Errors only
//! appear at the boundaries: building a match from a config, issuing a flow
//! command in the wrong phase, or resolving a move name supplied from outside.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller can retry once the situation changes.
    ///
    /// Examples: `advance_round` while the round is still being fought
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: rounds to win set to zero, unknown move name
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all fight-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
