//! Common error infrastructure for facts-core.
//!
//! This module provides the shared types and traits used across all error
//! types in the crate. Domain-specific errors (e.g. `ParseError`,
//! `DuplicateFactError`) are defined in their respective modules alongside
//! the operations they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation has its own error type with specific variants
//! - **Rich Context**: Errors carry the fact name, object, and offending text
//! - **Severity Classification**: Errors are categorized for propagation policy

/// Severity level of an error, used for categorization and propagation policy.
///
/// The load pipeline distinguishes errors by how they are handled:
/// - **Validation**: bad data in one entry; reported and skipped, the load continues
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: a broken schema or definition; aborts the phase that hit it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input for one entry, should not retry without changes.
    ///
    /// Examples: empty value, text not legal for the declared format
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - schema is broken, loading cannot continue.
    ///
    /// Examples: duplicate fact registration, invalid fact definition
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the surrounding load pass may continue past this error.
    pub const fn is_per_entry(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Returns true if this error indicates an internal bug or broken schema.
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all facts-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by propagation policy, not impact
pub trait FactError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    ///
    /// This is used to decide between per-entry accumulation and aborting.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Validation.is_per_entry());
        assert!(!ErrorSeverity::Fatal.is_per_entry());
        assert!(ErrorSeverity::Fatal.is_abort());
        assert!(ErrorSeverity::Internal.is_abort());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
