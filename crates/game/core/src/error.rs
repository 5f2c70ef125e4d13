//! Common error infrastructure for crawler-core.
//!
//! Domain-specific errors (`ActionError`, `OracleError`) live beside the code
//! that produces them and implement [`GameError`] so callers can classify them
//! uniformly.
//!
//! No error in this crate is fatal to the simulation: a failed action is a
//! non-event that leaves state untouched.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - a simpler fallback action may succeed.
    ///
    /// Examples: target out of range, not enough stamina
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown ability key, dead target
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: dangling entity id, missing collaborator
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller is expected to fall back to another action.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all crawler-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
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
