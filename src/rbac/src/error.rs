//! Error types for the RBAC decision core

use thiserror::Error;

/// Errors surfaced by the RBAC decision core.
///
/// "Permission not held" is a plain denied decision, never an error.
/// Errors are reserved for policy wiring problems that must not be masked
/// by an implicit deny.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// A scope template references a parameter absent from the supplied
    /// [`ScopeParams`](crate::models::ScopeParams).
    #[error("Failed to resolve scope template '{template}': missing parameter '{param}'")]
    ScopeResolution {
        /// The template that could not be resolved
        template: String,
        /// The placeholder that had no matching parameter
        param: String,
    },

    /// A stored or declared scope uses the wildcard marker in an
    /// unsupported position. Only a single trailing `*` is accepted.
    #[error("Malformed scope pattern '{0}': wildcard is only supported as a trailing marker")]
    MalformedScopePattern(String),

    /// Two registrations under the same role name carry materially
    /// different content. Identical re-registration is a silent no-op.
    #[error("Conflicting registration for role '{0}': content differs from the existing registration")]
    RegistrationConflict(String),

    /// A string does not name one of the built-in role tiers.
    #[error("Unknown built-in role: {0}")]
    UnknownBuiltinRole(String),
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
