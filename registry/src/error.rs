//! Error types for directive registration and reference linking.

use thiserror::Error;

/// Errors raised while registering copy directives or linking reference
/// types.
///
/// Both variants are fail-fast: nothing is written before the error is
/// returned. Hitting the ancestry depth limit is deliberately *not* an
/// error — propagation completes with the directives collected so far and
/// the condition is reported as a warning on the
/// [`PropagationReport`](crate::PropagationReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    /// Property registration received an opaque key. Copy directives need a
    /// stable textual name to look up the canonical property.
    #[error("copy directives require named property keys (declaring type: {declaring})")]
    InvalidPropertyKind {
        /// Name of the declaring type the registration was for.
        declaring: String,
    },

    /// A reference link names a type that was never declared to the
    /// registry.
    #[error("cannot link reference: {type_name} is not a declared type")]
    InvalidTargetKind {
        /// Name of the undeclared type.
        type_name: String,
    },
}

/// Convenience alias for results with [`RefError`].
pub type Result<T> = std::result::Result<T, RefError>;
