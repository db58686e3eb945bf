//! Module rules error types.

use fxlink_resolve::ResolutionError;

/// Errors that can occur while planning the integration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The runtime library could not be resolved under the strict policy.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Unknown failure policy name.
    #[error("unknown failure policy: '{name}' (expected strict or permissive)")]
    UnknownPolicy { name: String },
}

/// Result type alias for module rules operations.
pub type Result<T> = std::result::Result<T, RulesError>;
