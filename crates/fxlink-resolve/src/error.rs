//! Resolver error types.

use std::path::{Path, PathBuf};

use fxlink_targets::TargetPlatform;

use crate::layout::ValidationIssue;

/// Why a build request could not be matched to a bundled library.
///
/// All variants describe the environment or the request, never a transient
/// condition: resolving again without changing either fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The bundled runtime folder does not exist.
    #[error("FaceFX: cannot find FaceFX runtime folder '{}'", path.display())]
    RuntimeRootMissing { path: PathBuf },

    /// The layout table has no entry for the platform.
    #[error("FaceFX disabled: unsupported target platform '{platform}'")]
    UnsupportedPlatform { platform: TargetPlatform },

    /// An explicit architecture was requested for a multi-ABI platform.
    #[error(
        "FaceFX disabled: architecture '{architecture}' is not supported on '{platform}' \
         (only the default ABI set can be linked)"
    )]
    UnsupportedArchitecture {
        platform: TargetPlatform,
        architecture: String,
    },

    /// The platform/configuration library folder does not exist.
    #[error("FaceFX: cannot find FaceFX lib folder '{}' for '{platform}'", path.display())]
    LibraryDirectoryMissing {
        platform: TargetPlatform,
        path: PathBuf,
    },
}

impl ResolutionError {
    /// Short stable identifier for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionError::RuntimeRootMissing { .. } => "runtime-root-missing",
            ResolutionError::UnsupportedPlatform { .. } => "unsupported-platform",
            ResolutionError::UnsupportedArchitecture { .. } => "unsupported-architecture",
            ResolutionError::LibraryDirectoryMissing { .. } => "library-directory-missing",
        }
    }

    /// The filesystem path the resolver probed, if the failure came from a probe.
    pub fn attempted_path(&self) -> Option<&Path> {
        match self {
            ResolutionError::RuntimeRootMissing { path }
            | ResolutionError::LibraryDirectoryMissing { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Resolution failures are never retryable.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors loading or constructing a layout table.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading a layout file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Layout file not found.
    #[error("layout file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The table failed validation.
    #[error("invalid layout table: {}", summarize(issues))]
    Invalid { issues: Vec<ValidationIssue> },
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
