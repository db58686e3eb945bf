//! Prebuilt FaceFX runtime library resolution.
//!
//! Given a [`TargetDescriptor`](fxlink_targets::TargetDescriptor), the
//! [`ArtifactResolver`] finds the bundled static library to link, or fails
//! with a [`ResolutionError`] naming the path it tried.
//!
//! # Layout
//!
//! The bundled runtime is expected at `<module>/<runtime-folder>` with
//! libraries under `bin/<platform-subpath>/<configuration-subpath>/`. The
//! platform subpaths come from a [`LayoutTable`]; the builtin table matches
//! the trees shipped with the FaceFX runtime.

pub mod advisory;
pub mod artifact;
pub mod buckets;
pub mod error;
pub mod layout;
pub mod probe;
pub mod resolver;

// Re-exports for convenience.
pub use advisory::{process_advisory, DebugAdvisory};
pub use artifact::{AbiArtifact, ArtifactBinaries, ResolvedArtifact};
pub use buckets::{ToolchainBuckets, ToolchainStep};
pub use error::{LayoutError, ResolutionError, Result};
pub use layout::{
    layout_to_toml, load_layout_toml, parse_layout_toml, validate_layout, ArchitectureRule,
    ConfigurationDirs, LayoutDefinition, LayoutTable, LibraryKind, LibraryReference, PlatformLayout,
    ValidationIssue,
};
pub use probe::{DirectoryProbe, FsProbe};
pub use resolver::{ArtifactResolver, ResolverSettings, DEFAULT_RUNTIME_FOLDER};
