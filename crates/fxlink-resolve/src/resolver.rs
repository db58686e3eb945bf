//! The artifact resolver.
//!
//! Checks run in a fixed order and stop at the first failure:
//! runtime root, platform entry, architecture rule, configuration folder,
//! library folder (and every ABI folder on multi-ABI platforms).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fxlink_targets::TargetDescriptor;

use crate::advisory::{process_advisory, DebugAdvisory};
use crate::artifact::{AbiArtifact, ArtifactBinaries, ResolvedArtifact};
use crate::error::ResolutionError;
use crate::layout::{ArchitectureRule, LayoutTable};
use crate::probe::{DirectoryProbe, FsProbe};

/// Runtime folder of the bundled FaceFX runtime, relative to the module
/// directory. Changes whenever the bundled runtime is upgraded.
pub const DEFAULT_RUNTIME_FOLDER: &str = "facefx-runtime-1.1.1/facefx";

/// Process-wide resolver settings supplied by the host build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Runtime folder relative to the module directory.
    pub runtime_folder: PathBuf,
    /// Link debug runtime libraries for debug builds. Off by default: debug
    /// builds link the release runtime unless the host opts in.
    pub debug_builds_use_debug_artifacts: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            runtime_folder: PathBuf::from(DEFAULT_RUNTIME_FOLDER),
            debug_builds_use_debug_artifacts: false,
        }
    }
}

/// Resolves target descriptors to bundled FaceFX libraries.
pub struct ArtifactResolver<P = FsProbe> {
    module_dir: PathBuf,
    settings: ResolverSettings,
    layout: LayoutTable,
    advisory: Arc<DebugAdvisory>,
    probe: P,
}

impl ArtifactResolver<FsProbe> {
    /// A resolver over the real filesystem with the builtin layout.
    pub fn new(module_dir: impl Into<PathBuf>, settings: ResolverSettings) -> Self {
        Self {
            module_dir: module_dir.into(),
            settings,
            layout: LayoutTable::builtin(),
            advisory: process_advisory(),
            probe: FsProbe,
        }
    }
}

impl<P: DirectoryProbe> ArtifactResolver<P> {
    pub fn with_layout(mut self, layout: LayoutTable) -> Self {
        self.layout = layout;
        self
    }

    /// Use `advisory` instead of the process-wide advisory flag.
    pub fn with_advisory(mut self, advisory: Arc<DebugAdvisory>) -> Self {
        self.advisory = advisory;
        self
    }

    pub fn with_probe<Q: DirectoryProbe>(self, probe: Q) -> ArtifactResolver<Q> {
        ArtifactResolver {
            module_dir: self.module_dir,
            settings: self.settings,
            layout: self.layout,
            advisory: self.advisory,
            probe,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// `<module_dir>/<runtime_folder>`.
    pub fn runtime_root(&self) -> PathBuf {
        self.module_dir.join(&self.settings.runtime_folder)
    }

    /// Resolve the library to link for `descriptor`.
    pub fn resolve(
        &self,
        descriptor: &TargetDescriptor,
    ) -> Result<ResolvedArtifact, ResolutionError> {
        let platform = descriptor.platform;

        let runtime_root = self.runtime_root();
        if !self.probe.is_dir(&runtime_root) {
            return Err(ResolutionError::RuntimeRootMissing { path: runtime_root });
        }

        let entry = self
            .layout
            .entry(platform)
            .ok_or(ResolutionError::UnsupportedPlatform { platform })?;
        let library_file_name = entry.library.file_name();

        let bucket = self.layout.toolchain().bucket_for(descriptor.toolchain);
        let platform_dir = entry.platform_subdirectory(bucket);

        let abis = match &entry.architectures {
            ArchitectureRule::Single => None,
            ArchitectureRule::FanOut { abis } => {
                if descriptor.has_explicit_architecture() {
                    return Err(ResolutionError::UnsupportedArchitecture {
                        platform,
                        architecture: descriptor.architecture.clone(),
                    });
                }
                Some(abis)
            }
        };

        let use_debug =
            descriptor.configuration.is_debug() && self.settings.debug_builds_use_debug_artifacts;
        let config_dir = if use_debug {
            &entry.configurations.debug
        } else {
            &entry.configurations.release
        };

        let library_directory = runtime_root.join("bin").join(platform_dir).join(config_dir);
        if use_debug {
            self.advisory.notify(platform, &library_directory);
        }
        if !self.probe.is_dir(&library_directory) {
            return Err(ResolutionError::LibraryDirectoryMissing {
                platform,
                path: library_directory,
            });
        }

        let binaries = match abis {
            None => ArtifactBinaries::Single {
                path: library_directory.join(library_file_name),
            },
            Some(abis) => {
                let mut resolved = Vec::with_capacity(abis.len());
                for abi in abis {
                    let directory = library_directory.join(abi);
                    if !self.probe.is_dir(&directory) {
                        return Err(ResolutionError::LibraryDirectoryMissing {
                            platform,
                            path: directory,
                        });
                    }
                    resolved.push(AbiArtifact {
                        abi: abi.clone(),
                        path: directory.join(library_file_name),
                        directory,
                    });
                }
                ArtifactBinaries::PerAbi { abis: resolved }
            }
        };

        tracing::debug!(
            %platform,
            directory = %library_directory.display(),
            file = library_file_name,
            "resolved FaceFX library"
        );

        Ok(ResolvedArtifact {
            platform,
            runtime_root,
            library_directory,
            library_file_name: library_file_name.to_string(),
            library_reference: entry.reference,
            binaries,
        })
    }

    /// Whether FaceFX can be linked for `descriptor`.
    pub fn is_supported(&self, descriptor: &TargetDescriptor) -> bool {
        self.resolve(descriptor).is_ok()
    }
}
