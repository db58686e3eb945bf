//! Resolved library artifacts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use fxlink_targets::TargetPlatform;

use crate::layout::LibraryReference;

/// One ABI's library on a multi-ABI platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AbiArtifact {
    /// ABI subdirectory name (e.g., "arm64-v8a").
    pub abi: String,
    /// Directory holding this ABI's library.
    pub directory: PathBuf,
    /// Full path of the library file.
    pub path: PathBuf,
}

/// The library file(s) a resolution produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ArtifactBinaries {
    Single { path: PathBuf },
    /// Every ABI of the platform; never empty.
    PerAbi { abis: Vec<AbiArtifact> },
}

/// A successfully resolved FaceFX runtime library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedArtifact {
    pub platform: TargetPlatform,
    /// The bundled runtime folder.
    pub runtime_root: PathBuf,
    /// `<runtime_root>/bin/<platform>/<configuration>`.
    pub library_directory: PathBuf,
    pub library_file_name: String,
    /// How [`library_references`](Self::library_references) names the library.
    pub library_reference: LibraryReference,
    pub binaries: ArtifactBinaries,
}

impl ResolvedArtifact {
    /// Directories to add to the linker search path.
    pub fn library_paths(&self) -> Vec<PathBuf> {
        match &self.binaries {
            ArtifactBinaries::Single { .. } => vec![self.library_directory.clone()],
            ArtifactBinaries::PerAbi { abis } => abis.iter().map(|a| a.directory.clone()).collect(),
        }
    }

    /// Full paths of every library file.
    pub fn binary_paths(&self) -> Vec<&Path> {
        match &self.binaries {
            ArtifactBinaries::Single { path } => vec![path.as_path()],
            ArtifactBinaries::PerAbi { abis } => abis.iter().map(|a| a.path.as_path()).collect(),
        }
    }

    /// Entries for the host's additional-libraries list: full paths, or
    /// the file name found through [`library_paths`](Self::library_paths).
    pub fn library_references(&self) -> Vec<String> {
        match self.library_reference {
            LibraryReference::FullPath => self
                .binary_paths()
                .into_iter()
                .map(|p| p.display().to_string())
                .collect(),
            LibraryReference::FileName => vec![self.library_file_name.clone()],
        }
    }

    /// ABI names, for multi-ABI artifacts.
    pub fn abis(&self) -> Vec<&str> {
        match &self.binaries {
            ArtifactBinaries::Single { .. } => Vec::new(),
            ArtifactBinaries::PerAbi { abis } => abis.iter().map(|a| a.abi.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(
        platform: TargetPlatform,
        dir: &str,
        file: &str,
        library_reference: LibraryReference,
    ) -> ResolvedArtifact {
        let library_directory = PathBuf::from(dir);
        ResolvedArtifact {
            platform,
            library_reference,
            runtime_root: PathBuf::from("rt"),
            binaries: ArtifactBinaries::Single {
                path: library_directory.join(file),
            },
            library_directory,
            library_file_name: file.into(),
        }
    }

    #[test]
    fn full_path_reference() {
        let a = single(
            TargetPlatform::Mac,
            "rt/bin/osx/Release",
            "libfacefx.a",
            LibraryReference::FullPath,
        );
        assert_eq!(
            a.library_references(),
            vec![Path::new("rt/bin/osx/Release").join("libfacefx.a").display().to_string()]
        );
        assert_eq!(a.library_paths(), vec![PathBuf::from("rt/bin/osx/Release")]);
    }

    #[test]
    fn file_name_reference() {
        let a = single(
            TargetPlatform::Win64,
            "rt/bin/windows/vs14/x64/Release",
            "libfacefx.lib",
            LibraryReference::FileName,
        );
        assert_eq!(a.library_references(), vec!["libfacefx.lib".to_string()]);
        assert!(a.abis().is_empty());
    }

    #[test]
    fn per_abi_paths() {
        let dir = PathBuf::from("rt/bin/android/Release");
        let abis = ["armeabi-v7a", "arm64-v8a"]
            .into_iter()
            .map(|abi| AbiArtifact {
                abi: abi.into(),
                directory: dir.join(abi),
                path: dir.join(abi).join("libfacefx.a"),
            })
            .collect();
        let a = ResolvedArtifact {
            platform: TargetPlatform::Android,
            runtime_root: PathBuf::from("rt"),
            library_directory: dir.clone(),
            library_file_name: "libfacefx.a".into(),
            library_reference: LibraryReference::FileName,
            binaries: ArtifactBinaries::PerAbi { abis },
        };
        assert_eq!(a.abis(), vec!["armeabi-v7a", "arm64-v8a"]);
        assert_eq!(
            a.library_paths(),
            vec![dir.join("armeabi-v7a"), dir.join("arm64-v8a")]
        );
        assert_eq!(a.binary_paths().len(), 2);
        assert_eq!(a.library_references(), vec!["libfacefx.a".to_string()]);
    }
}
