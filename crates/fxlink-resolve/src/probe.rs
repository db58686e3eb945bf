//! Read-only filesystem probes.

use std::path::Path;

/// Answers whether a directory exists.
///
/// The resolver never touches the filesystem except through this trait.
pub trait DirectoryProbe: Send + Sync {
    fn is_dir(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl DirectoryProbe for FsProbe {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

impl<F> DirectoryProbe for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_dir(&self, path: &Path) -> bool {
        self(path)
    }
}
