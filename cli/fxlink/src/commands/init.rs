//! `fxlink init` — write a starter `fxlink.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{FxlinkManifest, MANIFEST_FILE};

pub fn run(project_dir: &Path, module_dir: &str) -> Result<()> {
    create_manifest(project_dir, module_dir)?;
    println!("Created {}", project_dir.join(MANIFEST_FILE).display());
    Ok(())
}

pub(crate) fn create_manifest(project_dir: &Path, module_dir: &str) -> Result<()> {
    let path = project_dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;
    fs::write(&path, FxlinkManifest::template(module_dir))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
