//! `fxlink doctor` — project and runtime bundle diagnostics.

use std::path::Path;

use anyhow::Result;

use fxlink_targets::{TargetDescriptor, TargetPlatform};

use crate::manifest::FxlinkManifest;

/// Print diagnostic information about the project and its runtime bundle.
pub fn run(project_dir: &Path, platform: Option<&str>) -> Result<()> {
    print!("{}", report(project_dir, platform));
    Ok(())
}

pub(crate) fn report(project_dir: &Path, platform: Option<&str>) -> String {
    let mut out = String::from("=== fxlink doctor ===\n\n");
    out.push_str(&format!("fxlink version: {}\n\n", env!("CARGO_PKG_VERSION")));

    out.push_str("--- Project Status ---\n");
    let (manifest, dir) = match FxlinkManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            out.push_str(&format!("  fxlink.toml: found at {}\n", dir.display()));
            (manifest, dir)
        }
        Ok(None) => {
            out.push_str("  fxlink.toml: not found (using defaults)\n");
            (FxlinkManifest::default(), project_dir.to_path_buf())
        }
        Err(e) => {
            out.push_str(&format!("  fxlink.toml: error: {e:#}\n"));
            return out;
        }
    };

    let resolver = match manifest.resolver(&dir) {
        Ok(resolver) => resolver,
        Err(e) => {
            out.push_str(&format!("  layout:      error: {e:#}\n"));
            return out;
        }
    };
    let root = resolver.runtime_root();
    let root_state = if root.is_dir() { "found" } else { "missing" };
    out.push_str(&format!("  runtime:     {} ({root_state})\n", root.display()));
    out.push_str(&format!(
        "  debug libs:  {}\n",
        if manifest.build.debug_builds_use_debug_artifacts {
            "used for debug builds"
        } else {
            "never"
        }
    ));
    out.push('\n');

    let platforms: Vec<TargetPlatform> = match platform {
        Some(name) => match name.parse() {
            Ok(p) => vec![p],
            Err(e) => {
                out.push_str(&format!("{e}\n"));
                return out;
            }
        },
        None => resolver.layout().supported_platforms(),
    };

    out.push_str("--- Platforms ---\n");
    for platform in platforms {
        match resolver.resolve(&TargetDescriptor::new(platform)) {
            Ok(artifact) => out.push_str(&format!(
                "  {:<10} ok       {}\n",
                platform.as_str(),
                artifact.library_directory.display()
            )),
            Err(e) => out.push_str(&format!("  {:<10} {:<8} {e}\n", platform.as_str(), e.kind())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_runs_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = report(dir.path(), None);
        assert!(out.contains("not found (using defaults)"));
        assert!(out.contains("(missing)"));
        assert!(out.contains("runtime-root-missing"));
    }

    #[test]
    fn doctor_reports_resolved_platform() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fxlink.toml"), FxlinkManifest::template(".")).unwrap();
        std::fs::create_dir_all(dir.path().join("facefx-runtime-1.1.1/facefx/bin/osx/Release"))
            .unwrap();

        let out = report(dir.path(), None);
        assert!(out.contains("fxlink.toml: found"));
        let mac = out.lines().find(|l| l.trim_start().starts_with("mac")).unwrap();
        assert!(mac.contains("ok"));
        let linux = out.lines().find(|l| l.trim_start().starts_with("linux")).unwrap();
        assert!(linux.contains("library-directory-missing"));
    }

    #[test]
    fn doctor_single_platform() {
        let dir = tempfile::tempdir().unwrap();
        let out = report(dir.path(), Some("html5"));
        assert!(out.contains("html5"));
        assert!(!out.contains("win64"));
        assert!(super::run(dir.path(), Some("amiga")).is_ok());
    }
}
