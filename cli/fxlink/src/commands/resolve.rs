//! `fxlink resolve` — locate the runtime library for one build request.

use std::path::Path;

use anyhow::Result;

use fxlink_resolve::{ArtifactBinaries, ResolvedArtifact};

use super::{OutputFormat, TargetArgs};
use crate::manifest::FxlinkManifest;

pub fn run(
    project_dir: &Path,
    manifest: &FxlinkManifest,
    target: &TargetArgs,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let artifact = resolve(project_dir, manifest, target)?;
    print!("{}", render(&artifact, format)?);
    Ok(())
}

pub(crate) fn resolve(
    project_dir: &Path,
    manifest: &FxlinkManifest,
    target: &TargetArgs,
) -> Result<ResolvedArtifact> {
    let descriptor = target.descriptor()?;
    let resolver = target.apply(manifest).resolver(project_dir)?;
    Ok(resolver.resolve(&descriptor)?)
}

pub(crate) fn render(artifact: &ResolvedArtifact, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(artifact)? + "\n");
    }

    let mut out = String::new();
    out.push_str(&format!("Platform:          {}\n", artifact.platform));
    out.push_str(&format!("Runtime root:      {}\n", artifact.runtime_root.display()));
    out.push_str(&format!(
        "Library directory: {}\n",
        artifact.library_directory.display()
    ));
    out.push_str(&format!("Library:           {}\n", artifact.library_file_name));
    if let ArtifactBinaries::PerAbi { abis } = &artifact.binaries {
        out.push_str("ABIs:\n");
        for abi in abis {
            out.push_str(&format!("  {:<12} {}\n", abi.abi, abi.path.display()));
        }
    }
    Ok(out)
}
