//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod layout;
pub mod plan;
pub mod platform;
pub mod resolve;

use anyhow::{bail, Context, Result};
use clap::Args;

use fxlink_targets::{TargetDescriptor, TargetPlatform};

use crate::manifest::FxlinkManifest;

/// Build request flags shared by `resolve` and `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target platform (e.g., win64, mac, android)
    pub platform: String,
    /// Explicit ABI tag; omit for the platform's default set
    #[arg(long)]
    pub arch: Option<String>,
    /// Compiler toolchain (e.g., vs2015, vs2019)
    #[arg(long)]
    pub toolchain: Option<String>,
    /// Build configuration (debug, debug-game, development, shipping, test)
    #[arg(long)]
    pub configuration: Option<String>,
    /// Library module directory (overrides fxlink.toml)
    #[arg(long)]
    pub module_dir: Option<String>,
    /// Link debug artifacts for debug builds (overrides fxlink.toml)
    #[arg(long)]
    pub debug_artifacts: bool,
}

impl TargetArgs {
    /// The descriptor for this request.
    pub fn descriptor(&self) -> Result<TargetDescriptor> {
        let platform: TargetPlatform = self
            .platform
            .parse()
            .context("use 'fxlink platform list' to see available platforms")?;
        let mut descriptor = TargetDescriptor::new(platform);
        if let Some(arch) = &self.arch {
            descriptor = descriptor.with_architecture(arch.trim());
        }
        if let Some(toolchain) = &self.toolchain {
            descriptor = descriptor.with_toolchain(toolchain.parse()?);
        }
        if let Some(configuration) = &self.configuration {
            descriptor = descriptor.with_configuration(configuration.parse()?);
        }
        Ok(descriptor)
    }

    /// Apply command-line overrides on top of the manifest.
    pub fn apply(&self, manifest: &FxlinkManifest) -> FxlinkManifest {
        let mut manifest = manifest.clone();
        if let Some(dir) = &self.module_dir {
            manifest.runtime.module_dir = dir.clone();
        }
        if self.debug_artifacts {
            manifest.build.debug_builds_use_debug_artifacts = true;
        }
        manifest
    }
}

/// Output format accepted by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn parse(format: Option<&str>) -> Result<Self> {
        match format {
            None | Some("human") | Some("text") => Ok(OutputFormat::Human),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => bail!("unknown format '{other}' (expected human or json)"),
        }
    }
}
