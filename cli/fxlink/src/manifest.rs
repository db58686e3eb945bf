//! `fxlink.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fxlink_resolve::{
    load_layout_toml, ArtifactResolver, LayoutTable, ResolverSettings, DEFAULT_RUNTIME_FOLDER,
};
use fxlink_rules::{FailurePolicy, IntegrationOptions};

pub const MANIFEST_FILE: &str = "fxlink.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FxlinkManifest {
    /// Where the bundled runtime lives.
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Host build switches.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Runtime location section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Library module directory, relative to the manifest.
    #[serde(default = "default_module_dir")]
    pub module_dir: String,
    /// Runtime folder inside the module directory.
    #[serde(default = "default_runtime_folder")]
    pub folder: String,
    /// Custom layout table, relative to the manifest.
    #[serde(default)]
    pub layout: Option<String>,
}

fn default_module_dir() -> String {
    ".".to_string()
}

fn default_runtime_folder() -> String {
    DEFAULT_RUNTIME_FOLDER.to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            module_dir: default_module_dir(),
            folder: default_runtime_folder(),
            layout: None,
        }
    }
}

/// Build switches section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    #[serde(default)]
    pub debug_builds_use_debug_artifacts: bool,
    #[serde(default = "default_true")]
    pub feature_enabled: bool,
    #[serde(default)]
    pub compile_with_wwise: bool,
    #[serde(default)]
    pub build_editor: bool,
    #[serde(default)]
    pub runtime_headers: bool,
    #[serde(default)]
    pub policy: FailurePolicy,
}

fn default_true() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            debug_builds_use_debug_artifacts: false,
            feature_enabled: true,
            compile_with_wwise: false,
            build_editor: false,
            runtime_headers: false,
            policy: FailurePolicy::default(),
        }
    }
}

impl FxlinkManifest {
    /// Search upward from `start_dir` for an `fxlink.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: FxlinkManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing fxlink.toml")
    }

    pub fn module_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.runtime.module_dir)
    }

    /// The layout table: the manifest's custom table, or the builtin one.
    pub fn layout(&self, project_dir: &Path) -> Result<LayoutTable> {
        match &self.runtime.layout {
            Some(rel) => {
                let path = project_dir.join(rel);
                load_layout_toml(&path).with_context(|| format!("loading layout {}", path.display()))
            }
            None => Ok(LayoutTable::builtin()),
        }
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            runtime_folder: PathBuf::from(&self.runtime.folder),
            debug_builds_use_debug_artifacts: self.build.debug_builds_use_debug_artifacts,
        }
    }

    pub fn integration_options(&self) -> IntegrationOptions {
        IntegrationOptions {
            feature_enabled: self.build.feature_enabled,
            compile_with_wwise: self.build.compile_with_wwise,
            build_editor: self.build.build_editor,
            runtime_headers: self.build.runtime_headers,
            policy: self.build.policy,
        }
    }

    /// A filesystem resolver configured from this manifest.
    pub fn resolver(&self, project_dir: &Path) -> Result<ArtifactResolver> {
        tracing::debug!(
            module_dir = %self.module_dir(project_dir).display(),
            runtime_folder = %self.runtime.folder,
            "configuring resolver"
        );
        Ok(
            ArtifactResolver::new(self.module_dir(project_dir), self.resolver_settings())
                .with_layout(self.layout(project_dir)?),
        )
    }

    /// Generate the default template for `fxlink init`.
    pub fn template(module_dir: &str) -> String {
        format!(
            r#"[runtime]
module-dir = "{module_dir}"
folder = "{DEFAULT_RUNTIME_FOLDER}"

[build]
debug-builds-use-debug-artifacts = false
feature-enabled = true
compile-with-wwise = false
build-editor = false
runtime-headers = false
policy = "permissive"
"#
        )
    }
}
