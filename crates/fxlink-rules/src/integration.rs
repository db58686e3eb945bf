//! Integration planning: whether FaceFX is built into the host, and how.
//!
//! The feature switch is consulted before anything else; a disabled
//! integration never touches the resolver. When resolution fails, the
//! [`FailurePolicy`] decides between failing the build and building without
//! FaceFX.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fxlink_resolve::{ArtifactResolver, DirectoryProbe, ResolvedArtifact};
use fxlink_targets::TargetDescriptor;

use crate::error::{Result, RulesError};
use crate::module::{flag_definition, ModuleRules};

/// Engine-wide definition telling game code whether FaceFX is compiled in.
pub const FEATURE_DEFINITION: &str = "WITH_FACEFX";

/// What to do when the runtime library cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the build.
    Strict,
    /// Log and build without FaceFX.
    #[default]
    Permissive,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Strict => f.write_str("strict"),
            FailurePolicy::Permissive => f.write_str("permissive"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "permissive" => Ok(FailurePolicy::Permissive),
            _ => Err(RulesError::UnknownPolicy { name: s.to_string() }),
        }
    }
}

/// Host-wide integration switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntegrationOptions {
    /// Master switch for the whole integration.
    pub feature_enabled: bool,
    pub compile_with_wwise: bool,
    pub build_editor: bool,
    /// Export the runtime's header tree and `FACEFX_RUNTIMEHEADER`, as the
    /// plugin builds do.
    pub runtime_headers: bool,
    pub policy: FailurePolicy,
}

impl Default for IntegrationOptions {
    fn default() -> Self {
        Self {
            feature_enabled: true,
            compile_with_wwise: false,
            build_editor: false,
            runtime_headers: false,
            policy: FailurePolicy::default(),
        }
    }
}

/// Whether the integration is switched on at all.
pub fn is_feature_enabled(options: &IntegrationOptions) -> bool {
    options.feature_enabled
}

/// Outcome of planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum IntegrationStatus {
    Enabled,
    /// The feature switch is off.
    FeatureDisabled,
    /// Resolution failed and the permissive policy dropped FaceFX.
    Unavailable { kind: String, reason: String },
}

/// Everything the host needs to build (or skip) the integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntegrationPlan {
    pub status: IntegrationStatus,
    pub artifact: Option<ResolvedArtifact>,
    pub modules: Vec<ModuleRules>,
    /// Definitions added to the engine module.
    pub engine_definitions: Vec<String>,
}

impl IntegrationPlan {
    fn disabled(status: IntegrationStatus) -> Self {
        Self {
            status,
            artifact: None,
            modules: Vec::new(),
            engine_definitions: vec![flag_definition(FEATURE_DEFINITION, false)],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status == IntegrationStatus::Enabled
    }

    pub fn module(&self, name: &str) -> Option<&ModuleRules> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// Plan the integration for one build request.
pub fn plan<P: DirectoryProbe>(
    options: &IntegrationOptions,
    resolver: &ArtifactResolver<P>,
    descriptor: &TargetDescriptor,
) -> Result<IntegrationPlan> {
    if !is_feature_enabled(options) {
        tracing::debug!("FaceFX integration switched off");
        return Ok(IntegrationPlan::disabled(IntegrationStatus::FeatureDisabled));
    }

    let artifact = match resolver.resolve(descriptor) {
        Ok(artifact) => artifact,
        Err(err) => match options.policy {
            FailurePolicy::Strict => return Err(err.into()),
            FailurePolicy::Permissive => {
                tracing::warn!(platform = %descriptor.platform, "{err}");
                return Ok(IntegrationPlan::disabled(IntegrationStatus::Unavailable {
                    kind: err.kind().to_string(),
                    reason: err.to_string(),
                }));
            }
        },
    };

    let runtime_folder = resolver.settings().runtime_folder.display().to_string();
    let runtime_header = options.runtime_headers.then_some(runtime_folder.as_str());
    let mut modules = vec![
        ModuleRules::library(&artifact, options.runtime_headers),
        ModuleRules::runtime(
            options.build_editor,
            options.compile_with_wwise,
            runtime_header,
        ),
    ];
    if options.build_editor {
        modules.push(ModuleRules::editor(&runtime_folder));
    }

    Ok(IntegrationPlan {
        status: IntegrationStatus::Enabled,
        artifact: Some(artifact),
        modules,
        engine_definitions: vec![flag_definition(FEATURE_DEFINITION, true)],
    })
}
