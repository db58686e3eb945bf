//! The per-request target descriptor.

use serde::{Deserialize, Serialize};

use crate::configuration::BuildConfiguration;
use crate::platform::TargetPlatform;
use crate::toolchain::Compiler;

/// One build request as seen by the artifact resolver.
///
/// Constructed once per build invocation and consumed by a single
/// resolution. Whether the runtime root exists is not part of the
/// descriptor; the resolver probes for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    pub platform: TargetPlatform,
    /// Explicit ABI tag. Empty requests the platform's default ABI set.
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub toolchain: Compiler,
    #[serde(default)]
    pub configuration: BuildConfiguration,
}

impl TargetDescriptor {
    /// A development-configuration request with the default toolchain and
    /// no explicit architecture.
    pub fn new(platform: TargetPlatform) -> Self {
        Self {
            platform,
            architecture: String::new(),
            toolchain: Compiler::default(),
            configuration: BuildConfiguration::default(),
        }
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    pub fn with_toolchain(mut self, toolchain: Compiler) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn with_configuration(mut self, configuration: BuildConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Whether an explicit architecture was requested.
    pub fn has_explicit_architecture(&self) -> bool {
        !self.architecture.is_empty()
    }
}
