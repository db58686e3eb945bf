//! Toolchain buckets.
//!
//! Several compiler releases share one ABI-compatible runtime build. The
//! bucket table collapses them: a compiler maps to the last step it has
//! reached, or to the floor bucket when it predates every step.

use serde::{Deserialize, Serialize};

use fxlink_targets::Compiler;

/// A compiler release from which a bucket applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainStep {
    /// First compiler that uses `bucket`.
    pub from: Compiler,
    /// Directory name of the bucket (e.g., "vs14").
    pub bucket: String,
}

/// Ordered compiler-to-bucket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainBuckets {
    /// Bucket for compilers older than the first step.
    pub floor: String,
    /// Steps in strictly ascending `from` order.
    #[serde(default)]
    pub steps: Vec<ToolchainStep>,
}

impl ToolchainBuckets {
    pub fn new(floor: impl Into<String>) -> Self {
        Self {
            floor: floor.into(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, from: Compiler, bucket: impl Into<String>) -> Self {
        self.steps.push(ToolchainStep {
            from,
            bucket: bucket.into(),
        });
        self
    }

    /// The FaceFX runtime 1.1 split: `vs12` up to VS2013, `vs14` from VS2015.
    pub fn builtin() -> Self {
        Self::new("vs12").step(Compiler::VisualStudio2015, "vs14")
    }

    /// Bucket directory name for `compiler`.
    pub fn bucket_for(&self, compiler: Compiler) -> &str {
        self.steps
            .iter()
            .rev()
            .find(|s| compiler >= s.from)
            .map(|s| s.bucket.as_str())
            .unwrap_or(self.floor.as_str())
    }

    /// Whether steps are strictly ascending by compiler.
    pub fn is_ordered(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].from < w[1].from)
    }
}

impl Default for ToolchainBuckets {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_split() {
        let b = ToolchainBuckets::builtin();
        assert_eq!(b.bucket_for(Compiler::VisualStudio2012), "vs12");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2013), "vs12");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2015), "vs14");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2022), "vs14");
    }

    #[test]
    fn extending_the_table() {
        let b = ToolchainBuckets::new("vs11")
            .step(Compiler::VisualStudio2013, "vs12")
            .step(Compiler::VisualStudio2015, "vs14")
            .step(Compiler::VisualStudio2019, "vs16");
        assert!(b.is_ordered());
        assert_eq!(b.bucket_for(Compiler::VisualStudio2012), "vs11");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2013), "vs12");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2017), "vs14");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2019), "vs16");
        assert_eq!(b.bucket_for(Compiler::VisualStudio2022), "vs16");
    }

    #[test]
    fn unordered_steps_are_detected() {
        let b = ToolchainBuckets::new("vs12")
            .step(Compiler::VisualStudio2017, "vs15")
            .step(Compiler::VisualStudio2015, "vs14");
        assert!(!b.is_ordered());
    }
}
