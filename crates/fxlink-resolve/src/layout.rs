//! Platform layout table: parsing, serialization and validation.
//!
//! The table maps each supported platform to the library file it links and
//! the subdirectory of `bin/` that holds it. Subdirectory templates are
//! `/`-separated and may contain the `{toolchain}` token, which expands to
//! the request's toolchain bucket. Custom tables are stored as TOML.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fxlink_targets::TargetPlatform;

use crate::buckets::ToolchainBuckets;
use crate::error::{LayoutError, Result};

const TOOLCHAIN_TOKEN: &str = "{toolchain}";

/// Which library file name a platform links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryKind {
    /// `libfacefx.a`
    StaticArchive,
    /// `libfacefx.lib`
    ImportLibrary,
    /// `facefx`, the bare linker name the PS4 runtime has always shipped under.
    LinkerName,
}

impl LibraryKind {
    pub fn file_name(self) -> &'static str {
        match self {
            LibraryKind::StaticArchive => "libfacefx.a",
            LibraryKind::ImportLibrary => "libfacefx.lib",
            LibraryKind::LinkerName => "facefx",
        }
    }
}

/// How the host's additional-libraries list names the library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryReference {
    /// Bare file name, found through the library search paths.
    #[default]
    FileName,
    /// Full path of every library file. The Mac linker needs this.
    FullPath,
}

/// How a platform treats the descriptor's architecture field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ArchitectureRule {
    /// One library for the platform; the architecture field is ignored.
    #[default]
    Single,
    /// One library per ABI, all of which are linked. Only the empty
    /// (default) architecture may be requested.
    FanOut { abis: Vec<String> },
}

/// Configuration subdirectory names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigurationDirs {
    #[serde(default = "default_release_dir")]
    pub release: String,
    #[serde(default = "default_debug_dir")]
    pub debug: String,
}

fn default_release_dir() -> String {
    "Release".to_string()
}

fn default_debug_dir() -> String {
    "Debug".to_string()
}

impl Default for ConfigurationDirs {
    fn default() -> Self {
        Self {
            release: default_release_dir(),
            debug: default_debug_dir(),
        }
    }
}

impl ConfigurationDirs {
    pub fn new(release: impl Into<String>, debug: impl Into<String>) -> Self {
        Self {
            release: release.into(),
            debug: debug.into(),
        }
    }
}

/// Layout of one platform's libraries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformLayout {
    pub platform: TargetPlatform,
    pub library: LibraryKind,
    #[serde(default)]
    pub reference: LibraryReference,
    /// Subdirectory template below `bin/`.
    pub subdirectory: String,
    #[serde(default)]
    pub architectures: ArchitectureRule,
    #[serde(default)]
    pub configurations: ConfigurationDirs,
}

impl PlatformLayout {
    pub fn new(
        platform: TargetPlatform,
        library: LibraryKind,
        subdirectory: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            library,
            reference: LibraryReference::default(),
            subdirectory: subdirectory.into(),
            architectures: ArchitectureRule::Single,
            configurations: ConfigurationDirs::default(),
        }
    }

    pub fn fan_out<I, S>(mut self, abis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.architectures = ArchitectureRule::FanOut {
            abis: abis.into_iter().map(Into::into).collect(),
        };
        self
    }

    pub fn reference(mut self, reference: LibraryReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn configurations(mut self, configurations: ConfigurationDirs) -> Self {
        self.configurations = configurations;
        self
    }

    /// Whether the subdirectory depends on the toolchain bucket.
    pub fn uses_toolchain(&self) -> bool {
        self.subdirectory.contains(TOOLCHAIN_TOKEN)
    }

    /// Expand the subdirectory template for a toolchain bucket.
    pub fn platform_subdirectory(&self, bucket: &str) -> PathBuf {
        self.subdirectory
            .split('/')
            .map(|segment| segment.replace(TOOLCHAIN_TOKEN, bucket))
            .collect()
    }
}

/// Raw layout data, as stored in a layout TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutDefinition {
    #[serde(default)]
    pub toolchain: ToolchainBuckets,
    #[serde(default)]
    pub platforms: Vec<PlatformLayout>,
}

impl LayoutDefinition {
    /// The layout of the FaceFX runtime 1.1 bundles.
    pub fn builtin() -> Self {
        Self {
            toolchain: ToolchainBuckets::builtin(),
            platforms: vec![
                PlatformLayout::new(
                    TargetPlatform::Win32,
                    LibraryKind::ImportLibrary,
                    "windows/{toolchain}/Win32",
                ),
                PlatformLayout::new(
                    TargetPlatform::Win64,
                    LibraryKind::ImportLibrary,
                    "windows/{toolchain}/x64",
                ),
                PlatformLayout::new(TargetPlatform::Mac, LibraryKind::StaticArchive, "osx")
                    .reference(LibraryReference::FullPath),
                PlatformLayout::new(TargetPlatform::Linux, LibraryKind::StaticArchive, "linux"),
                // No simulator builds ship; both configurations are device-only.
                PlatformLayout::new(TargetPlatform::Ios, LibraryKind::StaticArchive, "ios")
                    .configurations(ConfigurationDirs::new("Release-iphoneos", "Debug-iphoneos")),
                PlatformLayout::new(
                    TargetPlatform::Android,
                    LibraryKind::StaticArchive,
                    "android",
                )
                .fan_out(["armeabi-v7a", "arm64-v8a"]),
                PlatformLayout::new(
                    TargetPlatform::XboxOne,
                    LibraryKind::ImportLibrary,
                    "xboxone/{toolchain}",
                ),
                PlatformLayout::new(
                    TargetPlatform::Ps4,
                    LibraryKind::LinkerName,
                    "ps4/{toolchain}",
                ),
            ],
        }
    }
}

/// A validated layout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTable {
    definition: LayoutDefinition,
}

impl LayoutTable {
    /// Validate `definition` and build a table from it.
    ///
    /// Warnings are accepted; any error-severity issue rejects the table.
    pub fn new(definition: LayoutDefinition) -> Result<Self> {
        if let Err(issues) = validate_layout(&definition) {
            let errors: Vec<_> = issues
                .into_iter()
                .filter(|i| i.severity == "error")
                .collect();
            if !errors.is_empty() {
                return Err(LayoutError::Invalid { issues: errors });
            }
        }
        Ok(Self { definition })
    }

    /// The builtin table.
    pub fn builtin() -> Self {
        Self {
            definition: LayoutDefinition::builtin(),
        }
    }

    pub fn definition(&self) -> &LayoutDefinition {
        &self.definition
    }

    pub fn toolchain(&self) -> &ToolchainBuckets {
        &self.definition.toolchain
    }

    /// Layout entry for `platform`, if the platform is supported.
    pub fn entry(&self, platform: TargetPlatform) -> Option<&PlatformLayout> {
        self.definition.platforms.iter().find(|p| p.platform == platform)
    }

    pub fn entries(&self) -> &[PlatformLayout] {
        &self.definition.platforms
    }

    pub fn is_supported(&self, platform: TargetPlatform) -> bool {
        self.entry(platform).is_some()
    }

    /// Supported platforms, in host declaration order.
    pub fn supported_platforms(&self) -> Vec<TargetPlatform> {
        TargetPlatform::ALL
            .into_iter()
            .filter(|p| self.is_supported(*p))
            .collect()
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A validation issue found in a layout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: String) -> Self {
        Self {
            severity: "error",
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: "warning",
            message,
        }
    }
}

/// Load and validate a layout table from a TOML file.
pub fn load_layout_toml(path: &Path) -> Result<LayoutTable> {
    if !path.exists() {
        return Err(LayoutError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_layout_toml(&content)
}

/// Parse and validate a layout table from a TOML string.
pub fn parse_layout_toml(toml_str: &str) -> Result<LayoutTable> {
    let definition: LayoutDefinition = toml::from_str(toml_str)?;
    LayoutTable::new(definition)
}

/// Serialize a layout table to pretty TOML.
pub fn layout_to_toml(table: &LayoutTable) -> Result<String> {
    let toml_str = toml::to_string_pretty(table.definition())?;
    Ok(toml_str)
}

/// Validate layout data for structural correctness.
///
/// Returns `Ok(())` if clean, or `Err(issues)` with every problem found.
pub fn validate_layout(
    definition: &LayoutDefinition,
) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Toolchain buckets, each a single directory name
    if !is_plain_segment(&definition.toolchain.floor) {
        issues.push(ValidationIssue::error(format!(
            "toolchain floor bucket '{}' must be a single non-empty directory name",
            definition.toolchain.floor
        )));
    }
    for step in &definition.toolchain.steps {
        if !is_plain_segment(&step.bucket) {
            issues.push(ValidationIssue::error(format!(
                "toolchain bucket '{}' starting at {} must be a single non-empty directory name",
                step.bucket, step.from
            )));
        }
    }
    if !definition.toolchain.is_ordered() {
        issues.push(ValidationIssue::error(
            "toolchain steps must be in strictly ascending compiler order".into(),
        ));
    }

    // 2. One entry per platform
    let mut seen = HashSet::new();
    for entry in &definition.platforms {
        if !seen.insert(entry.platform) {
            issues.push(ValidationIssue::error(format!(
                "platform '{}' has more than one layout entry",
                entry.platform
            )));
        }
    }

    for entry in &definition.platforms {
        // 3. Subdirectory template
        check_template(entry, &mut issues);

        // 4. ABI fan-out
        if let ArchitectureRule::FanOut { abis } = &entry.architectures {
            if abis.is_empty() {
                issues.push(ValidationIssue::error(format!(
                    "platform '{}' fans out over an empty ABI list",
                    entry.platform
                )));
            }
            let mut seen_abis = HashSet::new();
            for abi in abis {
                if !is_plain_segment(abi) {
                    issues.push(ValidationIssue::error(format!(
                        "platform '{}' has invalid ABI directory '{abi}'",
                        entry.platform
                    )));
                }
                if !seen_abis.insert(abi.as_str()) {
                    issues.push(ValidationIssue::error(format!(
                        "platform '{}' lists ABI '{abi}' more than once",
                        entry.platform
                    )));
                }
            }
        }

        // 5. Configuration directories
        for (label, dir) in [
            ("release", &entry.configurations.release),
            ("debug", &entry.configurations.debug),
        ] {
            if !is_plain_segment(dir) {
                issues.push(ValidationIssue::error(format!(
                    "platform '{}' has invalid {label} directory '{dir}'",
                    entry.platform
                )));
            }
        }
    }

    // 6. Host platforms without an entry are declined at resolve time
    for platform in TargetPlatform::ALL {
        if !seen.contains(&platform) {
            issues.push(ValidationIssue::warning(format!(
                "platform '{platform}' has no layout entry and will be reported as unsupported"
            )));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_template(entry: &PlatformLayout, issues: &mut Vec<ValidationIssue>) {
    let template = entry.subdirectory.as_str();
    if template.trim().is_empty() {
        issues.push(ValidationIssue::error(format!(
            "platform '{}' has an empty subdirectory template",
            entry.platform
        )));
        return;
    }
    for segment in template.split('/') {
        let literal = segment.replace(TOOLCHAIN_TOKEN, "");
        if literal.contains('{') || literal.contains('}') {
            issues.push(ValidationIssue::error(format!(
                "platform '{}' template '{template}' uses an unknown token (only {TOOLCHAIN_TOKEN} is supported)",
                entry.platform
            )));
        } else if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\')
        {
            issues.push(ValidationIssue::error(format!(
                "platform '{}' template '{template}' must be a relative path without '.', '..' or empty segments",
                entry.platform
            )));
        }
    }
}

fn is_plain_segment(s: &str) -> bool {
    !s.trim().is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '{', '}'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxlink_targets::Compiler;

    fn definition_with(entry: PlatformLayout) -> LayoutDefinition {
        LayoutDefinition {
            toolchain: ToolchainBuckets::builtin(),
            platforms: vec![entry],
        }
    }

    fn errors(definition: &LayoutDefinition) -> Vec<String> {
        validate_layout(definition)
            .err()
            .unwrap_or_default()
            .into_iter()
            .filter(|i| i.severity == "error")
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn builtin_has_no_errors() {
        assert!(errors(&LayoutDefinition::builtin()).is_empty());
        assert!(LayoutTable::new(LayoutDefinition::builtin()).is_ok());
    }

    #[test]
    fn builtin_reports_uncovered_platforms_as_warnings() {
        let issues = validate_layout(&LayoutDefinition::builtin()).unwrap_err();
        let uncovered: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == "warning")
            .map(|i| i.message.clone())
            .collect();
        assert_eq!(uncovered.len(), 3);
        assert!(uncovered.iter().any(|m| m.contains("'tvos'")));
        assert!(uncovered.iter().any(|m| m.contains("'switch'")));
        assert!(uncovered.iter().any(|m| m.contains("'html5'")));
    }

    #[test]
    fn builtin_supported_set() {
        let table = LayoutTable::builtin();
        assert_eq!(
            table.supported_platforms(),
            vec![
                TargetPlatform::Win32,
                TargetPlatform::Win64,
                TargetPlatform::Mac,
                TargetPlatform::Linux,
                TargetPlatform::Ios,
                TargetPlatform::Android,
                TargetPlatform::XboxOne,
                TargetPlatform::Ps4,
            ]
        );
    }

    #[test]
    fn builtin_file_names() {
        let table = LayoutTable::builtin();
        let name = |p| table.entry(p).unwrap().library.file_name();
        assert_eq!(name(TargetPlatform::Win32), "libfacefx.lib");
        assert_eq!(name(TargetPlatform::Win64), "libfacefx.lib");
        assert_eq!(name(TargetPlatform::XboxOne), "libfacefx.lib");
        assert_eq!(name(TargetPlatform::Mac), "libfacefx.a");
        assert_eq!(name(TargetPlatform::Linux), "libfacefx.a");
        assert_eq!(name(TargetPlatform::Ios), "libfacefx.a");
        assert_eq!(name(TargetPlatform::Android), "libfacefx.a");
        assert_eq!(name(TargetPlatform::Ps4), "facefx");
    }

    #[test]
    fn builtin_references() {
        let table = LayoutTable::builtin();
        for entry in table.entries() {
            let expected = if entry.platform == TargetPlatform::Mac {
                LibraryReference::FullPath
            } else {
                LibraryReference::FileName
            };
            assert_eq!(entry.reference, expected, "{}", entry.platform);
        }
    }

    #[test]
    fn reference_defaults_to_file_name_in_toml() {
        let table = parse_layout_toml(
            r#"
[toolchain]
floor = "vs12"

[[platforms]]
platform = "mac"
library = "static-archive"
subdirectory = "osx"

[[platforms]]
platform = "linux"
library = "static-archive"
reference = "full-path"
subdirectory = "linux"
"#,
        )
        .unwrap();
        assert_eq!(
            table.entry(TargetPlatform::Mac).unwrap().reference,
            LibraryReference::FileName
        );
        assert_eq!(
            table.entry(TargetPlatform::Linux).unwrap().reference,
            LibraryReference::FullPath
        );
    }

    #[test]
    fn template_expansion() {
        let table = LayoutTable::builtin();
        let win64 = table.entry(TargetPlatform::Win64).unwrap();
        assert!(win64.uses_toolchain());
        assert_eq!(
            win64.platform_subdirectory("vs14"),
            Path::new("windows").join("vs14").join("x64")
        );
        let mac = table.entry(TargetPlatform::Mac).unwrap();
        assert!(!mac.uses_toolchain());
        assert_eq!(mac.platform_subdirectory("vs14"), PathBuf::from("osx"));
    }

    #[test]
    fn duplicate_platform_rejected() {
        let mut definition = LayoutDefinition::builtin();
        definition.platforms
            .push(PlatformLayout::new(TargetPlatform::Mac, LibraryKind::StaticArchive, "mac"));
        let errs = errors(&definition);
        assert!(errs.iter().any(|m| m.contains("more than one")));
        assert!(matches!(
            LayoutTable::new(definition),
            Err(LayoutError::Invalid { .. })
        ));
    }

    #[test]
    fn unknown_token_rejected() {
        let definition = definition_with(PlatformLayout::new(
            TargetPlatform::Win64,
            LibraryKind::ImportLibrary,
            "windows/{compiler}/x64",
        ));
        assert!(errors(&definition).iter().any(|m| m.contains("unknown token")));
    }

    #[test]
    fn escaping_template_rejected() {
        for template in ["../windows", "/windows", "windows//x64", "./osx", ""] {
            let definition = definition_with(PlatformLayout::new(
                TargetPlatform::Win64,
                LibraryKind::ImportLibrary,
                template,
            ));
            assert!(!errors(&definition).is_empty(), "template {template:?} accepted");
        }
    }

    #[test]
    fn empty_and_duplicate_abis_rejected() {
        let empty = definition_with(
            PlatformLayout::new(TargetPlatform::Android, LibraryKind::StaticArchive, "android")
                .fan_out(Vec::<String>::new()),
        );
        assert!(errors(&empty).iter().any(|m| m.contains("empty ABI list")));

        let dup = definition_with(
            PlatformLayout::new(TargetPlatform::Android, LibraryKind::StaticArchive, "android")
                .fan_out(["arm64-v8a", "arm64-v8a"]),
        );
        assert!(errors(&dup).iter().any(|m| m.contains("more than once")));
    }

    #[test]
    fn bad_configuration_dir_rejected() {
        let definition = definition_with(
            PlatformLayout::new(TargetPlatform::Mac, LibraryKind::StaticArchive, "osx")
                .configurations(ConfigurationDirs::new("Release", "../Debug")),
        );
        assert!(errors(&definition).iter().any(|m| m.contains("invalid debug directory")));
    }

    #[test]
    fn unordered_toolchain_rejected() {
        let mut definition = LayoutDefinition::builtin();
        definition.toolchain = ToolchainBuckets::new("vs12")
            .step(Compiler::VisualStudio2017, "vs15")
            .step(Compiler::VisualStudio2015, "vs14");
        assert!(errors(&definition).iter().any(|m| m.contains("ascending")));
    }

    #[test]
    fn path_like_buckets_rejected() {
        let mut definition = LayoutDefinition::builtin();
        definition.toolchain = ToolchainBuckets::new("..").step(Compiler::VisualStudio2015, "a/b");
        let errs = errors(&definition);
        assert!(errs.iter().any(|m| m.contains("floor bucket '..'")));
        assert!(errs.iter().any(|m| m.contains("bucket 'a/b'")));
        assert!(matches!(
            LayoutTable::new(definition),
            Err(LayoutError::Invalid { .. })
        ));
    }

    #[test]
    fn escaping_floor_never_reaches_a_path() {
        let toml_str = r#"
[toolchain]
floor = "../../.."

[[platforms]]
platform = "win64"
library = "import-library"
subdirectory = "windows/{toolchain}/x64"
"#;
        assert!(matches!(
            parse_layout_toml(toml_str),
            Err(LayoutError::Invalid { .. })
        ));
    }

    #[test]
    fn round_trip_builtin() {
        let table = LayoutTable::builtin();
        let toml_str = layout_to_toml(&table).unwrap();
        let parsed = parse_layout_toml(&toml_str).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[toolchain]
floor = "vs12"

[[toolchain.steps]]
from = "vs2015"
bucket = "vs14"

[[platforms]]
platform = "win64"
library = "import-library"
subdirectory = "windows/{toolchain}/x64"

[[platforms]]
platform = "android"
library = "static-archive"
subdirectory = "android"
architectures = { kind = "fan-out", abis = ["arm64-v8a"] }
"#;
        let table = parse_layout_toml(toml_str).unwrap();
        assert_eq!(table.entries().len(), 2);
        let win64 = table.entry(TargetPlatform::Win64).unwrap();
        assert_eq!(win64.configurations, ConfigurationDirs::default());
        assert_eq!(win64.architectures, ArchitectureRule::Single);
        assert_eq!(
            table.entry(TargetPlatform::Android).unwrap().architectures,
            ArchitectureRule::FanOut {
                abis: vec!["arm64-v8a".into()]
            }
        );
        assert_eq!(table.toolchain().bucket_for(Compiler::VisualStudio2019), "vs14");
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_layout_toml("this is not valid toml [[[").is_err());
        let unknown_platform = r#"
[[platforms]]
platform = "dreamcast"
library = "static-archive"
subdirectory = "dc"
"#;
        assert!(matches!(
            parse_layout_toml(unknown_platform),
            Err(LayoutError::Toml(_))
        ));
    }

    #[test]
    fn load_not_found() {
        let result = load_layout_toml(Path::new("/nonexistent/layout.toml"));
        assert!(matches!(result, Err(LayoutError::NotFound { .. })));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, layout_to_toml(&LayoutTable::builtin()).unwrap()).unwrap();
        let table = load_layout_toml(&path).unwrap();
        assert!(table.is_supported(TargetPlatform::Ps4));
        assert!(!table.is_supported(TargetPlatform::Switch));
    }
}
