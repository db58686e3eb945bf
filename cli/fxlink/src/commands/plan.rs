//! `fxlink plan` — module rules and engine definitions for one build request.

use std::path::Path;

use anyhow::Result;

use fxlink_rules::{plan as plan_integration, FailurePolicy, IntegrationPlan, IntegrationStatus};

use super::{OutputFormat, TargetArgs};
use crate::manifest::FxlinkManifest;

/// Host switches that override the manifest's `[build]` section.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    pub editor: bool,
    pub wwise: bool,
    pub disable: bool,
    pub policy: Option<FailurePolicy>,
}

pub fn run(
    project_dir: &Path,
    manifest: &FxlinkManifest,
    target: &TargetArgs,
    overrides: &PlanOverrides,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let plan = build_plan(project_dir, manifest, target, overrides)?;
    print!("{}", render(&plan, format)?);
    Ok(())
}

pub(crate) fn build_plan(
    project_dir: &Path,
    manifest: &FxlinkManifest,
    target: &TargetArgs,
    overrides: &PlanOverrides,
) -> Result<IntegrationPlan> {
    let descriptor = target.descriptor()?;
    let manifest = target.apply(manifest);
    let resolver = manifest.resolver(project_dir)?;

    let mut options = manifest.integration_options();
    options.build_editor |= overrides.editor;
    options.compile_with_wwise |= overrides.wwise;
    if overrides.disable {
        options.feature_enabled = false;
    }
    if let Some(policy) = overrides.policy {
        options.policy = policy;
    }

    Ok(plan_integration(&options, &resolver, &descriptor)?)
}

pub(crate) fn render(plan: &IntegrationPlan, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(plan)? + "\n");
    }

    let mut out = String::new();
    match &plan.status {
        IntegrationStatus::Enabled => out.push_str("FaceFX: enabled\n"),
        IntegrationStatus::FeatureDisabled => out.push_str("FaceFX: disabled by configuration\n"),
        IntegrationStatus::Unavailable { reason, .. } => {
            out.push_str(&format!("FaceFX: unavailable ({reason})\n"))
        }
    }
    out.push_str(&format!(
        "Engine definitions: {}\n",
        plan.engine_definitions.join(" ")
    ));

    for module in &plan.modules {
        out.push('\n');
        out.push_str(&format!("--- {} ({:?}) ---\n", module.name, module.kind));
        if !module.private_dependencies.is_empty() {
            out.push_str(&format!(
                "  Dependencies:    {}\n",
                module.private_dependencies.join(", ")
            ));
        }
        if !module.dynamically_loaded_modules.is_empty() {
            out.push_str(&format!(
                "  Loaded on demand: {}\n",
                module.dynamically_loaded_modules.join(", ")
            ));
        }
        for def in &module.definitions {
            out.push_str(&format!("  Definition:      {def}\n"));
        }
        for path in &module.public_library_paths {
            out.push_str(&format!("  Library path:    {}\n", path.display()));
        }
        for lib in &module.public_additional_libraries {
            out.push_str(&format!("  Library:         {lib}\n"));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxlink_rules::RulesError;

    fn args(platform: &str) -> TargetArgs {
        TargetArgs {
            platform: platform.into(),
            ..TargetArgs::default()
        }
    }

    #[test]
    fn plan_with_editor_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(
            dir.path()
                .join("facefx-runtime-1.1.1/facefx/bin/windows/vs14/x64/Release"),
        )
        .unwrap();

        let overrides = PlanOverrides {
            editor: true,
            ..PlanOverrides::default()
        };
        let plan = build_plan(dir.path(), &FxlinkManifest::default(), &args("win64"), &overrides)
            .unwrap();
        assert!(plan.is_enabled());
        assert!(plan.module("FaceFXEditor").is_some());

        let human = render(&plan, OutputFormat::Human).unwrap();
        assert!(human.contains("FaceFX: enabled"));
        assert!(human.contains("WITH_FACEFX=1"));
        assert!(human.contains("FACEFX_RUNTIMEFOLDER"));
    }

    #[test]
    fn missing_runtime_is_permissive_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let plan = build_plan(
            dir.path(),
            &FxlinkManifest::default(),
            &args("linux"),
            &PlanOverrides::default(),
        )
        .unwrap();
        assert!(!plan.is_enabled());
        let human = render(&plan, OutputFormat::Human).unwrap();
        assert!(human.contains("unavailable"));
        assert!(human.contains("WITH_FACEFX=0"));
    }

    #[test]
    fn strict_override_fails() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = PlanOverrides {
            policy: Some(FailurePolicy::Strict),
            ..PlanOverrides::default()
        };
        let err = build_plan(dir.path(), &FxlinkManifest::default(), &args("linux"), &overrides)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RulesError>(),
            Some(RulesError::Resolution(_))
        ));
    }

    #[test]
    fn disable_override_skips_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = PlanOverrides {
            disable: true,
            policy: Some(FailurePolicy::Strict),
            ..PlanOverrides::default()
        };
        let plan = build_plan(dir.path(), &FxlinkManifest::default(), &args("html5"), &overrides)
            .unwrap();
        assert_eq!(plan.status, IntegrationStatus::FeatureDisabled);
        let json: serde_json::Value =
            serde_json::from_str(&render(&plan, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["status"]["status"], "feature-disabled");
    }
}
