//! Planning against an on-disk runtime bundle.

use std::sync::Arc;

use fxlink_resolve::{ArtifactResolver, DebugAdvisory, ResolverSettings};
use fxlink_rules::{plan, FailurePolicy, IntegrationOptions, IntegrationStatus, RulesError};
use fxlink_targets::{TargetDescriptor, TargetPlatform};

fn resolver(module_dir: &std::path::Path) -> ArtifactResolver {
    ArtifactResolver::new(module_dir, ResolverSettings::default())
        .with_advisory(Arc::new(DebugAdvisory::new()))
}

#[test]
fn mac_plan_references_library_by_full_path() {
    let dir = tempfile::tempdir().unwrap();
    let lib_dir = dir.path().join("facefx-runtime-1.1.1/facefx/bin/osx/Release");
    std::fs::create_dir_all(&lib_dir).unwrap();

    let plan = plan(
        &IntegrationOptions::default(),
        &resolver(dir.path()),
        &TargetDescriptor::new(TargetPlatform::Mac),
    )
    .unwrap();

    let lib = plan.module("FaceFXLib").unwrap();
    assert_eq!(lib.public_library_paths, vec![lib_dir.clone()]);
    assert_eq!(
        lib.public_additional_libraries,
        vec![lib_dir.join("libfacefx.a").display().to_string()]
    );
}

#[test]
fn android_plan_adds_every_abi_directory() {
    let dir = tempfile::tempdir().unwrap();
    let release = dir.path().join("facefx-runtime-1.1.1/facefx/bin/android/Release");
    for abi in ["armeabi-v7a", "arm64-v8a"] {
        std::fs::create_dir_all(release.join(abi)).unwrap();
    }

    let plan = plan(
        &IntegrationOptions::default(),
        &resolver(dir.path()),
        &TargetDescriptor::new(TargetPlatform::Android),
    )
    .unwrap();
    let lib = plan.module("FaceFXLib").unwrap();
    assert_eq!(
        lib.public_library_paths,
        vec![release.join("armeabi-v7a"), release.join("arm64-v8a")]
    );
}

#[test]
fn empty_module_dir_strict_and_permissive() {
    let dir = tempfile::tempdir().unwrap();
    let r = resolver(dir.path());
    let d = TargetDescriptor::new(TargetPlatform::Win64);

    let strict = IntegrationOptions {
        policy: FailurePolicy::Strict,
        ..IntegrationOptions::default()
    };
    assert!(matches!(
        plan(&strict, &r, &d),
        Err(RulesError::Resolution(_))
    ));

    let permissive = plan(&IntegrationOptions::default(), &r, &d).unwrap();
    assert!(matches!(
        permissive.status,
        IntegrationStatus::Unavailable { .. }
    ));
}

#[test]
fn plan_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("facefx-runtime-1.1.1/facefx/bin/linux/Release")).unwrap();
    let plan = plan(
        &IntegrationOptions::default(),
        &resolver(dir.path()),
        &TargetDescriptor::new(TargetPlatform::Linux),
    )
    .unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["status"]["status"], "enabled");
    assert_eq!(json["engine-definitions"][0], "WITH_FACEFX=1");
    assert_eq!(json["artifact"]["library-file-name"], "libfacefx.a");
}
