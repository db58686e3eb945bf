//! Host module rules.
//!
//! Plain dependency tables. Apart from the editor and Wwise switches
//! nothing here branches; the library module is filled in from a resolved
//! artifact.

use std::path::PathBuf;

use serde::Serialize;

use fxlink_resolve::ResolvedArtifact;

pub const LIBRARY_MODULE: &str = "FaceFXLib";
pub const RUNTIME_MODULE: &str = "FaceFX";
pub const EDITOR_MODULE: &str = "FaceFXEditor";

const RUNTIME_DEPENDENCIES: &[&str] = &[
    "Core",
    "CoreUObject",
    "Engine",
    "AnimGraphRuntime",
    "MovieScene",
    LIBRARY_MODULE,
];

const EDITOR_DEPENDENCIES: &[&str] = &[
    "Core",
    "CoreUObject",
    "Engine",
    "UnrealEd",
    "EditorStyle",
    "Slate",
    "SlateCore",
    "InputCore",
    "AssetTools",
    "ContentBrowser",
    "MainFrame",
    "DesktopPlatform",
    "AnimGraph",
    "BlueprintGraph",
    RUNTIME_MODULE,
];

/// Kind of host module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Prebuilt, nothing compiled.
    External,
    Runtime,
    Editor,
}

/// The rules of one host module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleRules {
    pub name: String,
    pub kind: ModuleKind,
    pub private_dependencies: Vec<String>,
    pub public_include_path_modules: Vec<String>,
    pub public_include_paths: Vec<PathBuf>,
    pub dynamically_loaded_modules: Vec<String>,
    /// Preprocessor definitions, `NAME=VALUE`.
    pub definitions: Vec<String>,
    pub public_library_paths: Vec<PathBuf>,
    pub public_additional_libraries: Vec<String>,
}

impl ModuleRules {
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            private_dependencies: Vec::new(),
            public_include_path_modules: Vec::new(),
            public_include_paths: Vec::new(),
            dynamically_loaded_modules: Vec::new(),
            definitions: Vec::new(),
            public_library_paths: Vec::new(),
            public_additional_libraries: Vec::new(),
        }
    }

    /// The external module linking the resolved runtime library.
    ///
    /// With `runtime_headers`, the runtime's `common/src` header tree is
    /// exported as a public include path.
    pub fn library(artifact: &ResolvedArtifact, runtime_headers: bool) -> Self {
        let mut rules = Self::new(LIBRARY_MODULE, ModuleKind::External);
        rules.public_library_paths = artifact.library_paths();
        rules.public_additional_libraries = artifact.library_references();
        if runtime_headers {
            rules
                .public_include_paths
                .push(artifact.runtime_root.join("common").join("src"));
        }
        rules
    }

    /// The runtime module. `runtime_header` is the runtime folder to name in
    /// `FACEFX_RUNTIMEHEADER`, when headers are exported.
    pub fn runtime(
        build_editor: bool,
        compile_with_wwise: bool,
        runtime_header: Option<&str>,
    ) -> Self {
        let mut rules = Self::new(RUNTIME_MODULE, ModuleKind::Runtime);
        rules.private_dependencies = to_strings(RUNTIME_DEPENDENCIES);
        if build_editor {
            rules.private_dependencies.push("TargetPlatform".into());
        }
        if compile_with_wwise {
            rules.private_dependencies.push("AkAudio".into());
        }
        rules.public_include_path_modules.push(LIBRARY_MODULE.into());
        rules
            .definitions
            .push(flag_definition("WITH_WWISE", compile_with_wwise));
        if let Some(folder) = runtime_header {
            rules
                .definitions
                .push(format!("FACEFX_RUNTIMEHEADER=\"{folder}/facefx.h\""));
        }
        rules
    }

    /// The editor module; `runtime_folder` is baked in for asset import paths.
    pub fn editor(runtime_folder: &str) -> Self {
        let mut rules = Self::new(EDITOR_MODULE, ModuleKind::Editor);
        rules.private_dependencies = to_strings(EDITOR_DEPENDENCIES);
        rules.dynamically_loaded_modules.push("AssetTools".into());
        rules
            .definitions
            .push(format!("FACEFX_RUNTIMEFOLDER=\"{runtime_folder}\""));
        rules
    }

    pub fn depends_on(&self, module: &str) -> bool {
        self.private_dependencies.iter().any(|d| d == module)
    }
}

/// `NAME=1` or `NAME=0`.
pub fn flag_definition(name: &str, enabled: bool) -> String {
    format!("{name}={}", u8::from(enabled))
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
