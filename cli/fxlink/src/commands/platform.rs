//! `fxlink platform` — platform listing and description.

use anyhow::Result;

use fxlink_resolve::{ArchitectureRule, LayoutTable, LibraryReference};
use fxlink_targets::TargetPlatform;

/// List every host platform and whether the layout table supports it.
pub fn list(layout: &LayoutTable) -> Result<()> {
    print!("{}", render_list(layout));
    Ok(())
}

pub(crate) fn render_list(layout: &LayoutTable) -> String {
    let mut out = String::from("Platforms:\n\n");
    for platform in TargetPlatform::ALL {
        let support = if layout.is_supported(platform) {
            "supported"
        } else {
            "-"
        };
        out.push_str(&format!(
            "  {:<10} {:<10} {}\n",
            platform.as_str(),
            support,
            platform.description()
        ));
    }
    out.push_str("\nUse 'fxlink platform describe <name>' for details.\n");
    out
}

/// Describe one platform's layout entry.
pub fn describe(name: &str, layout: &LayoutTable) -> Result<()> {
    print!("{}", render_describe(name, layout)?);
    Ok(())
}

pub(crate) fn render_describe(name: &str, layout: &LayoutTable) -> Result<String> {
    let platform: TargetPlatform = name.parse()?;
    let mut out = format!("=== Platform: {platform} ===\n");
    out.push_str(&format!("Description: {}\n", platform.description()));
    out.push_str(&format!("Family:      {:?}\n", platform.family()));

    let Some(entry) = layout.entry(platform) else {
        out.push_str("FaceFX:      not supported\n");
        return Ok(out);
    };

    out.push_str(&format!("Library:     {}\n", entry.library.file_name()));
    if entry.reference == LibraryReference::FullPath {
        out.push_str("Linked by:   full path\n");
    }
    out.push_str(&format!("Directory:   bin/{}\n", entry.subdirectory));
    out.push_str(&format!(
        "Configs:     {} / {}\n",
        entry.configurations.release, entry.configurations.debug
    ));
    if let ArchitectureRule::FanOut { abis } = &entry.architectures {
        out.push_str(&format!("ABIs:        {}\n", abis.join(", ")));
    }
    if entry.uses_toolchain() {
        let buckets = layout.toolchain();
        out.push_str(&format!("Toolchain:   {} (floor)\n", buckets.floor));
        for step in &buckets.steps {
            out.push_str(&format!("             {} from {}\n", step.bucket, step.from));
        }
    }
    Ok(out)
}
