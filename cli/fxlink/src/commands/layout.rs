//! `fxlink layout` — layout table template and validation.

use std::path::Path;

use anyhow::{bail, Context, Result};

use fxlink_resolve::{layout_to_toml, validate_layout, LayoutDefinition, LayoutTable, ValidationIssue};

/// Print the builtin layout table as TOML, as a starting point for a custom one.
pub fn template() -> Result<()> {
    print!("{}", layout_to_toml(&LayoutTable::builtin())?);
    Ok(())
}

/// Validate a layout table file and report every issue.
pub fn validate(path: &Path) -> Result<()> {
    let (definition, issues) = check(path)?;
    for issue in &issues {
        println!("  {}: {}", issue.severity, issue.message);
    }
    let errors = issues.iter().filter(|i| i.severity == "error").count();
    if errors > 0 {
        bail!("{} has {errors} error(s)", path.display());
    }
    println!(
        "{}: ok ({} platforms, {} warnings)",
        path.display(),
        definition.platforms.len(),
        issues.len()
    );
    Ok(())
}

pub(crate) fn check(path: &Path) -> Result<(LayoutDefinition, Vec<ValidationIssue>)> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let definition: LayoutDefinition =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    let issues = validate_layout(&definition).err().unwrap_or_default();
    Ok((definition, issues))
}
