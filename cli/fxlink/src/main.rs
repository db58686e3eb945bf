//! fxlink: FaceFX runtime resolution and module rules for engine builds.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::plan::PlanOverrides;
use commands::TargetArgs;
use fxlink_resolve::LayoutTable;
use fxlink_rules::FailurePolicy;
use manifest::FxlinkManifest;

#[derive(Parser)]
#[command(name = "fxlink", version, about = "FaceFX runtime linking for engine builds")]
struct Cli {
    /// Log resolver decisions (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter fxlink.toml in the current directory
    Init {
        /// Library module directory, relative to the project
        #[arg(long, default_value = ".")]
        module_dir: String,
    },
    /// Locate the runtime library for a build request
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Produce module rules and engine definitions for a build request
    Plan {
        #[command(flatten)]
        target: TargetArgs,
        /// Plan an editor build
        #[arg(long)]
        editor: bool,
        /// Compile with Wwise audio support
        #[arg(long)]
        wwise: bool,
        /// Switch the integration off
        #[arg(long)]
        disable: bool,
        /// Failure policy (strict, permissive)
        #[arg(long)]
        policy: Option<FailurePolicy>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Inspect host platforms
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// Work with layout tables
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    /// Check the project and runtime bundle
    Doctor {
        /// Check a single platform
        #[arg(long)]
        platform: Option<String>,
    },
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List host platforms and their FaceFX support
    List,
    /// Show the layout of one platform
    Describe {
        /// Platform name
        name: String,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the builtin layout table as TOML
    Template,
    /// Validate a layout table file
    Validate {
        /// Path to the layout TOML file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { module_dir } => commands::init::run(&cwd, &module_dir),

        Commands::Resolve { target, format } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::resolve::run(
                &project_dir,
                &manifest.unwrap_or_default(),
                &target,
                format.as_deref(),
            )
        }

        Commands::Plan {
            target,
            editor,
            wwise,
            disable,
            policy,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let overrides = PlanOverrides {
                editor,
                wwise,
                disable,
                policy,
            };
            commands::plan::run(
                &project_dir,
                &manifest.unwrap_or_default(),
                &target,
                &overrides,
                format.as_deref(),
            )
        }

        Commands::Platform { action } => {
            let layout = project_layout(&cwd)?;
            match action {
                PlatformAction::List => commands::platform::list(&layout),
                PlatformAction::Describe { name } => commands::platform::describe(&name, &layout),
            }
        }

        Commands::Layout { action } => match action {
            LayoutAction::Template => commands::layout::template(),
            LayoutAction::Validate { path } => commands::layout::validate(&cwd.join(path)),
        },

        Commands::Doctor { platform } => commands::doctor::run(&cwd, platform.as_deref()),
    }
}

/// The project's layout table, or the builtin one outside a project.
fn project_layout(cwd: &Path) -> anyhow::Result<LayoutTable> {
    match load_manifest_optional(cwd)? {
        (Some(manifest), Some(dir)) => manifest.layout(&dir),
        _ => Ok(LayoutTable::builtin()),
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<FxlinkManifest>, Option<PathBuf>)> {
    match FxlinkManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => {
            tracing::debug!(start = %cwd.display(), "no fxlink.toml found, using defaults");
            Ok((None, None))
        }
    }
}
