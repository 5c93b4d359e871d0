//! scene-audit - scene hierarchy dumps and unused-script detection
//!
//! Walks every scene document under `<project>/Assets/Scenes`, writes one
//! `.scene.dump` per scene into the output directory, and cross-references
//! script guids against `<project>/Assets/Scripts` to produce
//! `unused_scripts.csv`.
//!
//! # Usage
//!
//! ```bash
//! scene-audit <project-root> <output-dir>
//! ```
//!
//! # Exit codes
//!
//! - 0: clean run
//! - 1: run completed, but at least one scene was skipped for a structural
//!   error
//! - 2: usage error
//! - 3: path error (missing project directories, filesystem failure)
//! - 4: inventory error (script metadata missing or without a guid)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scene_audit::{AuditArgs, execute};

/// Scene audit tool - dumps scene hierarchies and reports unused scripts
#[derive(Parser)]
#[command(name = "scene-audit")]
#[command(about = "Dump scene hierarchies and report unused scripts")]
#[command(version)]
struct Cli {
    /// Project root (contains Assets/Scenes and Assets/Scripts)
    project_root: PathBuf,

    /// Directory receiving .scene.dump files and unused_scripts.csv
    output_dir: PathBuf,

    /// Count scripts declaring serialized fields as used even when no scene
    /// references them
    #[arg(long)]
    count_serialized_as_used: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let args = AuditArgs {
        project_root: cli.project_root,
        output_dir: cli.output_dir,
        count_serialized_as_used: cli.count_serialized_as_used,
    };

    match execute(&args) {
        Ok(summary) => {
            println!(
                "Scenes: {} written, {} skipped",
                summary.scenes_written, summary.scenes_skipped
            );
            println!("Unused scripts: {}", summary.unused_scripts);
            if summary.scenes_skipped > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
