//! The audit run: inventory, per-scene pipeline, report emission
//!
//! Scenes are processed strictly one at a time in lexical path order. The
//! script inventory is built once before the first scene and threaded
//! through every scene pass; the unused report reads its end state.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scene_scan::{SceneError, ScriptInventory, build_tree, scan_scene};
use walkdir::WalkDir;

use crate::error::AuditError;
use crate::inventory::{InventoryOptions, build_inventory};
use crate::report;

/// Scene documents live here, relative to the project root
pub const SCENES_DIR: &str = "Assets/Scenes";

/// Script sources live here, relative to the project root
pub const SCRIPTS_DIR: &str = "Assets/Scripts";

/// Scene document extension
pub const SCENE_EXT: &str = "unity";

/// Suffix of per-scene dump files
pub const DUMP_SUFFIX: &str = ".scene.dump";

/// File name of the unused-scripts report
pub const UNUSED_REPORT: &str = "unused_scripts.csv";

/// Inputs of one audit run
#[derive(Debug, Clone)]
pub struct AuditArgs {
    /// Project root containing `Assets/Scenes` and `Assets/Scripts`
    pub project_root: PathBuf,
    /// Directory receiving the dumps and the unused-scripts report
    pub output_dir: PathBuf,
    /// Seed scripts declaring serialized fields as used
    pub count_serialized_as_used: bool,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    /// Scenes dumped successfully
    pub scenes_written: usize,
    /// Scenes skipped for structural errors
    pub scenes_skipped: usize,
    /// Inventory entries never referenced by any scene
    pub unused_scripts: usize,
}

/// How one scene pass failed
enum SceneFailure {
    /// The scene is internally inconsistent; it is skipped and the run
    /// continues
    Structural(SceneError),
    /// Underlying filesystem failure; aborts the whole run
    Io { path: PathBuf, source: std::io::Error },
}

/// Run the audit: build the inventory, process every scene, emit reports.
pub fn execute(args: &AuditArgs) -> Result<AuditSummary, AuditError> {
    let scenes_dir = args.project_root.join(SCENES_DIR);
    let scripts_dir = args.project_root.join(SCRIPTS_DIR);
    for dir in [&scenes_dir, &scripts_dir] {
        if !dir.is_dir() {
            return Err(AuditError::MissingDir(dir.to_path_buf()));
        }
    }

    // The inventory is a precondition for every scene pass; any failure here
    // aborts before parsing begins.
    let options = InventoryOptions {
        count_serialized_as_used: args.count_serialized_as_used,
    };
    let mut inventory = build_inventory(&args.project_root, &scripts_dir, options)?;
    tracing::info!("inventory: {} scripts", inventory.len());

    std::fs::create_dir_all(&args.output_dir).map_err(|source| AuditError::Path {
        path: args.output_dir.clone(),
        source,
    })?;

    let mut summary = AuditSummary::default();
    for scene in scene_files(&scenes_dir) {
        match process_scene(&scene, &args.output_dir, &mut inventory) {
            Ok(()) => summary.scenes_written += 1,
            Err(SceneFailure::Structural(err)) => {
                tracing::error!("skipping {}: {err}", scene.display());
                summary.scenes_skipped += 1;
            }
            Err(SceneFailure::Io { path, source }) => {
                return Err(AuditError::Path { path, source });
            }
        }
    }

    let report_path = args.output_dir.join(UNUSED_REPORT);
    write_unused_report(&inventory, &report_path)
        .map_err(|source| AuditError::Path { path: report_path, source })?;

    summary.unused_scripts = inventory.unused().count();
    Ok(summary)
}

/// Parse one scene, update the shared inventory, write its dump.
///
/// The scene is parsed and resolved fully before anything is written, so a
/// structural failure leaves no partial dump behind.
fn process_scene(
    scene: &Path,
    output_dir: &Path,
    inventory: &mut ScriptInventory,
) -> Result<(), SceneFailure> {
    tracing::info!("parsing scene {}", scene.display());
    let content = std::fs::read_to_string(scene).map_err(|source| SceneFailure::Io {
        path: scene.to_path_buf(),
        source,
    })?;

    let records = scan_scene(&content).map_err(SceneFailure::Structural)?;
    let tree = build_tree(&records).map_err(SceneFailure::Structural)?;

    for behavior in &records.behaviors {
        if !inventory.mark_used(&behavior.guid) {
            tracing::warn!(
                "{}: behavior references non-project script {}",
                scene.display(),
                behavior.guid
            );
        }
    }

    let dump_path = dump_path_for(scene, output_dir);
    let io_err = |source| SceneFailure::Io {
        path: dump_path.clone(),
        source,
    };
    let file = File::create(&dump_path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    report::write_scene_dump(&tree, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    tracing::info!(
        "wrote {} ({} nodes)",
        dump_path.display(),
        tree.node_count()
    );
    Ok(())
}

fn write_unused_report(inventory: &ScriptInventory, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    report::write_unused_report(inventory, &mut out)?;
    out.flush()
}

/// All scene documents under the scenes directory, lexically sorted for
/// reproducible output.
fn scene_files(scenes_dir: &Path) -> Vec<PathBuf> {
    let mut scenes: Vec<PathBuf> = WalkDir::new(scenes_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(SCENE_EXT))
        .collect();
    scenes.sort();
    scenes
}

/// Dump path for a scene: `Level1.unity` -> `<output>/Level1.scene.dump`
fn dump_path_for(scene: &Path, output_dir: &Path) -> PathBuf {
    let stem = scene.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{stem}{DUMP_SUFFIX}"))
}
