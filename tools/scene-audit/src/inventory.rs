//! Script inventory construction from a project's scripts directory

use std::path::{Path, PathBuf};

use scene_scan::{ScriptInventory, has_serialized_state, meta_guid, meta_path};
use walkdir::WalkDir;

use crate::error::AuditError;

/// Options for inventory construction
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryOptions {
    /// Seed scripts that declare serialized fields as already used
    pub count_serialized_as_used: bool,
}

/// Build the script inventory for a project.
///
/// Every `*.cs` under `scripts_dir` gets one entry, keyed by the guid from
/// its `<name>.cs.meta` companion, with the path stored relative to
/// `project_root`. Any script without a readable guid aborts the run:
/// cross-referencing against a partial inventory would silently under-report
/// unused scripts.
pub fn build_inventory(
    project_root: &Path,
    scripts_dir: &Path,
    options: InventoryOptions,
) -> Result<ScriptInventory, AuditError> {
    let mut inventory = ScriptInventory::new();

    for script in script_files(scripts_dir) {
        let meta = meta_path(&script);
        let content =
            std::fs::read_to_string(&meta).map_err(|_| AuditError::MissingMeta(meta.clone()))?;
        let guid = meta_guid(&content)
            .ok_or_else(|| AuditError::MissingGuid(meta.clone()))?
            .to_string();

        let used = if options.count_serialized_as_used {
            let source = std::fs::read_to_string(&script).map_err(|source| AuditError::Path {
                path: script.clone(),
                source,
            })?;
            has_serialized_state(&source)
        } else {
            false
        };

        let relative = script.strip_prefix(project_root).unwrap_or(&script);
        tracing::debug!("script {} -> {}", relative.display(), guid);
        inventory.insert(guid, relative, used);
    }

    Ok(inventory)
}

/// All script sources under the scripts directory, lexically sorted so the
/// report order is reproducible across runs and platforms.
fn script_files(scripts_dir: &Path) -> Vec<PathBuf> {
    let mut scripts: Vec<PathBuf> = WalkDir::new(scripts_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("cs"))
        .collect();
    scripts.sort();
    scripts
}
