//! Report emission: per-scene hierarchy dumps and the unused-scripts CSV

use std::io::{self, Write};
use std::path::Path;

use scene_scan::{SceneTree, ScriptInventory};

/// Two-character depth marker, repeated once per level
pub const DEPTH_MARKER: &str = "--";

/// Header row of the unused-scripts report
pub const CSV_HEADER: &str = "Relative Path,GUID";

/// Write one scene's hierarchy: one node per line, pre-order, children
/// before the next sibling, root excluded. Top-level nodes carry no marker.
pub fn write_scene_dump(tree: &SceneTree, w: &mut impl Write) -> io::Result<()> {
    for (depth, name) in tree.walk() {
        writeln!(w, "{}{}", DEPTH_MARKER.repeat(depth), name)?;
    }
    Ok(())
}

/// Write the unused-scripts report. The header is always present, even when
/// every script is used.
pub fn write_unused_report(inventory: &ScriptInventory, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for entry in inventory.unused() {
        writeln!(w, "{},{}", forward_slashes(&entry.path), entry.guid)?;
    }
    Ok(())
}

/// Render a relative path with `/` separators on every platform, so reports
/// diff cleanly across machines.
pub fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
