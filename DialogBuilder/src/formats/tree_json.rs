//! JSON persistence of a dialog tree

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::tree::DialogTree;

/// Read a tree saved by [`write_tree`].
///
/// Start nodes are recomputed from the edges rather than trusted from the file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid tree.
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<DialogTree> {
    let content = fs::read_to_string(path)?;
    parse_tree(&content)
}

/// # Errors
/// Returns an error if the JSON is not a valid tree.
pub fn parse_tree(content: &str) -> Result<DialogTree> {
    let mut tree: DialogTree = serde_json::from_str(content)?;
    tree.refresh_start_nodes();
    Ok(tree)
}

/// Write a tree as pretty JSON
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_tree<P: AsRef<Path>>(tree: &DialogTree, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(tree)?;
    fs::write(path, json)?;
    Ok(())
}
