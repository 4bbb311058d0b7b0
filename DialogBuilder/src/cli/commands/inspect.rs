//! Inspect a tree file or Scapple document

use std::path::Path;

use anyhow::Context;
use console::style;

use super::load_tree;
use crate::cli::progress::print_diagnostics;
use crate::config::Config;
use crate::converter::import_scap;
use crate::formats::scap::read_scap;
use crate::tree::traversal::{levels, tree_depths};
use crate::tree::{DialogTree, check_structure};

pub fn execute(source: &Path, config: &Config) -> anyhow::Result<()> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let (tree, diagnostics) = match ext.as_str() {
        "scap" => {
            let doc = read_scap(source).with_context(|| format!("Failed to read {}", source.display()))?;
            let mut options = config.import_options()?;
            options.layout = None;
            options.write_sidecar = false;
            let name = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let outcome = import_scap(&doc, &name, &options)?;
            (outcome.tree, outcome.diagnostics)
        }
        "json" => {
            let tree = load_tree(source)?;
            let diagnostics = check_structure(&tree);
            (tree, diagnostics)
        }
        _ => anyhow::bail!("Unsupported file: {}. Use: .scap or .json", source.display()),
    };

    print_summary(&tree);
    print_diagnostics(&diagnostics);
    Ok(())
}

fn print_summary(tree: &DialogTree) {
    println!("{}", style(&tree.name).bold());
    if let Some(character) = &tree.character {
        println!("  Character:   {}", character.name);
    }
    println!("  Nodes:       {}", tree.node_count());
    println!("  Edges:       {}", tree.edge_count());
    println!("  Start nodes: {}", tree.start_nodes.join(", "));

    let depths = tree_depths(tree);
    for (depth, ids) in levels(&depths) {
        let labels: Vec<String> = ids
            .iter()
            .filter_map(|id| tree.get_node(id))
            .map(|node| match &node.name {
                Some(name) => format!("{} ({name})", node.id),
                None => node.id.clone(),
            })
            .collect();
        println!("  {} {}", style(format!("[{depth}]")).dim(), labels.join(", "));
    }
}
