//! Layout and naming commands on tree files

use std::path::Path;

use super::load_tree;
use crate::cli::progress::{ARRANGE, READ, Steps, WRITE, detail, print_diagnostics};
use crate::config::Config;
use crate::formats::write_tree;
use crate::layout::{LayoutPolicy, compute_layout};
use crate::naming::{NamingScheme, assign_names};

pub fn layout(
    tree_path: &Path,
    policy: Option<LayoutPolicy>,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let policy = match policy {
        Some(policy) => policy,
        None => config
            .layout
            .policy()?
            .ok_or_else(|| anyhow::anyhow!("No layout policy configured. Pass one with --policy"))?,
    };
    let params = config.layout.params(policy);
    let mut steps = Steps::new(3);

    steps.next(READ, format!("Reading {}", tree_path.display()));
    let mut tree = load_tree(tree_path)?;

    steps.next(ARRANGE, format!("Laying out {} nodes ({policy})", tree.node_count()));
    let layout = compute_layout(&tree, policy, &params);
    let unplaced = tree.node_count().saturating_sub(layout.len());
    layout.apply_to(&mut tree);
    if unplaced > 0 {
        detail(format!("{unplaced} node(s) unreachable from a start node were moved to the origin"));
    }

    let output = output.unwrap_or(tree_path);
    steps.next(WRITE, format!("Writing {}", output.display()));
    write_tree(&tree, output)?;

    steps.finish();
    Ok(())
}

pub fn name(tree_path: &Path, scheme: NamingScheme, output: Option<&Path>) -> anyhow::Result<()> {
    let mut steps = Steps::new(3);

    steps.next(READ, format!("Reading {}", tree_path.display()));
    let mut tree = load_tree(tree_path)?;

    steps.next(ARRANGE, format!("Naming {} nodes ({scheme})", tree.node_count()));
    let diagnostics = assign_names(&mut tree, scheme);

    let output = output.unwrap_or(tree_path);
    steps.next(WRITE, format!("Writing {}", output.display()));
    write_tree(&tree, output)?;

    print_diagnostics(&diagnostics);
    steps.finish();
    Ok(())
}
