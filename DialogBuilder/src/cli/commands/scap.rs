//! Scapple import and export commands

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{load_trees, require_extension};
use crate::cli::progress::{ARRANGE, READ, Steps, WRITE, detail, print_diagnostics};
use crate::config::Config;
use crate::converter::{ExportVariant, export_scap_file, import_scap_file};
use crate::formats::{sidecar_path, write_tree};
use crate::layout::LayoutPolicy;

/// Import a `.scap` file and write the tree as JSON.
///
/// `layout` is `Some(None)` when the user asked for no layout, and `None` when
/// the config decides.
pub fn import(
    source: &Path,
    output: Option<&Path>,
    layout: Option<Option<LayoutPolicy>>,
    character: Option<&str>,
    no_sidecar: bool,
    config: &Config,
) -> anyhow::Result<()> {
    require_extension(source, "scap")?;
    let mut steps = Steps::new(3);

    let mut options = config.import_options()?;
    if let Some(choice) = layout {
        options.layout = choice.map(|policy| (policy, config.layout.params(policy)));
    }
    options.character = character.map(ToString::to_string);
    if no_sidecar {
        options.write_sidecar = false;
    }

    let output: PathBuf = output.map_or_else(|| source.with_extension("json"), Path::to_path_buf);

    steps.next(READ, format!("Reading {}", source.display()));
    let outcome = import_scap_file(source, &options)
        .with_context(|| format!("Failed to import {}", source.display()))?;

    let tree = &outcome.tree;
    steps.next(
        ARRANGE,
        format!(
            "{} nodes, {} edges, {} start node(s)",
            tree.node_count(),
            tree.edge_count(),
            tree.start_nodes.len()
        ),
    );
    match options.layout {
        Some((policy, _)) => detail(format!("laid out with the {policy} policy")),
        None => detail("authored positions kept"),
    }

    steps.next(WRITE, format!("Writing {}", output.display()));
    write_tree(tree, &output)?;
    if options.write_sidecar {
        detail(format!("original positions in {}", sidecar_path(source)?.display()));
    }

    print_diagnostics(&outcome.diagnostics);
    steps.finish();
    Ok(())
}

/// Export tree files into one `.scap` document
pub fn export(
    sources: &[PathBuf],
    output: &Path,
    variant: Option<ExportVariant>,
    config: &Config,
) -> anyhow::Result<()> {
    require_extension(output, "scap")?;
    let mut steps = Steps::new(2);

    let mut options = config.export_options();
    if let Some(variant) = variant {
        options.variant = variant;
    }

    steps.next(READ, format!("Reading {} tree file(s)", sources.len()));
    let trees = load_trees(sources)?;

    steps.next(WRITE, format!("Writing {} ({} notes)", output.display(), options.variant));
    let outcome = export_scap_file(&trees, output, &options)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    detail(format!("{} notes written", outcome.document.notes.len()));

    print_diagnostics(&outcome.diagnostics);
    steps.finish();
    Ok(())
}
