//! Voice-line CSV commands

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{load_trees, require_extension};
use crate::cli::progress::{READ, Steps, VOICE, WRITE, detail, print_diagnostics, scan_spinner};
use crate::converter::{AudioLibrary, export_csv, import_csv_file};
use crate::formats::write_tree;

/// Write `formatting_<character>.csv` for the given trees
pub fn export(sources: &[PathBuf], output_dir: &Path) -> anyhow::Result<()> {
    let mut steps = Steps::new(2);

    steps.next(READ, format!("Reading {} tree file(s)", sources.len()));
    let trees = load_trees(sources)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    steps.next(WRITE, "Writing voice lines");
    let outcome = export_csv(&trees, output_dir)?;
    if let Some(path) = &outcome.path {
        detail(format!(
            "{} ({} lines for {})",
            path.display(),
            outcome.table.record_count(),
            outcome.character
        ));
    }

    print_diagnostics(&outcome.diagnostics);
    steps.finish();
    Ok(())
}

/// Apply a voice-line table to tree files and save them in place
pub fn import(csv_path: &Path, tree_paths: &[PathBuf], audio_dir: Option<&Path>) -> anyhow::Result<()> {
    require_extension(csv_path, "csv")?;
    let mut steps = Steps::new(if audio_dir.is_some() { 4 } else { 3 });

    steps.next(READ, format!("Reading {} tree file(s)", tree_paths.len()));
    let mut trees = load_trees(tree_paths)?;

    let library = match audio_dir {
        Some(dir) => {
            steps.next(READ, format!("Scanning {}", dir.display()));
            let spinner = scan_spinner("Collecting audio clips");
            let library = AudioLibrary::from_dir(dir);
            spinner.finish_and_clear();
            let library = library?;
            detail(format!("{} clip(s) found", library.len()));
            Some(library)
        }
        None => None,
    };

    steps.next(VOICE, format!("Applying {}", csv_path.display()));
    let outcome = import_csv_file(&mut trees, csv_path, library.as_ref())
        .with_context(|| format!("Failed to import {}", csv_path.display()))?;
    detail(format!("{} row(s) matched, {} clip(s) bound", outcome.matched, outcome.bound_clips));

    steps.next(WRITE, "Saving trees");
    for (tree, path) in trees.iter().zip(tree_paths) {
        write_tree(tree, path)?;
    }

    print_diagnostics(&outcome.diagnostics);
    steps.finish();
    Ok(())
}
