//! CLI subcommand definitions

mod execute;
pub mod inspect;
pub mod scap;
pub mod tree;
pub mod voice_lines;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Subcommand;

use crate::converter::ExportVariant;
use crate::formats::read_tree;
use crate::layout::LayoutPolicy;
use crate::naming::NamingScheme;
use crate::tree::DialogTree;

/// Read every tree file, naming the one that failed
pub(crate) fn load_trees(paths: &[PathBuf]) -> anyhow::Result<Vec<DialogTree>> {
    paths.iter().map(|path| load_tree(path)).collect()
}

pub(crate) fn load_tree(path: &Path) -> anyhow::Result<DialogTree> {
    read_tree(path).with_context(|| format!("Failed to read tree file: {}", path.display()))
}

/// Bail unless `path` has the given extension (case-insensitive)
pub(crate) fn require_extension(path: &Path, expected: &str) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if ext != expected {
        anyhow::bail!("Expected a .{} file, got {}", expected, path.display());
    }
    Ok(())
}

/// Layout choice on the command line; `none` keeps authored positions
#[derive(Clone, Copy, Debug)]
pub struct LayoutArg(pub Option<LayoutPolicy>);

impl FromStr for LayoutArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(LayoutArg(None)),
            other => other
                .parse::<LayoutPolicy>()
                .map(|policy| LayoutArg(Some(policy)))
                .map_err(|_| format!("Unknown layout '{s}'. Valid: level, subtree, simple, none")),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a Scapple document as a dialog tree (JSON)
    ImportScap {
        /// Source .scap file
        source: PathBuf,

        /// Output tree file (default: <source stem>.json next to the source)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-layout after import (level, subtree, simple, none); overrides the config
        #[arg(short, long)]
        layout: Option<LayoutArg>,

        /// Character the tree belongs to
        #[arg(short, long)]
        character: Option<String>,

        /// Do not write <stem>_original_positions.json
        #[arg(long)]
        no_sidecar: bool,
    },

    /// Export dialog trees to a single Scapple document
    ExportScap {
        /// Tree files (JSON)
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Output .scap file
        #[arg(short, long)]
        output: PathBuf,

        /// Note style (plain, labeled); overrides the config
        #[arg(short, long)]
        variant: Option<ExportVariant>,
    },

    /// Export voice lines for a character to formatting_<character>.csv
    ExportCsv {
        /// Tree files (JSON)
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Apply a voice-line table to tree files (updated in place)
    ImportCsv {
        /// Voice-line .csv file
        csv: PathBuf,

        /// Tree files (JSON)
        #[arg(required = true)]
        trees: Vec<PathBuf>,

        /// Directory of recorded clips to bind by name
        #[arg(short, long)]
        audio_dir: Option<PathBuf>,
    },

    /// Lay out a tree file
    Layout {
        /// Tree file (JSON)
        tree: PathBuf,

        /// Policy (level, subtree, simple); defaults to the config
        #[arg(short, long)]
        policy: Option<LayoutPolicy>,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assign display names to the nodes of a tree file
    Name {
        /// Tree file (JSON)
        tree: PathBuf,

        /// Naming scheme (numeric, letters)
        #[arg(short, long, default_value = "numeric")]
        scheme: NamingScheme,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show structure and diagnostics for a tree (.json) or Scapple document (.scap)
    Inspect {
        /// Source file
        source: PathBuf,
    },
}
