//! # DialogBuilder
//!
//! Graph and layout core for authoring branching dialog trees, with round-trip
//! interchange to Scapple mind maps and voice-line spreadsheets.
//!
//! ## Supported Formats
//!
//! - **SCAP** - Scapple mind-map documents (import and export)
//! - **CSV** - Voice-line tables for recording sessions (import and export)
//! - **JSON** - Dialog tree snapshots and the original-positions sidecar
//!
//! ## Quick Start
//!
//! ### Importing a Mind Map
//!
//! ```no_run
//! use dialogbuilder::converter::{ImportOptions, import_scap_file};
//! use dialogbuilder::layout::LayoutPolicy;
//!
//! let options = ImportOptions::default()
//!     .with_layout(LayoutPolicy::Subtree, LayoutPolicy::Subtree.default_params());
//! let outcome = import_scap_file("greeting.scap", &options)?;
//! println!("{} nodes, {} warnings", outcome.tree.node_count(), outcome.diagnostics.len());
//! # Ok::<(), dialogbuilder::Error>(())
//! ```
//!
//! ### Naming and Layout
//!
//! ```
//! use dialogbuilder::prelude::*;
//!
//! let mut tree = DialogTree::new("greeting");
//! tree.add_node(DialogNode::new("1", NodeKind::CharacterLine))?;
//! tree.add_node(DialogNode::new("2", NodeKind::PlayerLine))?;
//! tree.connect("1", "2")?;
//! tree.refresh_start_nodes();
//!
//! assign_names(&mut tree, NamingScheme::Numeric);
//! assert_eq!(tree.get_node("2").unwrap().name.as_deref(), Some("11"));
//!
//! apply_layout(&mut tree, LayoutPolicy::Level, &LayoutPolicy::Level.default_params());
//! # Ok::<(), dialogbuilder::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `dialogbuilder` command-line binary

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod layout;
pub mod naming;
pub mod tree;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::tree::{
        Character, Diagnostic, Diagnostics, DialogNode, DialogTree, NodeKind, Position, Severity,
        SpanningForest, check_structure,
    };

    pub use crate::formats::csv::{VoiceLineRecord, VoiceLineTable, read_voice_lines, write_voice_lines};
    pub use crate::formats::scap::{ScapDocument, ScapNote, read_scap, write_scap};
    pub use crate::formats::{OriginalPositions, read_positions, read_tree, write_tree};

    pub use crate::converter::{
        AudioLibrary, ExportOptions, ExportVariant, ImportOptions, ImportOutcome, apply_voice_lines,
        export_csv, export_scap, export_scap_file, import_csv_file, import_scap, import_scap_file,
    };
    pub use crate::layout::{Layout, LayoutParams, LayoutPolicy, apply_layout, compute_layout};
    pub use crate::naming::{NamingScheme, assign_names, generate_names};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
