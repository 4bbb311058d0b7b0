//! Dialog trees to Scapple document

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::scap::{self, NoteAppearance, ScapDocument, ScapNote};
use crate::naming::letter_names;
use crate::tree::{Diagnostics, DialogNode, DialogTree, NodeKind, Position};

/// What goes on the first line of every note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportVariant {
    /// Speaker name only (empty for player lines)
    Plain,
    /// Letter label, then the speaker in brackets
    #[default]
    Labeled,
}

impl FromStr for ExportVariant {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(ExportVariant::Plain),
            "labeled" | "labelled" | "labels" => Ok(ExportVariant::Labeled),
            _ => Err(Error::UnknownOption {
                kind: "export variant",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportVariant::Plain => f.write_str("plain"),
            ExportVariant::Labeled => f.write_str("labeled"),
        }
    }
}

/// Grid used for nodes that were never positioned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub start_x: f32,
    pub start_y: f32,
    pub step_x: f32,
    /// Start a new row once x passes this
    pub wrap_x: f32,
    pub step_y: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            start_y: 100.0,
            step_x: 250.0,
            wrap_x: 1000.0,
            step_y: 150.0,
        }
    }
}

/// Row-major cursor over a [`GridParams`] grid
#[derive(Debug, Clone, Copy)]
struct GridCursor {
    grid: GridParams,
    x: f32,
    y: f32,
}

impl GridCursor {
    fn new(grid: GridParams) -> Self {
        Self {
            grid,
            x: grid.start_x,
            y: grid.start_y,
        }
    }

    fn current(&self) -> Position {
        Position::new(self.x, self.y)
    }

    fn advance(&mut self) {
        self.x += self.grid.step_x;
        if self.x > self.grid.wrap_x {
            self.x = self.grid.start_x;
            self.y += self.grid.step_y;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub variant: ExportVariant,
    pub grid: GridParams,
}

/// Result of an export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub document: ScapDocument,
    /// Per tree: node id -> note id
    pub note_ids: IndexMap<String, IndexMap<String, String>>,
    pub diagnostics: Diagnostics,
}

/// Turn trees into one Scapple document.
///
/// Notes are numbered from 1 in tree order, then node order. Each note's arrows
/// are its node's children. Nodes at exactly (0,0) are placed on the fallback
/// grid; the grid cursor advances for every node either way.
///
/// # Errors
/// Returns [`Error::NoTrees`] if `trees` is empty.
pub fn export_scap(trees: &[DialogTree], options: &ExportOptions) -> Result<ExportOutcome> {
    if trees.is_empty() {
        return Err(Error::NoTrees);
    }

    let mut document = ScapDocument::new();
    document.id = Some(uuid::Uuid::new_v4().to_string().to_uppercase());
    let mut diagnostics = Diagnostics::new();
    let mut note_ids: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    let mut cursor = GridCursor::new(options.grid);
    let mut next_id = 1usize;

    for tree in trees {
        let labels = match options.variant {
            ExportVariant::Labeled => {
                let outcome = letter_names(tree);
                diagnostics.extend(outcome.diagnostics);
                outcome.names
            }
            ExportVariant::Plain => IndexMap::new(),
        };

        let ids: IndexMap<String, String> = tree
            .nodes
            .keys()
            .enumerate()
            .map(|(i, id)| (id.clone(), (next_id + i).to_string()))
            .collect();
        next_id += ids.len();

        for (id, node) in &tree.nodes {
            let position = if node.position.is_unset() {
                cursor.current()
            } else {
                node.position
            };
            cursor.advance();

            let header = note_header(tree, node, options.variant, labels.get(id).map(String::as_str));
            let mut note = ScapNote::new(ids[id].clone(), format!("{header}\n{}", node.dialog_line));
            note.font_size = Some("12.0".to_string());
            note.position = Some(format!("{:.1},{:.1}", position.x, position.y));
            note.width = Some("200.0".to_string());
            note.appearance = Some(NoteAppearance::with_fill(match node.kind {
                NodeKind::PlayerLine => NoteAppearance::PLAYER_FILL,
                NodeKind::CharacterLine => NoteAppearance::CHARACTER_FILL,
            }));

            for child in &node.children {
                if let Some(target) = ids.get(child)
                    && !note.points_to.contains(target)
                {
                    note.points_to.push(target.clone());
                }
            }
            document.notes.push(note);
        }

        note_ids.insert(tree.name.clone(), ids);
    }

    tracing::info!("Exported {} tree(s) as {} notes", trees.len(), document.notes.len());
    Ok(ExportOutcome {
        document,
        note_ids,
        diagnostics,
    })
}

/// First note line. Character lines always name their speaker so that a
/// re-import classifies them the same way.
fn note_header(tree: &DialogTree, node: &DialogNode, variant: ExportVariant, label: Option<&str>) -> String {
    let speaker = match node.kind {
        NodeKind::CharacterLine => node
            .speaker
            .as_deref()
            .or_else(|| tree.character.as_ref().map(|c| c.name.as_str())),
        NodeKind::PlayerLine => None,
    };

    match (variant, speaker) {
        (ExportVariant::Plain, speaker) => speaker.unwrap_or_default().to_string(),
        (ExportVariant::Labeled, Some(speaker)) => format!("{} [{speaker}]", label.unwrap_or("?")),
        (ExportVariant::Labeled, None) => label.unwrap_or("?").to_string(),
    }
}

/// Export trees and write the document to disk
///
/// # Errors
/// Returns an error if there are no trees or the file cannot be written.
pub fn export_scap_file<P: AsRef<Path>>(trees: &[DialogTree], path: P, options: &ExportOptions) -> Result<ExportOutcome> {
    let outcome = export_scap(trees, options)?;
    scap::write_scap(&outcome.document, path.as_ref())?;
    tracing::info!("Wrote {}", path.as_ref().display());
    Ok(outcome)
}
