//! Scapple document to dialog tree

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::formats::positions::{self, OriginalPositions};
use crate::formats::scap::{self, ScapDocument};
use crate::layout::{self, LayoutParams, LayoutPolicy};
use crate::tree::traversal::bfs_depths;
use crate::tree::{Character, Diagnostic, Diagnostics, DialogNode, DialogTree, NodeKind, Position, check_structure};

/// Known speaker names used when none are configured
pub const DEFAULT_CHARACTER_NAMES: [&str; 4] = ["HILDE", "PAUL", "KIM", "GOTTLOB"];

/// Options for building a tree from a Scapple document
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Speaker names; a note whose first line contains one is a character line
    pub character_names: Vec<String>,
    /// Character the resulting tree belongs to
    pub character: Option<String>,
    /// Re-layout after import; `None` keeps the positions from the file
    pub layout: Option<(LayoutPolicy, LayoutParams)>,
    /// Write the original positions next to the imported file
    pub write_sidecar: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            character_names: DEFAULT_CHARACTER_NAMES.iter().map(ToString::to_string).collect(),
            character: None,
            layout: None,
            write_sidecar: true,
        }
    }
}

impl ImportOptions {
    #[must_use]
    pub fn with_layout(mut self, policy: LayoutPolicy, params: LayoutParams) -> Self {
        self.layout = Some((policy, params));
        self
    }
}

/// Result of an import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub tree: DialogTree,
    /// BFS depth of every note reachable from a root, from the edge lists
    pub depths: IndexMap<String, usize>,
    /// Positions as authored in the document, in note order
    pub original_positions: OriginalPositions,
    pub diagnostics: Diagnostics,
}

/// Classification of a note's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteText {
    pub kind: NodeKind,
    pub speaker: Option<String>,
    pub dialog_line: String,
}

/// Split a note's text into speaker and line.
///
/// The first line is searched (case-sensitively) for any of `names`; a hit makes
/// the note a character line. Everything after the first line, trimmed, is the
/// dialog line. A single-line note keeps its whole text as the line.
#[must_use]
pub fn classify_note(text: &str, names: &[String]) -> NoteText {
    let (first_line, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first.trim(), rest),
        None => (text.trim(), text),
    };

    let speaker = if first_line.is_empty() {
        None
    } else {
        names
            .iter()
            .find(|name| !name.is_empty() && first_line.contains(name.as_str()))
            .cloned()
    };

    NoteText {
        kind: if speaker.is_some() {
            NodeKind::CharacterLine
        } else {
            NodeKind::PlayerLine
        },
        speaker,
        dialog_line: rest.trim().to_string(),
    }
}

/// Build a dialog tree from a parsed Scapple document.
///
/// Duplicate note ids keep the first note. Self-edges are ignored and edges to
/// unknown ids are dropped with a [`Diagnostic::DanglingEdge`]. Structural
/// findings (several start nodes, several parents, orphans) are reported but
/// never abort the import.
///
/// # Errors
/// Returns an error only if the tree cannot be assembled from the validated notes.
pub fn import_scap(doc: &ScapDocument, name: &str, options: &ImportOptions) -> Result<ImportOutcome> {
    tracing::info!("Importing {} notes into '{name}'", doc.notes.len());
    let mut diagnostics = Diagnostics::new();

    // first pass: unique notes
    let mut notes = Vec::with_capacity(doc.notes.len());
    let mut known: HashSet<&str> = HashSet::new();
    for note in &doc.notes {
        if known.insert(note.id.as_str()) {
            notes.push(note);
        } else {
            diagnostics.push(Diagnostic::DuplicateNoteId { id: note.id.clone() });
        }
    }

    // validated edge lists, shared by root/depth inference and wiring
    let mut edges: IndexMap<&str, Vec<&str>> = IndexMap::new();
    let mut targeted: HashSet<&str> = HashSet::new();
    for note in &notes {
        let list = edges.entry(note.id.as_str()).or_default();
        for target in &note.points_to {
            let target = target.trim();
            if target.is_empty() || target == note.id {
                continue;
            }
            if !known.contains(target) {
                diagnostics.push(Diagnostic::DanglingEdge {
                    from: note.id.clone(),
                    to: target.to_string(),
                });
                continue;
            }
            if !list.contains(&target) {
                list.push(target);
                targeted.insert(target);
            }
        }
    }

    let adjacency: IndexMap<String, Vec<String>> = edges
        .iter()
        .map(|(id, children)| (id.to_string(), children.iter().map(ToString::to_string).collect()))
        .collect();
    let roots: Vec<&str> = notes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| !targeted.contains(id))
        .collect();
    let depths = bfs_depths(roots.iter().copied(), |id| {
        adjacency.get(id).map_or(&[][..], Vec::as_slice)
    });

    let mut tree = DialogTree::new(name);
    tree.character = options.character.as_deref().map(Character::new);
    let mut original_positions = OriginalPositions::default();

    for note in &notes {
        let text = classify_note(&note.text, &options.character_names);
        // only authored, readable positions go to the sidecar
        let authored = note.position.as_deref().and_then(|raw| {
            let parsed = Position::parse_pair(raw);
            if parsed.is_none() {
                diagnostics.push(Diagnostic::InvalidPosition {
                    id: note.id.clone(),
                    value: raw.to_string(),
                });
            }
            parsed
        });
        if let Some(position) = authored {
            original_positions.push(note.id.clone(), position);
        }
        let position = authored.unwrap_or(Position::ZERO);

        let mut node = DialogNode::new(note.id.clone(), text.kind).with_line(text.dialog_line);
        node.speaker = text.speaker;
        node.position = position;
        tree.add_node(node)?;
    }

    // second pass: wire children from the edge lists
    for (parent, children) in &adjacency {
        for child in children {
            tracing::debug!("Connecting node {parent} -> {child}");
            tree.connect(parent, child)?;
        }
    }

    tree.refresh_start_nodes();
    diagnostics.extend(check_structure(&tree));

    if let Some((policy, params)) = options.layout {
        layout::apply_layout(&mut tree, policy, &params);
    }

    tracing::info!(
        "Imported '{}': {} nodes, {} edges, {} start node(s)",
        tree.name,
        tree.node_count(),
        tree.edge_count(),
        tree.start_nodes.len()
    );

    Ok(ImportOutcome {
        tree,
        depths,
        original_positions,
        diagnostics,
    })
}

/// Read a `.scap` file and build its tree, named after the file stem.
///
/// When `options.write_sidecar` is set, the original positions are written to
/// `<stem>_original_positions.json` next to the file. Nothing is written if the
/// document fails to parse.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or the sidecar cannot be written.
pub fn import_scap_file<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<ImportOutcome> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;

    let doc = scap::read_scap(path)?;
    let outcome = import_scap(&doc, &name, options)?;

    if options.write_sidecar {
        let sidecar = positions::sidecar_path(path)?;
        positions::write_positions(&outcome.original_positions, &sidecar)?;
        tracing::debug!("Wrote original positions to {}", sidecar.display());
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::scap::{ScapNote, parse_scap};

    fn names() -> Vec<String> {
        DEFAULT_CHARACTER_NAMES.iter().map(ToString::to_string).collect()
    }

    fn note(id: &str, text: &str, points_to: &[&str]) -> ScapNote {
        let mut note = ScapNote::new(id, text);
        note.points_to = points_to.iter().map(ToString::to_string).collect();
        note
    }

    #[test]
    fn test_classify_note() {
        let hilde = classify_note("A [HILDE]\n  Hello there.  \nSecond line", &names());
        assert_eq!(hilde.kind, NodeKind::CharacterLine);
        assert_eq!(hilde.speaker.as_deref(), Some("HILDE"));
        assert_eq!(hilde.dialog_line, "Hello there.  \nSecond line");

        let player = classify_note("B\nSure.", &names());
        assert_eq!(player.kind, NodeKind::PlayerLine);
        assert_eq!(player.dialog_line, "Sure.");

        // case-sensitive
        assert_eq!(classify_note("hilde\nx", &names()).kind, NodeKind::PlayerLine);

        let single = classify_note("  Just one line ", &names());
        assert_eq!(single.dialog_line, "Just one line");
    }

    #[test]
    fn test_chain_depths_and_start_node() {
        let mut doc = ScapDocument::new();
        doc.notes = vec![note("1", "x", &["2"]), note("2", "y", &["3"]), note("3", "z", &[])];
        let outcome = import_scap(&doc, "chain", &ImportOptions::default()).unwrap();

        assert_eq!(outcome.tree.start_nodes, vec!["1".to_string()]);
        assert_eq!(outcome.depths["1"], 0);
        assert_eq!(outcome.depths["2"], 1);
        assert_eq!(outcome.depths["3"], 2);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_dangling_and_self_edges() {
        let mut doc = ScapDocument::new();
        doc.notes = vec![note("1", "x", &["1", "9", "2"]), note("2", "y", &[])];
        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();

        assert_eq!(outcome.tree.child_ids("1"), ["2".to_string()]);
        let diags: Vec<_> = outcome.diagnostics.iter().collect();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].to_string(),
            "target node id '9' not found for connection from '1'"
        );
    }

    #[test]
    fn test_duplicate_note_keeps_first() {
        let mut doc = ScapDocument::new();
        doc.notes = vec![note("1", "first", &[]), note("1", "second", &[])];
        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();
        assert_eq!(outcome.tree.node_count(), 1);
        assert_eq!(outcome.tree.get_node("1").unwrap().dialog_line, "first");
        assert!(
            outcome
                .diagnostics
                .iter()
                .any(|d| matches!(d, Diagnostic::DuplicateNoteId { id } if id == "1"))
        );
    }

    #[test]
    fn test_depth_roots_match_start_nodes() {
        // attribute and element edge lists merged, with a cycle and a second parent
        let xml = r#"<ScappleDocument><Notes>
            <Note ID="1" PointsToNoteIDs="2"><String>a</String><PointsToNoteIDs>3</PointsToNoteIDs></Note>
            <Note ID="2"><String>b</String><PointsToNoteIDs>3</PointsToNoteIDs></Note>
            <Note ID="3"><String>c</String></Note>
            <Note ID="4" PointsToNoteIDs="5"><String>d</String></Note>
            <Note ID="5" PointsToNoteIDs="4"><String>e</String></Note>
        </Notes></ScappleDocument>"#;
        let doc = parse_scap(xml).unwrap();
        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();

        let depth_roots: Vec<String> = outcome
            .depths
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(depth_roots, outcome.tree.start_nodes);
        assert_eq!(outcome.tree.start_nodes, vec!["1".to_string()]);
        assert_eq!(outcome.tree.child_ids("1"), ["2".to_string(), "3".to_string()]);

        let diags: Vec<_> = outcome.diagnostics.iter().cloned().collect();
        assert!(diags.contains(&Diagnostic::MultipleParents {
            id: "3".into(),
            parents: vec!["1".into(), "2".into()],
        }));
        assert!(diags.contains(&Diagnostic::OrphanNode { id: "4".into() }));
    }

    #[test]
    fn test_invalid_position_falls_back_to_zero() {
        let mut doc = ScapDocument::new();
        let mut bad = note("1", "x", &[]);
        bad.position = Some("twelve,3".to_string());
        let mut good = note("2", "y", &[]);
        good.position = Some("12.5,-3.0".to_string());
        doc.notes = vec![bad, good];

        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();
        assert_eq!(outcome.tree.get_node("1").unwrap().position, Position::ZERO);
        assert_eq!(outcome.tree.get_node("2").unwrap().position, Position::new(12.5, -3.0));
        assert_eq!(outcome.original_positions.get("2"), Some(Position::new(12.5, -3.0)));
        assert_eq!(outcome.diagnostics.len(), 2); // invalid position + two start nodes
    }

    #[test]
    fn test_sidecar_skips_missing_and_unreadable_positions() {
        let mut doc = ScapDocument::new();
        let mut bad = note("1", "x", &[]);
        bad.position = Some("twelve,3".to_string());
        let mut good = note("2", "y", &[]);
        good.position = Some("4,5".to_string());
        let unplaced = note("3", "z", &[]);
        doc.notes = vec![bad, good, unplaced];

        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();
        assert_eq!(outcome.original_positions.len(), 1);
        assert_eq!(outcome.original_positions.get("1"), None);
        assert_eq!(outcome.original_positions.get("3"), None);
        assert_eq!(outcome.tree.get_node("3").unwrap().position, Position::ZERO);
    }

    #[test]
    fn test_oversized_range_becomes_dangling_edge() {
        let doc = parse_scap(
            r#"<ScappleDocument><Notes>
                <Note ID="1" PointsToNoteIDs="2, 1-4294967295"><String>x</String></Note>
                <Note ID="2"><String>y</String></Note>
            </Notes></ScappleDocument>"#,
        )
        .unwrap();
        let outcome = import_scap(&doc, "t", &ImportOptions::default()).unwrap();
        assert_eq!(outcome.tree.child_ids("1"), ["2".to_string()]);
        assert_eq!(
            outcome.diagnostics.iter().next(),
            Some(&Diagnostic::DanglingEdge {
                from: "1".into(),
                to: "1-4294967295".into()
            })
        );
    }

    #[test]
    fn test_layout_after_import() {
        let mut doc = ScapDocument::new();
        doc.notes = vec![note("1", "x", &["2", "3"]), note("2", "y", &[]), note("3", "z", &[])];
        let options = ImportOptions::default().with_layout(LayoutPolicy::Level, LayoutPolicy::Level.default_params());
        let outcome = import_scap(&doc, "t", &options).unwrap();
        assert_eq!(outcome.tree.get_node("2").unwrap().position, Position::new(-250.0, 120.0));
        assert_eq!(outcome.tree.get_node("3").unwrap().position, Position::new(250.0, 120.0));
    }
}
