//! Dialog trees to voice-line table

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::csv::{self, VoiceLineGroup, VoiceLineRecord, VoiceLineTable, clip_name};
use crate::tree::{Diagnostic, Diagnostics, DialogTree};

/// Character name used when no tree has one
pub const UNKNOWN_CHARACTER: &str = "Unknown";

/// Result of a CSV export
#[derive(Debug, Clone)]
pub struct CsvExportOutcome {
    pub table: VoiceLineTable,
    /// Character the table is named after
    pub character: String,
    /// Written file, when exported to disk
    pub path: Option<PathBuf>,
    pub diagnostics: Diagnostics,
}

/// `formatting_<character>.csv`
#[must_use]
pub fn csv_file_name(character: &str) -> String {
    format!("formatting_{character}.csv")
}

/// Build the voice-line table for a group of trees sharing a character.
///
/// One row per node, in tree order then node order. Trees without a character
/// are reported and use the table's character in their clip names.
///
/// # Errors
/// Returns [`Error::NoTrees`] if `trees` is empty.
pub fn voice_line_table(trees: &[DialogTree]) -> Result<CsvExportOutcome> {
    if trees.is_empty() {
        return Err(Error::NoTrees);
    }

    let mut diagnostics = Diagnostics::new();
    for tree in trees.iter().filter(|t| t.character.is_none()) {
        diagnostics.push(Diagnostic::MissingCharacter { tree: tree.name.clone() });
    }

    let character = trees
        .iter()
        .find_map(|t| t.character.as_ref())
        .map_or_else(|| UNKNOWN_CHARACTER.to_string(), |c| c.name.clone());

    let groups = trees
        .iter()
        .map(|tree| {
            let speaker = tree.character.as_ref().map_or(character.as_str(), |c| c.name.as_str());
            VoiceLineGroup {
                name: tree.name.clone(),
                records: tree
                    .nodes
                    .values()
                    .map(|node| VoiceLineRecord {
                        dialog_name: Some(tree.name.clone()),
                        character: Some(speaker.to_string()),
                        dialog_line: Some(node.dialog_line.clone()),
                        audio_clip_name: Some(clip_name(speaker, &tree.name, &node.id)),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(CsvExportOutcome {
        table: VoiceLineTable { groups },
        character,
        path: None,
        diagnostics,
    })
}

/// Write `formatting_<character>.csv` into `dir`
///
/// # Errors
/// Returns an error if there are no trees or the file cannot be written.
pub fn export_csv<P: AsRef<Path>>(trees: &[DialogTree], dir: P) -> Result<CsvExportOutcome> {
    let mut outcome = voice_line_table(trees)?;
    let path = dir.as_ref().join(csv_file_name(&outcome.character));
    csv::write_voice_lines(&outcome.table, &path)?;

    tracing::info!(
        "Exported {} voice lines for {} to {}",
        outcome.table.record_count(),
        outcome.character,
        path.display()
    );
    outcome.path = Some(path);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Character, DialogNode, NodeKind};

    fn tree(name: &str, character: Option<&str>, ids: &[&str]) -> DialogTree {
        let mut tree = DialogTree::new(name);
        tree.character = character.map(Character::new);
        for id in ids {
            tree.add_node(DialogNode::new(*id, NodeKind::PlayerLine).with_line(format!("line {id}")))
                .unwrap();
        }
        tree
    }

    #[test]
    fn test_rows_in_tree_then_node_order() {
        let trees = [tree("Greeting", Some("HILDE"), &["1", "2"]), tree("Farewell", Some("HILDE"), &["9"])];
        let outcome = voice_line_table(&trees).unwrap();

        assert_eq!(outcome.character, "HILDE");
        assert_eq!(outcome.table.record_count(), 3);
        let second = &outcome.table.groups[0].records[1];
        assert_eq!(second.audio_clip_name.as_deref(), Some("HILDE-Greeting-Take_0-ID_2"));
        assert_eq!(outcome.table.groups[1].name, "Farewell");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_character_is_reported() {
        let trees = [tree("Greeting", None, &["1"]), tree("Farewell", Some("KIM"), &["2"])];
        let outcome = voice_line_table(&trees).unwrap();
        assert_eq!(outcome.character, "KIM");
        assert_eq!(
            outcome.diagnostics.iter().next(),
            Some(&Diagnostic::MissingCharacter { tree: "Greeting".into() })
        );
        let record = &outcome.table.groups[0].records[0];
        assert_eq!(record.audio_clip_name.as_deref(), Some("KIM-Greeting-Take_0-ID_1"));
    }

    #[test]
    fn test_export_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = export_csv(&[tree("Greeting", Some("PAUL"), &["1"])], dir.path()).unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path.file_name().unwrap(), "formatting_PAUL.csv");
        assert!(path.exists());
    }
}
