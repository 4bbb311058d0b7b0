//! Dialog tree graph model
//!
//! This module provides the in-memory model every other stage works on:
//! - [`DialogTree`] owns [`DialogNode`]s in insertion order
//! - Each node is a player choice or a character line ([`NodeKind`])
//! - Start nodes are the nodes with no incoming edge
//! - [`traversal`] holds the cycle-safe walks (BFS depth, spanning forest)
//! - [`Diagnostics`] collects the non-fatal findings of an operation
//!
//! # Usage
//!
//! ```
//! use dialogbuilder::tree::{DialogNode, DialogTree, NodeKind};
//!
//! let mut tree = DialogTree::new("greeting");
//! tree.add_node(DialogNode::new("1", NodeKind::CharacterLine).with_line("Hello there.")).unwrap();
//! tree.add_node(DialogNode::new("2", NodeKind::PlayerLine).with_line("Hi!")).unwrap();
//! tree.connect("1", "2").unwrap();
//! tree.refresh_start_nodes();
//!
//! assert_eq!(tree.start_nodes, vec!["1".to_string()]);
//! ```

mod diagnostics;
pub mod traversal;
mod types;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use traversal::SpanningForest;
pub use types::*;

/// Report the structural warnings of a finished tree: several or no start nodes,
/// nodes with several parents, and nodes no start node reaches.
pub fn check_structure(tree: &DialogTree) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let start_nodes = tree.find_start_nodes();

    match start_nodes.len() {
        0 if !tree.nodes.is_empty() => diagnostics.push(Diagnostic::NoStartNodes {
            tree: tree.name.clone(),
        }),
        0 | 1 => {}
        _ => diagnostics.push(Diagnostic::MultipleStartNodes {
            tree: tree.name.clone(),
            start_nodes: start_nodes.clone(),
        }),
    }

    for (id, parents) in tree.nodes_with_multiple_parents() {
        diagnostics.push(Diagnostic::MultipleParents { id, parents });
    }

    for id in traversal::orphans(tree) {
        diagnostics.push(Diagnostic::OrphanNode { id });
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_default() {
        let tree = DialogTree::new("empty");
        assert!(tree.nodes.is_empty());
        assert!(tree.start_nodes.is_empty());
        assert!(check_structure(&tree).is_empty());
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::PlayerLine.display_name(), "Player");
        assert_eq!(NodeKind::CharacterLine.as_str(), "CharacterLine");
    }

    #[test]
    fn test_check_structure_flags_cycle_and_roots() {
        let mut tree = DialogTree::new("t");
        for id in ["a", "b", "c", "x", "y"] {
            tree.add_node(DialogNode::new(id, NodeKind::PlayerLine)).unwrap();
        }
        tree.connect("a", "b").unwrap();
        tree.connect("c", "b").unwrap();
        tree.connect("x", "y").unwrap();
        tree.connect("y", "x").unwrap();

        let diags: Vec<Diagnostic> = check_structure(&tree).into_iter().collect();
        assert!(diags.contains(&Diagnostic::MultipleStartNodes {
            tree: "t".into(),
            start_nodes: vec!["a".into(), "c".into()],
        }));
        assert!(diags.contains(&Diagnostic::MultipleParents {
            id: "b".into(),
            parents: vec!["a".into(), "c".into()],
        }));
        assert!(diags.contains(&Diagnostic::OrphanNode { id: "x".into() }));
        assert!(diags.contains(&Diagnostic::OrphanNode { id: "y".into() }));
    }
}
