//! Letter path names
//!
//! The first start node is `"0"` and its children are `"A"`, `"B"`, ... with no
//! prefix. Every other start node gets its own top-level letters, and its
//! descendants append one letter group per level (`"C"` -> `"CA"` -> `"CAB"`).

use std::collections::HashSet;

use indexmap::IndexMap;

use super::NamingOutcome;
use crate::tree::{Diagnostic, Diagnostics, DialogTree};

/// Bijective base-26: 0 -> A, 25 -> Z, 26 -> AA, 27 -> AB, ...
#[must_use]
pub fn to_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Assign letter labels to every node reachable from a start node.
///
/// Top-level letters for the other start nodes continue after the first start
/// node's children, so `"0"`'s children and the other roots never share a
/// label. Any remaining clash (possible once a node has more than 26 children)
/// gets a numeric suffix and a [`Diagnostic::LetterNameCollision`].
#[must_use]
pub fn letter_names(tree: &DialogTree) -> NamingOutcome {
    let mut names = IndexMap::new();
    let mut diagnostics = Diagnostics::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut used: HashSet<String> = HashSet::new();

    let mut roots = tree.find_start_nodes();
    if roots.is_empty() {
        roots.extend(tree.nodes.keys().next().cloned());
    }
    let first_root_children = roots
        .first()
        .map_or(0, |id| tree.child_ids(id).len());

    for (r, root) in roots.iter().enumerate() {
        let root_label = if r == 0 {
            "0".to_string()
        } else {
            to_letters(first_root_children + r - 1)
        };
        let mut stack: Vec<(&str, String, bool)> = vec![(root.as_str(), root_label, r == 0)];

        while let Some((id, label, is_zero_root)) = stack.pop() {
            let Some(node) = tree.get_node(id) else {
                continue;
            };
            if !visited.insert(id) {
                continue;
            }

            let resolved = unique_label(&label, &used);
            if resolved != label {
                diagnostics.push(Diagnostic::LetterNameCollision {
                    id: id.to_string(),
                    label: label.clone(),
                    resolved: resolved.clone(),
                });
            }
            used.insert(resolved.clone());

            for (i, child) in node.children.iter().enumerate().rev() {
                let child_label = if is_zero_root {
                    to_letters(i)
                } else {
                    format!("{resolved}{}", to_letters(i))
                };
                stack.push((child.as_str(), child_label, false));
            }
            names.insert(id.to_string(), resolved);
        }
    }

    NamingOutcome { names, diagnostics }
}

fn unique_label(label: &str, used: &HashSet<String>) -> String {
    if !used.contains(label) {
        return label.to_string();
    }
    (2..)
        .map(|k| format!("{label}{k}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DialogNode, NodeKind};

    fn build(ids: &[&str], edges: &[(&str, &str)]) -> DialogTree {
        let mut tree = DialogTree::new("t");
        for id in ids {
            tree.add_node(DialogNode::new(*id, NodeKind::PlayerLine)).unwrap();
        }
        for (p, c) in edges {
            tree.connect(p, c).unwrap();
        }
        tree
    }

    #[test]
    fn test_to_letters() {
        assert_eq!(to_letters(0), "A");
        assert_eq!(to_letters(25), "Z");
        assert_eq!(to_letters(26), "AA");
        assert_eq!(to_letters(27), "AB");
        assert_eq!(to_letters(701), "ZZ");
        assert_eq!(to_letters(702), "AAA");
    }

    #[test]
    fn test_first_root_children_have_no_prefix() {
        let tree = build(
            &["r", "a", "b", "aa"],
            &[("r", "a"), ("r", "b"), ("a", "aa")],
        );
        let names = letter_names(&tree).names;
        assert_eq!(names["r"], "0");
        assert_eq!(names["a"], "A");
        assert_eq!(names["b"], "B");
        assert_eq!(names["aa"], "AA");
    }

    #[test]
    fn test_other_roots_prefix_descendants() {
        let tree = build(
            &["r", "a", "b", "s", "s1", "s11"],
            &[("r", "a"), ("r", "b"), ("s", "s1"), ("s1", "s11")],
        );
        let names = letter_names(&tree).names;
        // r has two children (A, B), so the second root continues at C
        assert_eq!(names["s"], "C");
        assert_eq!(names["s1"], "CA");
        assert_eq!(names["s11"], "CAA");
    }

    #[test]
    fn test_labels_are_unique_with_wide_fanout() {
        let mut ids: Vec<String> = vec!["root".into()];
        ids.extend((0..30).map(|i| format!("c{i}")));
        ids.push("grandchild".into());
        let mut tree = DialogTree::new("wide");
        for id in &ids {
            tree.add_node(DialogNode::new(id.clone(), NodeKind::PlayerLine)).unwrap();
        }
        for i in 0..30 {
            tree.connect("root", &format!("c{i}")).unwrap();
        }
        // c0's first child would be "AA", same as the 27th child of root
        tree.connect("c0", "grandchild").unwrap();

        let outcome = letter_names(&tree);
        let unique: HashSet<&String> = outcome.names.values().collect();
        assert_eq!(unique.len(), outcome.names.len());
        assert_eq!(outcome.names.len(), 32);
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_cycle_terminates() {
        let tree = build(&["x", "y"], &[("x", "y"), ("y", "x")]);
        let names = letter_names(&tree).names;
        assert_eq!(names["x"], "0");
        assert_eq!(names["y"], "A");
    }
}
