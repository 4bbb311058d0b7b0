//! Numeric path names
//!
//! Start nodes are the 1-based children of a virtual root. A node's name is the
//! concatenation of the indices on its path: first start node, its second child,
//! that child's first child gives `"121"`.

use indexmap::IndexMap;

use super::NamingOutcome;
use crate::tree::{Diagnostic, Diagnostics, DialogTree};

/// Longest digit string kept before parsing as `i32`
const MAX_DIGITS: usize = 9;

/// How a path was turned into a name when it did not parse directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFallback {
    /// Only the trailing 9 digits were kept
    Truncated,
    /// The digits were folded into a positive hash
    Hashed,
}

/// Turn a path of digits into a positive `i32` name.
///
/// Non-digits are dropped, an empty path becomes `"1"`. Paths longer than 9
/// digits keep their trailing 9 digits. A result that is still not a positive
/// integer falls back to a stable hash of the full digit string.
#[must_use]
pub fn path_to_number(path: &str) -> (i32, Option<NumericFallback>) {
    let mut digits: String = path.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        digits.push('1');
    }

    let (candidate, truncated) = if digits.len() > MAX_DIGITS {
        (&digits[digits.len() - MAX_DIGITS..], true)
    } else {
        (digits.as_str(), false)
    };

    match candidate.parse::<i32>() {
        Ok(value) if value > 0 => (value, truncated.then_some(NumericFallback::Truncated)),
        _ => (stable_hash(&digits), Some(NumericFallback::Hashed)),
    }
}

fn stable_hash(digits: &str) -> i32 {
    let mut hash: i32 = 23;
    for ch in digits.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(ch as i32);
    }
    if hash == i32::MIN {
        hash = i32::MAX;
    }
    match hash.abs() {
        0 => 1,
        value => value,
    }
}

/// Split a name back into its 1-based path indices.
///
/// Exact for names built from single-digit indices (nodes with at most nine
/// children) that were not truncated or hashed.
#[must_use]
pub fn decode_path(name: &str) -> Vec<usize> {
    name.chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect()
}

/// Assign numeric path names to every node reachable from a start node.
///
/// Traversal is depth-first in child order. A node reached a second time keeps
/// the name of its first path. Trees without any start node name their nodes
/// in node order with indices 1, 2, ...
#[must_use]
pub fn numeric_names(tree: &DialogTree) -> NamingOutcome {
    let mut names = IndexMap::new();
    let mut diagnostics = Diagnostics::new();
    let mut visited = std::collections::HashSet::new();

    let start_nodes = tree.find_start_nodes();
    let entries: Vec<&String> = if start_nodes.is_empty() {
        tree.nodes.keys().collect()
    } else {
        start_nodes.iter().collect()
    };

    for (index, start) in entries.into_iter().enumerate() {
        let mut stack: Vec<(&str, String)> = vec![(start.as_str(), (index + 1).to_string())];

        while let Some((id, path)) = stack.pop() {
            let Some(node) = tree.get_node(id) else {
                continue;
            };
            if !visited.insert(id) {
                continue;
            }

            let (number, fallback) = path_to_number(&path);
            match fallback {
                Some(NumericFallback::Truncated) => diagnostics.push(Diagnostic::NumericNameTruncated {
                    id: id.to_string(),
                    digits: path.clone(),
                }),
                Some(NumericFallback::Hashed) => diagnostics.push(Diagnostic::NumericNameHashed {
                    id: id.to_string(),
                    digits: path.clone(),
                }),
                None => {}
            }
            names.insert(id.to_string(), number.to_string());

            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((child.as_str(), format!("{path}{}", i + 1)));
            }
        }
    }

    NamingOutcome { names, diagnostics }
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
    fn test_chain_names() {
        let tree = build(&["1", "2", "3"], &[("1", "2"), ("2", "3")]);
        let outcome = numeric_names(&tree);
        assert_eq!(outcome.names["1"], "1");
        assert_eq!(outcome.names["2"], "11");
        assert_eq!(outcome.names["3"], "111");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_siblings_and_second_root() {
        let tree = build(&["a", "b", "c", "r"], &[("a", "b"), ("a", "c"), ("r", "c")]);
        let names = numeric_names(&tree).names;
        assert_eq!(names["a"], "1");
        assert_eq!(names["b"], "11");
        assert_eq!(names["c"], "12");
        // c was already named through a, the second root does not rename it
        assert_eq!(names["r"], "2");
    }

    #[test]
    fn test_decode_recovers_path() {
        let tree = build(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("c", "e")],
        );
        let names = numeric_names(&tree).names;
        assert_eq!(decode_path(&names["e"]), vec![1, 2, 2]);
        assert_eq!(decode_path(&names["d"]), vec![1, 2, 1]);
    }

    #[test]
    fn test_cycle_without_start_falls_back_to_node_order() {
        let tree = build(&["x", "y"], &[("x", "y"), ("y", "x")]);
        let names = numeric_names(&tree).names;
        assert_eq!(names["x"], "1");
        assert_eq!(names["y"], "11");
    }

    #[test]
    fn test_truncation_keeps_trailing_digits() {
        assert_eq!(path_to_number("1234567891"), (234_567_891, Some(NumericFallback::Truncated)));
        assert_eq!(path_to_number("12"), (12, None));
        assert_eq!(path_to_number(""), (1, None));
    }

    #[test]
    fn test_all_zero_tail_is_hashed() {
        let (value, fallback) = path_to_number("1000000000");
        assert_eq!(fallback, Some(NumericFallback::Hashed));
        assert!(value > 0);
        assert_eq!(path_to_number("1000000000").0, value);
    }

    #[test]
    fn test_deep_chain_truncates() {
        let ids: Vec<String> = (0..12).map(|i| format!("n{i}")).collect();
        let mut tree = DialogTree::new("deep");
        for id in &ids {
            tree.add_node(DialogNode::new(id.clone(), NodeKind::PlayerLine)).unwrap();
        }
        for pair in ids.windows(2) {
            tree.connect(&pair[0], &pair[1]).unwrap();
        }
        let outcome = numeric_names(&tree);
        assert_eq!(outcome.names["n11"], "111111111");
        assert_eq!(outcome.diagnostics.len(), 3);
    }
}
