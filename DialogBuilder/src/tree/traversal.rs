//! Cycle-safe traversals shared by the importer, namers and layouts
//!
//! Input graphs come from hand-edited files and may contain cycles or nodes with
//! several parents. Every walk here keeps a visited set and uses an explicit
//! queue or stack, so neither cycles nor very deep trees can blow the call stack.

use std::collections::{BTreeMap, HashSet, VecDeque};

use indexmap::IndexMap;

use super::types::DialogTree;

/// Breadth-first depth of every node reachable from `roots`.
///
/// All roots start at depth 0. The first time a node is dequeued fixes its depth;
/// later visits through other parents are ignored. Returned in BFS order.
pub fn bfs_depths<'a, I, F>(roots: I, children: F) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> &'a [String],
{
    let mut depths = IndexMap::new();
    let mut queue: VecDeque<(&'a str, usize)> = roots.into_iter().map(|id| (id, 0)).collect();

    while let Some((id, depth)) = queue.pop_front() {
        if depths.contains_key(id) {
            continue;
        }
        depths.insert(id.to_string(), depth);
        for child in children(id) {
            if !depths.contains_key(child.as_str()) {
                queue.push_back((child.as_str(), depth + 1));
            }
        }
    }

    depths
}

/// Group a depth map into levels, keeping BFS order inside each level
#[must_use]
pub fn levels(depths: &IndexMap<String, usize>) -> BTreeMap<usize, Vec<String>> {
    let mut levels: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (id, depth) in depths {
        levels.entry(*depth).or_default().push(id.clone());
    }
    levels
}

/// Depth of every node reachable from the tree's start nodes
#[must_use]
pub fn tree_depths(tree: &DialogTree) -> IndexMap<String, usize> {
    let roots = tree.find_start_nodes();
    bfs_depths(roots.iter().map(String::as_str), |id| tree.child_ids(id))
}

/// Ids reachable from the given roots (roots included)
#[must_use]
pub fn reachable_from(tree: &DialogTree, roots: &[String]) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack: Vec<&str> = roots.iter().map(String::as_str).collect();

    while let Some(id) = stack.pop() {
        if !tree.contains(id) || !visited.insert(id.to_string()) {
            continue;
        }
        for child in tree.child_ids(id) {
            stack.push(child);
        }
    }

    visited
}

/// Nodes that no start node reaches, in node order
#[must_use]
pub fn orphans(tree: &DialogTree) -> Vec<String> {
    let reachable = reachable_from(tree, &tree.find_start_nodes());
    tree.nodes
        .keys()
        .filter(|id| !reachable.contains(*id))
        .cloned()
        .collect()
}

/// A depth-first spanning forest of a tree.
///
/// Each reachable node appears exactly once, under the parent that reached it
/// first in depth-first pre-order. Edges that would revisit a node (back edges,
/// second parents) are left out, so the forest is a true tree even when the
/// input graph is not.
#[derive(Debug, Clone, Default)]
pub struct SpanningForest {
    /// Roots, in the order given
    pub roots: Vec<String>,
    /// Claimed children per node, in authored order
    pub children: IndexMap<String, Vec<String>>,
    /// Depth-first pre-order of all forest nodes
    pub preorder: Vec<String>,
    /// Depth of each node in the forest
    pub depth: IndexMap<String, usize>,
}

impl SpanningForest {
    /// Build the forest rooted at `roots`
    #[must_use]
    pub fn build(tree: &DialogTree, roots: &[String]) -> Self {
        let mut forest = SpanningForest::default();
        let mut visited: HashSet<&str> = HashSet::new();

        for root in roots {
            if !tree.contains(root) || visited.contains(root.as_str()) {
                continue;
            }
            forest.roots.push(root.clone());

            let mut stack: Vec<(&str, Option<&str>, usize)> = vec![(root.as_str(), None, 0)];
            while let Some((id, parent, depth)) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }
                forest.preorder.push(id.to_string());
                forest.depth.insert(id.to_string(), depth);
                forest.children.entry(id.to_string()).or_default();
                if let Some(parent) = parent {
                    forest
                        .children
                        .entry(parent.to_string())
                        .or_default()
                        .push(id.to_string());
                }
                for child in tree.child_ids(id).iter().rev() {
                    if tree.contains(child) && !visited.contains(child.as_str()) {
                        stack.push((child.as_str(), Some(id), depth + 1));
                    }
                }
            }
        }

        forest
    }

    /// Forest over the tree's start nodes
    #[must_use]
    pub fn from_start_nodes(tree: &DialogTree) -> Self {
        Self::build(tree, &tree.find_start_nodes())
    }

    /// Claimed children of a node
    #[must_use]
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.depth.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.preorder.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preorder.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DialogNode, NodeKind};

    fn tree_from(edges: &[(&str, &str)], ids: &[&str]) -> DialogTree {
        let mut tree = DialogTree::new("t");
        for id in ids {
            tree.add_node(DialogNode::new(*id, NodeKind::PlayerLine)).unwrap();
        }
        for (parent, child) in edges {
            tree.connect(parent, child).unwrap();
        }
        tree
    }

    #[test]
    fn test_bfs_first_discovery_wins() {
        // d hangs below a (via b and c) and directly below the second root e.
        // e is dequeued before b and c, so d keeps depth 1.
        let tree = tree_from(
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("e", "d")],
            &["a", "b", "c", "d", "e"],
        );
        let depths = tree_depths(&tree);
        assert_eq!(depths["a"], 0);
        assert_eq!(depths["e"], 0);
        assert_eq!(depths["d"], 1);
        assert_eq!(depths.keys().collect::<Vec<_>>(), ["a", "e", "b", "c", "d"]);
    }

    #[test]
    fn test_levels_group_in_order() {
        let tree = tree_from(&[("a", "b"), ("a", "c")], &["a", "b", "c"]);
        let levels = levels(&tree_depths(&tree));
        assert_eq!(levels[&0], vec!["a".to_string()]);
        assert_eq!(levels[&1], vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_orphans_in_cycle() {
        // x <-> y form a cycle with no entry point
        let tree = tree_from(&[("a", "b"), ("x", "y"), ("y", "x")], &["a", "b", "x", "y"]);
        assert_eq!(tree.find_start_nodes(), vec!["a".to_string()]);
        assert_eq!(orphans(&tree), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_forest_drops_back_edges_and_second_parents() {
        let tree = tree_from(
            &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "a")],
            &["a", "b", "c"],
        );
        let forest = SpanningForest::build(&tree, &["a".to_string()]);
        assert_eq!(forest.preorder, vec!["a", "b", "c"]);
        assert_eq!(forest.children_of("a"), ["b".to_string()]);
        assert_eq!(forest.children_of("b"), ["c".to_string()]);
        assert!(forest.children_of("c").is_empty());
        assert_eq!(forest.depth["c"], 2);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let ids: Vec<String> = (0..20_000).map(|i| i.to_string()).collect();
        let mut tree = DialogTree::new("deep");
        for id in &ids {
            tree.add_node(DialogNode::new(id.clone(), NodeKind::PlayerLine)).unwrap();
        }
        for pair in ids.windows(2) {
            tree.connect(&pair[0], &pair[1]).unwrap();
        }
        let forest = SpanningForest::from_start_nodes(&tree);
        assert_eq!(forest.len(), 20_000);
        assert_eq!(forest.depth["19999"], 19_999);
    }
}
