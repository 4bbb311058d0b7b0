//! Subtree-width centering
//!
//! Every node is allotted as many horizontal slots as its subtree has leaves.
//! Children are laid left to right inside the parent's span and the parent sits
//! at the centre of that span, so sibling subtrees never overlap.

use indexmap::IndexMap;

use super::{Layout, LayoutParams};
use crate::tree::traversal::SpanningForest;
use crate::tree::{DialogTree, Position};

/// Leaf count of every subtree in the forest (at least 1 per node)
#[must_use]
pub fn subtree_widths(forest: &SpanningForest) -> IndexMap<String, usize> {
    let mut widths: IndexMap<String, usize> = IndexMap::with_capacity(forest.len());
    // children come after their parent in pre-order
    for id in forest.preorder.iter().rev() {
        let sum: usize = forest
            .children_of(id)
            .iter()
            .map(|child| widths.get(child).copied().unwrap_or(1))
            .sum();
        widths.insert(id.clone(), sum.max(1));
    }
    widths
}

/// Place nodes so that each parent is centred over its children's span.
///
/// Start nodes are laid side by side from `origin_x`, each taking the width of
/// its own subtree. One width unit is `horizontal_gap`.
#[must_use]
pub fn subtree_layout(tree: &DialogTree, params: &LayoutParams) -> Layout {
    let forest = SpanningForest::from_start_nodes(tree);
    let widths = subtree_widths(&forest);
    let width_of = |id: &str| widths.get(id).copied().unwrap_or(1) as f32;
    let h = params.horizontal_gap;

    let mut layout = Layout::default();
    let mut next_root_x = params.origin_x;

    for root in &forest.roots {
        let w = width_of(root);
        let mut stack: Vec<(&str, f32, usize)> = vec![(root.as_str(), next_root_x + (w - 1.0) * h / 2.0, 0)];
        next_root_x += w * h;

        while let Some((id, x, depth)) = stack.pop() {
            layout.insert(id, Position::new(x, params.row_y(depth)));

            let mut child_x = x - (width_of(id) - 1.0) * h / 2.0;
            let mut placed = Vec::new();
            for child in forest.children_of(id) {
                let cw = width_of(child);
                placed.push((child.as_str(), child_x + (cw - 1.0) * h / 2.0, depth + 1));
                child_x += cw * h;
            }
            // keep pre-order in the output map
            stack.extend(placed.into_iter().rev());
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::build;
    use crate::tree::DialogNode;
    use crate::tree::NodeKind;

    fn params() -> LayoutParams {
        LayoutParams {
            horizontal_gap: 250.0,
            vertical_gap: 120.0,
            ..LayoutParams::default()
        }
    }

    #[test]
    fn test_widths_count_leaves() {
        let tree = build(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("c", "e")],
        );
        let widths = subtree_widths(&SpanningForest::from_start_nodes(&tree));
        assert_eq!(widths["a"], 3);
        assert_eq!(widths["c"], 2);
        assert_eq!(widths["b"], 1);
    }

    #[test]
    fn test_parent_centred_over_span() {
        let tree = build(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("c", "d"), ("c", "e")],
        );
        let layout = subtree_layout(&tree, &params());

        assert_eq!(layout.get("b"), Position::new(0.0, 120.0));
        assert_eq!(layout.get("d"), Position::new(250.0, 240.0));
        assert_eq!(layout.get("e"), Position::new(500.0, 240.0));
        // c sits between its two leaves
        assert_eq!(layout.get("c"), Position::new(375.0, 120.0));
        // a sits at the centre of the three leaf slots
        assert_eq!(layout.get("a"), Position::new(250.0, 0.0));
    }

    #[test]
    fn test_roots_side_by_side() {
        let tree = build(
            &["a", "b", "c", "r", "s"],
            &[("a", "b"), ("a", "c"), ("r", "s")],
        );
        let layout = subtree_layout(&tree, &params());
        assert_eq!(layout.get("a"), Position::new(125.0, 0.0));
        // a's subtree takes two slots, r starts at the third
        assert_eq!(layout.get("r"), Position::new(500.0, 0.0));
        assert_eq!(layout.get("s"), Position::new(500.0, 120.0));
    }

    #[test]
    fn test_rows_never_overlap() {
        let tree = build(
            &["a", "b", "c", "d", "e", "f", "g"],
            &[("a", "b"), ("a", "c"), ("a", "d"), ("b", "e"), ("b", "f"), ("d", "g"), ("c", "g")],
        );
        let layout = subtree_layout(&tree, &params());
        let mut by_row: IndexMap<i64, Vec<f32>> = IndexMap::new();
        for (_, pos) in layout.iter() {
            by_row.entry(pos.y as i64).or_default().push(pos.x);
        }
        for xs in by_row.values_mut() {
            xs.sort_by(f32::total_cmp);
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] >= 250.0 - f32::EPSILON);
            }
        }
        assert_eq!(layout.len(), 7);
    }

    #[test]
    fn test_deep_chain() {
        let ids: Vec<String> = (0..10_000).map(|i| format!("n{i}")).collect();
        let mut tree = DialogTree::new("deep");
        for id in &ids {
            tree.add_node(DialogNode::new(id.clone(), NodeKind::PlayerLine)).unwrap();
        }
        for pair in ids.windows(2) {
            tree.connect(&pair[0], &pair[1]).unwrap();
        }
        let layout = subtree_layout(&tree, &params());
        assert_eq!(layout.len(), 10_000);
        assert_eq!(layout.get("n9999").x, 0.0);
    }
}
