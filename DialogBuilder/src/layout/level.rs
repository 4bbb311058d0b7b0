//! Per-level centering

use super::{Layout, LayoutParams};
use crate::tree::traversal::{levels, tree_depths};
use crate::tree::{DialogTree, Position};

/// Place nodes on one row per BFS depth.
///
/// Rows are spaced by `vertical_gap`, nodes inside a row by `horizontal_gap`,
/// and every row is centred on `origin_x`.
#[must_use]
pub fn level_layout(tree: &DialogTree, params: &LayoutParams) -> Layout {
    let mut layout = Layout::default();

    for (depth, ids) in levels(&tree_depths(tree)) {
        let y = params.row_y(depth);
        let span = (ids.len() - 1) as f32 * params.horizontal_gap;
        let left = params.origin_x - span / 2.0;
        for (i, id) in ids.iter().enumerate() {
            layout.insert(id, Position::new(left + i as f32 * params.horizontal_gap, y));
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutPolicy;
    use crate::layout::tests::build;

    #[test]
    fn test_rows_are_centred() {
        let tree = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("a", "d")],
        );
        let params = LayoutPolicy::Level.default_params();
        let layout = level_layout(&tree, &params);

        assert_eq!(layout.get("a"), Position::new(0.0, 0.0));
        assert_eq!(layout.get("b"), Position::new(-500.0, 120.0));
        assert_eq!(layout.get("c"), Position::new(0.0, 120.0));
        assert_eq!(layout.get("d"), Position::new(500.0, 120.0));
    }

    #[test]
    fn test_shared_child_placed_once_at_first_depth() {
        let tree = build(
            &["a", "b", "c", "r"],
            &[("a", "b"), ("b", "c"), ("r", "c")],
        );
        let params = LayoutParams {
            horizontal_gap: 100.0,
            vertical_gap: 10.0,
            ..LayoutParams::default()
        };
        let layout = level_layout(&tree, &params);
        // c is first discovered from r at depth 1, next to b
        assert_eq!(layout.get("b"), Position::new(-50.0, 10.0));
        assert_eq!(layout.get("c"), Position::new(50.0, 10.0));
        assert_eq!(layout.len(), 4);
    }
}
