//! Recursive offset layout
//!
//! Children are spread evenly under their parent one row away. Grandchildren
//! are not taken into account, so wide subtrees can overlap.

use super::{Layout, LayoutParams};
use crate::tree::traversal::SpanningForest;
use crate::tree::{DialogTree, Position};

#[must_use]
pub fn simple_layout(tree: &DialogTree, params: &LayoutParams) -> Layout {
    let forest = SpanningForest::from_start_nodes(tree);
    let h = params.horizontal_gap;
    let mut layout = Layout::default();

    for (i, root) in forest.roots.iter().enumerate() {
        let root_x = params.origin_x + i as f32 * params.root_gap;
        let mut stack: Vec<(&str, f32, usize)> = vec![(root.as_str(), root_x, 0)];

        while let Some((id, x, depth)) = stack.pop() {
            layout.insert(id, Position::new(x, params.row_y(depth)));

            let children = forest.children_of(id);
            let base = x - children.len().saturating_sub(1) as f32 * h / 2.0;
            for (j, child) in children.iter().enumerate().rev() {
                stack.push((child.as_str(), base + j as f32 * h, depth + 1));
            }
        }
    }

    layout
}
