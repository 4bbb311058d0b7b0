//! Tree layout policies
//!
//! Each policy is a pure function from a tree to a [`Layout`] (node id ->
//! position); nothing is written to the tree until [`Layout::apply_to`].
//!
//! - [`LayoutPolicy::Level`]: one row per BFS depth, each row centred on the origin
//! - [`LayoutPolicy::Subtree`]: every node centred over the width its subtree needs
//! - [`LayoutPolicy::Simple`]: children spread under their parent, ignoring grandchildren
//!
//! Nodes that no start node reaches are not positioned and read back as
//! [`Position::ZERO`].

mod level;
mod simple;
mod subtree;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tree::{DialogTree, Position};

pub use level::level_layout;
pub use simple::simple_layout;
pub use subtree::{subtree_layout, subtree_widths};

/// Layout algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Per-level centering
    Level,
    /// Subtree-width centering
    #[default]
    Subtree,
    /// Recursive offset, the naive fallback
    Simple,
}

impl LayoutPolicy {
    pub const ALL: [LayoutPolicy; 3] = [LayoutPolicy::Level, LayoutPolicy::Subtree, LayoutPolicy::Simple];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPolicy::Level => "level",
            LayoutPolicy::Subtree => "subtree",
            LayoutPolicy::Simple => "simple",
        }
    }

    /// Spacing the policy was tuned for
    #[must_use]
    pub fn default_params(&self) -> LayoutParams {
        match self {
            LayoutPolicy::Level => LayoutParams {
                horizontal_gap: 500.0,
                vertical_gap: 120.0,
                root_gap: 500.0,
                ..LayoutParams::default()
            },
            LayoutPolicy::Subtree => LayoutParams::default(),
            LayoutPolicy::Simple => LayoutParams {
                horizontal_gap: 100.0,
                vertical_gap: 30.0,
                root_gap: 400.0,
                direction: VerticalDirection::Up,
                ..LayoutParams::default()
            },
        }
    }
}

impl FromStr for LayoutPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "level" | "levels" | "by-level" => Ok(LayoutPolicy::Level),
            "subtree" | "tree" | "tree-like" => Ok(LayoutPolicy::Subtree),
            "simple" | "recursive" | "offset" => Ok(LayoutPolicy::Simple),
            _ => Err(Error::UnknownOption {
                kind: "layout policy",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way deeper levels go on the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    /// Deeper levels get larger y (editor canvas convention)
    #[default]
    Down,
    /// Deeper levels get smaller y
    Up,
}

/// Spacing and origin shared by all policies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub origin_x: f32,
    pub origin_y: f32,
    /// Distance between neighbouring nodes (or width units) on one row
    pub horizontal_gap: f32,
    /// Distance between rows
    pub vertical_gap: f32,
    /// Distance between start nodes in the simple layout
    pub root_gap: f32,
    pub direction: VerticalDirection,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            horizontal_gap: 250.0,
            vertical_gap: 120.0,
            root_gap: 250.0,
            direction: VerticalDirection::Down,
        }
    }
}

impl LayoutParams {
    /// y coordinate of a row
    #[must_use]
    pub fn row_y(&self, depth: usize) -> f32 {
        let offset = depth as f32 * self.vertical_gap;
        match self.direction {
            VerticalDirection::Down => self.origin_y + offset,
            VerticalDirection::Up => self.origin_y - offset,
        }
    }
}

/// Computed positions, keyed by node id in placement order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: IndexMap<String, Position>,
}

impl Layout {
    pub(crate) fn insert(&mut self, id: &str, position: Position) {
        self.positions.insert(id.to_string(), position);
    }

    /// Position of a node; unplaced nodes sit at the origin
    #[must_use]
    pub fn get(&self, id: &str) -> Position {
        self.positions.get(id).copied().unwrap_or(Position::ZERO)
    }

    #[must_use]
    pub fn is_placed(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Position)> {
        self.positions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Write positions onto every node of the tree
    pub fn apply_to(&self, tree: &mut DialogTree) {
        for (id, node) in &mut tree.nodes {
            node.position = self.get(id);
        }
    }
}

/// Run a layout policy
#[must_use]
pub fn compute_layout(tree: &DialogTree, policy: LayoutPolicy, params: &LayoutParams) -> Layout {
    match policy {
        LayoutPolicy::Level => level_layout(tree, params),
        LayoutPolicy::Subtree => subtree_layout(tree, params),
        LayoutPolicy::Simple => simple_layout(tree, params),
    }
}

/// Run a layout policy and store the result on the tree
pub fn apply_layout(tree: &mut DialogTree, policy: LayoutPolicy, params: &LayoutParams) {
    let layout = compute_layout(tree, policy, params);
    tracing::debug!(
        "{policy} layout placed {} of {} nodes in '{}'",
        layout.len(),
        tree.node_count(),
        tree.name
    );
    layout.apply_to(tree);
}
