//! Dialog tree data types
//!
//! A [`DialogTree`] owns its nodes in insertion order. Edges are implicit: they are
//! the ids listed in each node's `children`, in authored order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 2D position of a node on the authoring canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are (approximately) zero, i.e. never positioned
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.x.abs() < f32::EPSILON && self.y.abs() < f32::EPSILON
    }

    /// Parse a scap-style `"x,y"` pair
    #[must_use]
    pub fn parse_pair(value: &str) -> Option<Self> {
        let (x, y) = value.split_once(',')?;
        let x = x.trim().parse::<f32>().ok()?;
        let y = y.trim().parse::<f32>().ok()?;
        Some(Self { x, y })
    }
}

/// Who speaks a node's line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// A choice the player picks
    #[default]
    PlayerLine,
    /// A line spoken by a character
    CharacterLine,
}

impl NodeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::PlayerLine => "PlayerLine",
            NodeKind::CharacterLine => "CharacterLine",
        }
    }

    /// Returns a display-friendly name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::PlayerLine => "Player",
            NodeKind::CharacterLine => "Character",
        }
    }
}

/// External character reference, used for grouping and export only
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
}

impl Character {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single dialog line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialogNode {
    /// Stable identifier, unique within the tree
    pub id: String,
    /// Player choice or character line
    pub kind: NodeKind,
    /// Matched character name for character lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// The spoken text
    #[serde(default)]
    pub dialog_line: String,
    /// Child node ids, in authored order
    #[serde(default)]
    pub children: Vec<String>,
    /// Canvas position (computed, not authoritative)
    #[serde(default)]
    pub position: Position,
    /// Label assigned by one of the namers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bound audio clip name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_clip: Option<String>,
}

impl DialogNode {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.dialog_line = line.into();
        self
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn is_character_line(&self) -> bool {
        matches!(self.kind, NodeKind::CharacterLine)
    }
}

/// A dialog tree: nodes plus the start nodes computed from them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogTree {
    /// Tree name (asset or file stem)
    pub name: String,
    /// Character this dialog belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<Character>,
    /// All nodes, indexed by id, in insertion order
    pub nodes: IndexMap<String, DialogNode>,
    /// Entry points: nodes without an incoming edge
    #[serde(default)]
    pub start_nodes: Vec<String>,
}

impl DialogTree {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a node. Fails if the id is already taken.
    pub fn add_node(&mut self, node: DialogNode) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(Error::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&DialogNode> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut DialogNode> {
        self.nodes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append `child` to `parent`'s child list.
    ///
    /// Self-edges and repeated edges are ignored and return `Ok(false)`.
    pub fn connect(&mut self, parent: &str, child: &str) -> Result<bool> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child.to_string()));
        }
        let node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| Error::NodeNotFound(parent.to_string()))?;
        if parent == child || node.children.iter().any(|c| c == child) {
            return Ok(false);
        }
        node.children.push(child.to_string());
        Ok(true)
    }

    /// Child ids of `id` that exist in this tree
    #[must_use]
    pub fn child_ids(&self, id: &str) -> &[String] {
        self.nodes.get(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Children of a node, skipping ids that are not in the tree
    pub fn get_children<'a>(&'a self, node: &'a DialogNode) -> impl Iterator<Item = &'a DialogNode> + 'a {
        node.children.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Parents of every node that has at least one, in node order
    #[must_use]
    pub fn incoming(&self) -> IndexMap<String, Vec<String>> {
        let mut parents: IndexMap<String, Vec<String>> = IndexMap::new();
        for node in self.nodes.values() {
            for child in &node.children {
                if child != &node.id && self.nodes.contains_key(child) {
                    parents.entry(child.clone()).or_default().push(node.id.clone());
                }
            }
        }
        parents
    }

    /// Nodes with no incoming edge, in node order
    #[must_use]
    pub fn find_start_nodes(&self) -> Vec<String> {
        let parents = self.incoming();
        self.nodes
            .keys()
            .filter(|id| !parents.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Recompute `start_nodes` from the current edges
    pub fn refresh_start_nodes(&mut self) {
        self.start_nodes = self.find_start_nodes();
    }

    /// Get all start nodes
    #[must_use]
    pub fn get_start_nodes(&self) -> Vec<&DialogNode> {
        self.start_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Nodes listed as a child by more than one parent
    #[must_use]
    pub fn nodes_with_multiple_parents(&self) -> Vec<(String, Vec<String>)> {
        self.incoming()
            .into_iter()
            .filter(|(_, parents)| parents.len() > 1)
            .collect()
    }

    /// Copy labels produced by a namer onto the nodes
    pub fn apply_names(&mut self, names: &IndexMap<String, String>) {
        for (id, name) in names {
            if let Some(node) = self.nodes.get_mut(id) {
                node.name = Some(name.clone());
            }
        }
    }

    /// Total number of edges between nodes of this tree
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.incoming().values().map(Vec::len).sum()
    }
}
