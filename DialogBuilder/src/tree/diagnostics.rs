//! Non-fatal findings reported by imports, exports and namers
//!
//! Every diagnostic pushed into [`Diagnostics`] is also logged with `tracing::warn!`,
//! so a CLI run shows them even when the caller ignores the returned list.

use std::fmt;

/// How a diagnostic affected the operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// One element was left out; the rest completed
    Skipped,
    /// Nothing was left out, but a human should review the result
    Warning,
}

/// A single non-fatal finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An edge points at an id that does not exist; the edge was dropped
    DanglingEdge { from: String, to: String },
    /// A note id appeared twice; the later note was dropped
    DuplicateNoteId { id: String },
    /// A note position could not be parsed; the node starts at the origin
    InvalidPosition { id: String, value: String },
    /// More than one entry point
    MultipleStartNodes { tree: String, start_nodes: Vec<String> },
    /// Every node has a parent (the graph is one big cycle)
    NoStartNodes { tree: String },
    /// A node is a child of several parents
    MultipleParents { id: String, parents: Vec<String> },
    /// A node cannot be reached from any start node
    OrphanNode { id: String },
    /// A CSV row names a node that does not exist
    UnknownCsvIdentifier { identifier: String },
    /// Two CSV rows target the same node with different text; the last row won
    ConflictingCsvRows { identifier: String },
    /// A CSV row names an audio clip that is not in the library
    MissingAudioClip { clip: String },
    /// A tree has no character assigned
    MissingCharacter { tree: String },
    /// A numeric path name was cut down to its trailing 9 digits
    NumericNameTruncated { id: String, digits: String },
    /// A numeric path name fell back to a hash
    NumericNameHashed { id: String, digits: String },
    /// A letter label was already taken and got a suffix
    LetterNameCollision { id: String, label: String, resolved: String },
}

impl Diagnostic {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::DanglingEdge { .. }
            | Diagnostic::DuplicateNoteId { .. }
            | Diagnostic::InvalidPosition { .. }
            | Diagnostic::UnknownCsvIdentifier { .. }
            | Diagnostic::MissingAudioClip { .. } => Severity::Skipped,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingEdge { from, to } => {
                write!(f, "target node id '{to}' not found for connection from '{from}'")
            }
            Diagnostic::DuplicateNoteId { id } => write!(f, "note id '{id}' appears more than once"),
            Diagnostic::InvalidPosition { id, value } => {
                write!(f, "note '{id}' has unreadable position '{value}'")
            }
            Diagnostic::MultipleStartNodes { tree, start_nodes } => write!(
                f,
                "'{tree}' has {} start nodes: {}",
                start_nodes.len(),
                start_nodes.join(", ")
            ),
            Diagnostic::NoStartNodes { tree } => write!(f, "'{tree}' has no start node"),
            Diagnostic::MultipleParents { id, parents } => {
                write!(f, "node '{id}' has multiple parents: {}", parents.join(", "))
            }
            Diagnostic::OrphanNode { id } => {
                write!(f, "node '{id}' is not reachable from any start node")
            }
            Diagnostic::UnknownCsvIdentifier { identifier } => {
                write!(f, "no node with id '{identifier}'")
            }
            Diagnostic::ConflictingCsvRows { identifier } => {
                write!(f, "several rows target '{identifier}' with different text, last row wins")
            }
            Diagnostic::MissingAudioClip { clip } => write!(f, "audio clip '{clip}' not found"),
            Diagnostic::MissingCharacter { tree } => write!(f, "'{tree}' has no character assigned"),
            Diagnostic::NumericNameTruncated { id, digits } => {
                write!(f, "numeric name for '{id}' truncated from {digits}")
            }
            Diagnostic::NumericNameHashed { id, digits } => {
                write!(f, "numeric name for '{id}' hashed from {digits}")
            }
            Diagnostic::LetterNameCollision { id, label, resolved } => {
                write!(f, "label '{label}' for '{id}' already taken, using '{resolved}'")
            }
        }
    }
}

/// Ordered list of diagnostics collected during one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics of the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity() == severity).count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::DanglingEdge { from: "1".into(), to: "9".into() });
        diags.push(Diagnostic::NoStartNodes { tree: "t".into() });
        assert_eq!(diags.count(Severity::Skipped), 1);
        assert_eq!(diags.count(Severity::Warning), 1);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::DanglingEdge { from: "1".into(), to: "9".into() };
        assert_eq!(d.to_string(), "target node id '9' not found for connection from '1'");
    }
}
