//! File format handlers
//!
//! - [`scap`]: Scapple mind-map documents
//! - [`csv`]: voice-line tables for recording sessions
//! - [`positions`]: sidecar of original note positions
//! - [`tree_json`]: JSON snapshot of a whole dialog tree

pub mod csv;
pub mod positions;
pub mod scap;
pub mod tree_json;

pub use positions::{OriginalPositions, read_positions, sidecar_path, write_positions};
pub use tree_json::{parse_tree, read_tree, write_tree};
