//! Sidecar file of original note positions
//!
//! Written next to an imported `.scap` so the authored layout can be recalled
//! after the tree has been re-laid out:
//!
//! ```json
//! { "positions": [ { "id": "1", "position": [100.0, 100.0] } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tree::Position;

/// Suffix appended to the file stem of the imported document
pub const SIDECAR_SUFFIX: &str = "_original_positions.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePosition {
    pub id: String,
    pub position: [f32; 2],
}

/// Original positions, in note order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginalPositions {
    pub positions: Vec<NotePosition>,
}

impl OriginalPositions {
    pub fn push(&mut self, id: impl Into<String>, position: Position) {
        self.positions.push(NotePosition {
            id: id.into(),
            position: [position.x, position.y],
        });
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Position> {
        self.positions
            .iter()
            .find(|p| p.id == id)
            .map(|p| Position::new(p.position[0], p.position[1]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// `<dir>/<stem>_original_positions.json` for a document path
///
/// # Errors
/// Returns an error if the path has no file stem.
pub fn sidecar_path(document: &Path) -> Result<PathBuf> {
    let stem = document
        .file_stem()
        .ok_or_else(|| Error::InvalidPath(document.display().to_string()))?;
    let name = format!("{}{SIDECAR_SUFFIX}", stem.to_string_lossy());
    Ok(document.with_file_name(name))
}

/// Write positions as pretty JSON
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_positions<P: AsRef<Path>>(positions: &OriginalPositions, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(positions)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read positions written by [`write_positions`]
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_positions<P: AsRef<Path>>(path: P) -> Result<OriginalPositions> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path() {
        let path = sidecar_path(Path::new("/tmp/dialogs/greeting.scap")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/dialogs/greeting_original_positions.json"));
    }

    #[test]
    fn test_json_shape() {
        let mut positions = OriginalPositions::default();
        positions.push("1", Position::new(100.0, -20.5));
        let json = serde_json::to_string(&positions).unwrap();
        assert_eq!(json, r#"{"positions":[{"id":"1","position":[100.0,-20.5]}]}"#);
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_original_positions.json");
        let mut positions = OriginalPositions::default();
        positions.push("1", Position::new(1.0, 2.0));
        positions.push("7", Position::ZERO);

        write_positions(&positions, &path).unwrap();
        let back = read_positions(&path).unwrap();
        assert_eq!(back, positions);
        assert_eq!(back.get("1"), Some(Position::new(1.0, 2.0)));
        assert_eq!(back.get("2"), None);
    }
}
