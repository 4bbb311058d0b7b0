//! Voice-line table rows

use serde::{Deserialize, Serialize};

/// Token that precedes the node id inside an audio clip name
pub const ID_TOKEN: &str = "ID_";

/// One row of a voice-line table.
///
/// Every column is optional on read; empty cells read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceLineRecord {
    #[serde(rename = "DialogName", default)]
    pub dialog_name: Option<String>,
    #[serde(rename = "Character", default)]
    pub character: Option<String>,
    #[serde(rename = "DialogLine", default)]
    pub dialog_line: Option<String>,
    #[serde(rename = "AudioClipName", default)]
    pub audio_clip_name: Option<String>,
}

impl VoiceLineRecord {
    /// The row written first in every exported table, describing the columns
    #[must_use]
    pub fn documentation() -> Self {
        Self {
            dialog_name: Some("Name of the dialog tree".to_string()),
            character: Some("Speaking character".to_string()),
            dialog_line: Some("Line to record (edit freely)".to_string()),
            audio_clip_name: Some("Clip name, keep the node id suffix unchanged".to_string()),
        }
    }

    /// Node id embedded in the clip name, if any
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.audio_clip_name.as_deref().and_then(extract_identifier)
    }
}

/// Text after the last `ID_` token of a clip name.
///
/// Returns `None` when the token is missing or nothing follows it.
#[must_use]
pub fn extract_identifier(clip_name: &str) -> Option<&str> {
    let index = clip_name.rfind(ID_TOKEN)?;
    let id = clip_name[index + ID_TOKEN.len()..].trim();
    (!id.is_empty()).then_some(id)
}

/// Clip name for a node: `<Character>-<DialogName>-Take_0-ID_<id>`
#[must_use]
pub fn clip_name(character: &str, dialog_name: &str, id: &str) -> String {
    format!("{character}-{dialog_name}-Take_0-{ID_TOKEN}{id}")
}

/// Rows of one dialog tree, preceded by a `#` comment naming the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceLineGroup {
    pub name: String,
    pub records: Vec<VoiceLineRecord>,
}

/// A whole voice-line table as written for one character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceLineTable {
    pub groups: Vec<VoiceLineGroup>,
}

impl VoiceLineTable {
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier() {
        assert_eq!(extract_identifier("Hilde-Greeting-Take_0-ID_abc123"), Some("abc123"));
        assert_eq!(extract_identifier("ID_x-ID_y"), Some("y"));
        assert_eq!(extract_identifier("Hilde-Greeting-Take_0"), None);
        assert_eq!(extract_identifier("Hilde-ID_"), None);
    }

    #[test]
    fn test_clip_name_roundtrip() {
        let name = clip_name("HILDE", "Greeting", "42");
        assert_eq!(name, "HILDE-Greeting-Take_0-ID_42");
        assert_eq!(extract_identifier(&name), Some("42"));
    }

    #[test]
    fn test_documentation_row_has_no_identifier() {
        assert_eq!(VoiceLineRecord::documentation().identifier(), None);
    }
}
