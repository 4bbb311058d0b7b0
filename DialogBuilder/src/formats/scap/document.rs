//! Scapple document structure

/// A parsed `.scap` document.
///
/// Only what the dialog converter needs is kept: the notes, their text, position
/// and outgoing arrows. Background shapes, styles and print settings are dropped
/// on read and regenerated on write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScapDocument {
    /// Document `ID` attribute (a UUID in files written by Scapple)
    pub id: Option<String>,
    /// Format `Version` attribute
    pub version: Option<String>,
    pub notes: Vec<ScapNote>,
}

impl ScapDocument {
    /// Format version written by [`super::serialize_scap`]
    pub const VERSION: &'static str = "1.3";

    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            version: Some(Self::VERSION.to_string()),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn note(&self, id: &str) -> Option<&ScapNote> {
        self.notes.iter().find(|n| n.id == id)
    }
}

/// One `<Note>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScapNote {
    pub id: String,
    /// Raw `Position` attribute, `"x,y"`
    pub position: Option<String>,
    pub font_size: Option<String>,
    pub width: Option<String>,
    /// Text of the `<String>` element
    pub text: String,
    /// Arrow targets from the `PointsToNoteIDs` attribute and child elements, in document order
    pub points_to: Vec<String>,
    pub appearance: Option<NoteAppearance>,
}

impl ScapNote {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// `<Appearance>` block of a note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteAppearance {
    pub alignment: String,
    pub border_weight: String,
    pub border_color: String,
    /// Fill color as three space separated floats
    pub fill: String,
}

impl NoteAppearance {
    pub const PLAYER_FILL: &'static str = "0.96 0.93 0.80";
    pub const CHARACTER_FILL: &'static str = "0.75 0.85 0.75";
    pub const BORDER_COLOR: &'static str = "0.9024707674980164 0.8555303812026978 0.628868043422699";

    /// Centered note with the default border and the given fill
    #[must_use]
    pub fn with_fill(fill: &str) -> Self {
        Self {
            alignment: "Center".to_string(),
            border_weight: "1".to_string(),
            border_color: Self::BORDER_COLOR.to_string(),
            fill: fill.to_string(),
        }
    }
}

/// Widest `a-b` range expanded by [`parse_id_list`]
pub const MAX_ID_RANGE: u32 = 10_000;

/// Parse a Scapple id list.
///
/// Ids are comma separated; `a-b` expands to the inclusive numeric range.
/// Empty entries are dropped, anything that is not a valid range is kept as-is.
/// A range wider than [`MAX_ID_RANGE`] is not expanded either; it stays a single
/// token, which the importer then reports as a dangling edge.
#[must_use]
pub fn parse_id_list(value: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match parse_range(part) {
            Some((start, end)) if end - start < MAX_ID_RANGE => {
                ids.extend((start..=end).map(|n| n.to_string()));
            }
            Some(_) => {
                tracing::warn!("Id range '{part}' spans more than {MAX_ID_RANGE} notes, not expanded");
                ids.push(part.to_string());
            }
            None => ids.push(part.to_string()),
        }
    }
    ids
}

fn parse_range(part: &str) -> Option<(u32, u32)> {
    let (start, end) = part.split_once('-')?;
    let start = start.trim().parse::<u32>().ok()?;
    let end = end.trim().parse::<u32>().ok()?;
    (start <= end).then_some((start, end))
}

/// Render ids as a Scapple id list
#[must_use]
pub fn format_id_list<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list_ranges() {
        assert_eq!(parse_id_list("2-4, 7"), vec!["2", "3", "4", "7"]);
        assert_eq!(parse_id_list(" 1 ,, 3 "), vec!["1", "3"]);
        assert_eq!(parse_id_list("5-3"), vec!["5-3"]);
        assert_eq!(parse_id_list("abc"), vec!["abc"]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn test_oversized_range_is_kept_whole() {
        assert_eq!(parse_id_list("1-4294967295, 3"), vec!["1-4294967295", "3"]);
        assert_eq!(parse_id_list("1-3000000"), vec!["1-3000000"]);
        assert_eq!(parse_id_list("1-10000").len(), 10_000);
    }

    #[test]
    fn test_format_id_list() {
        assert_eq!(format_id_list(&["1", "2"]), "1, 2");
        assert_eq!(format_id_list::<String>(&[]), "");
    }
}
