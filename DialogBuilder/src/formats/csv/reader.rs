//! Voice-line table reading

use std::fs;
use std::path::Path;

use super::document::VoiceLineRecord;
use crate::error::Result;

/// Read all rows of a voice-line table from disk
///
/// # Errors
/// Returns an error if the file cannot be read or a row is malformed.
pub fn read_voice_lines<P: AsRef<Path>>(path: P) -> Result<Vec<VoiceLineRecord>> {
    let content = fs::read_to_string(path)?;
    parse_voice_lines(&content)
}

/// Parse voice-line rows from CSV text.
///
/// The first line is the header. `#` lines are comments, short rows are
/// accepted and missing columns read as `None`.
///
/// # Errors
/// Returns an error if the CSV is malformed.
pub fn parse_voice_lines(content: &str) -> Result<Vec<VoiceLineRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: VoiceLineRecord = result?;
        if record == VoiceLineRecord::default() {
            continue;
        }
        records.push(record);
    }

    tracing::debug!("Parsed {} voice-line rows", records.len());
    Ok(records)
}
