//! Voice-line table writing

use std::fs;
use std::io::Write;
use std::path::Path;

use super::document::{VoiceLineRecord, VoiceLineTable};
use crate::error::Result;

/// Write a voice-line table to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_voice_lines<P: AsRef<Path>>(table: &VoiceLineTable, path: P) -> Result<()> {
    let text = serialize_voice_lines(table)?;
    fs::write(path, text)?;
    Ok(())
}

/// Serialize a voice-line table to CSV text.
///
/// Layout: header, documentation row, then for each group a `# <name>` comment
/// followed by its rows. Fields containing `#` are quoted so a row never reads
/// back as a comment.
///
/// # Errors
/// Returns an error if CSV serialization fails.
pub fn serialize_voice_lines(table: &VoiceLineTable) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();

    {
        let mut writer = row_writer(true).from_writer(&mut buf);
        writer.serialize(VoiceLineRecord::documentation())?;
        writer.flush()?;
    }

    for group in &table.groups {
        writeln!(buf, "# {}", comment_text(&group.name))?;
        let mut writer = row_writer(false).from_writer(&mut buf);
        for record in &group.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    Ok(String::from_utf8(buf)?)
}

fn row_writer(has_headers: bool) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.has_headers(has_headers).comment(Some(b'#'));
    builder
}

/// Comments are single lines
fn comment_text(name: &str) -> String {
    name.replace(['\r', '\n'], " ")
}
