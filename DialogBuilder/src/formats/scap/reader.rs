//! Scapple file reading

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::document::{NoteAppearance, ScapDocument, ScapNote, parse_id_list};
use crate::error::{Error, Result};

/// Element whose text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    String,
    PointsTo,
    Alignment,
    Border,
    Fill,
}

/// Read a `.scap` file from disk
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid XML, or has no
/// root or `<Notes>` element.
pub fn read_scap<P: AsRef<Path>>(path: P) -> Result<ScapDocument> {
    let content = fs::read_to_string(path)?;
    parse_scap(&content)
}

/// Parse a Scapple document from an XML string
///
/// # Errors
/// Returns an error if the XML is malformed or the document has no root or
/// `<Notes>` element.
pub fn parse_scap(content: &str) -> Result<ScapDocument> {
    let mut reader = Reader::from_str(content);
    // note text is significant, including leading/trailing whitespace
    reader.trim_text(false);

    let mut doc = ScapDocument::default();
    let mut root: Option<String> = None;
    let mut saw_notes = false;
    let mut in_notes = false;
    let mut depth = 0usize;

    let mut buf = Vec::new();
    let mut current: Option<ScapNote> = None;
    let mut capture = Capture::None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match name.as_ref() {
                    _ if root.is_none() => read_root(&e, &mut doc, &mut root)?,
                    b"Notes" if depth == 1 => {
                        saw_notes = true;
                        in_notes = true;
                    }
                    b"Note" if in_notes && depth == 2 => current = Some(read_note(&e)?),
                    b"String" if current.is_some() => start_capture(&mut capture, &mut text, Capture::String),
                    b"PointsToNoteIDs" if current.is_some() => {
                        start_capture(&mut capture, &mut text, Capture::PointsTo);
                    }
                    b"Alignment" if current.is_some() => {
                        start_capture(&mut capture, &mut text, Capture::Alignment);
                    }
                    b"Fill" if current.is_some() => start_capture(&mut capture, &mut text, Capture::Fill),
                    b"Border" => {
                        if let Some(note) = current.as_mut() {
                            appearance_of(note).border_weight = attribute(&e, b"Weight")?.unwrap_or_default();
                            start_capture(&mut capture, &mut text, Capture::Border);
                        }
                    }
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                match name.as_ref() {
                    _ if root.is_none() => read_root(&e, &mut doc, &mut root)?,
                    b"Notes" if depth == 1 => saw_notes = true,
                    b"Note" if in_notes && depth == 2 => push_note(&mut doc, read_note(&e)?),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if capture != Capture::None {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if capture != Capture::None {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"Note" if in_notes && depth == 2 => {
                        if let Some(note) = current.take() {
                            push_note(&mut doc, note);
                        }
                    }
                    b"Notes" if depth == 1 => in_notes = false,
                    b"String" | b"PointsToNoteIDs" | b"Alignment" | b"Fill" | b"Border" => {
                        if let Some(note) = current.as_mut() {
                            finish_capture(note, capture, std::mem::take(&mut text));
                        }
                        capture = Capture::None;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    let Some(root) = root else {
        return Err(Error::MissingRootElement);
    };
    if !saw_notes {
        return Err(Error::MissingNotesElement { root });
    }

    tracing::debug!("Parsed {} notes from <{}>", doc.notes.len(), root);
    Ok(doc)
}

fn read_root(e: &BytesStart<'_>, doc: &mut ScapDocument, root: &mut Option<String>) -> Result<()> {
    *root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    doc.id = attribute(e, b"ID")?;
    doc.version = attribute(e, b"Version")?;
    Ok(())
}

fn read_note(e: &BytesStart<'_>) -> Result<ScapNote> {
    let mut note = ScapNote::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"ID" => note.id = value.trim().to_string(),
            b"Position" => note.position = Some(value.into_owned()),
            b"FontSize" => note.font_size = Some(value.into_owned()),
            b"Width" => note.width = Some(value.into_owned()),
            b"PointsToNoteIDs" => note.points_to.extend(parse_id_list(&value)),
            _ => {}
        }
    }
    Ok(note)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn start_capture(capture: &mut Capture, text: &mut String, target: Capture) {
    *capture = target;
    text.clear();
}

fn finish_capture(note: &mut ScapNote, capture: Capture, text: String) {
    match capture {
        Capture::None => {}
        Capture::String => note.text = text,
        Capture::PointsTo => note.points_to.extend(parse_id_list(&text)),
        Capture::Alignment => appearance_of(note).alignment = text.trim().to_string(),
        Capture::Border => appearance_of(note).border_color = text.trim().to_string(),
        Capture::Fill => appearance_of(note).fill = text.trim().to_string(),
    }
}

fn appearance_of(note: &mut ScapNote) -> &mut NoteAppearance {
    note.appearance.get_or_insert_with(NoteAppearance::default)
}

fn push_note(doc: &mut ScapDocument, note: ScapNote) {
    if note.id.is_empty() {
        tracing::debug!("Skipping note without ID");
        return;
    }
    doc.notes.push(note);
}
