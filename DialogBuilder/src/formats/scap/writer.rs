//! Scapple file writing
//!
//! Background shapes, note styles, UI and print settings are not modelled; they
//! are written with fixed values so Scapple opens the file without complaint.

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::document::{ScapDocument, ScapNote, format_id_list};
use crate::error::Result;

const PRINT_SETTINGS: [(&str, &str); 15] = [
    ("PaperSize", "595.0,842.0"),
    ("LeftMargin", "72.0"),
    ("RightMargin", "72.0"),
    ("TopMargin", "90.0"),
    ("BottomMargin", "90.0"),
    ("PaperType", "iso-a4"),
    ("Orientation", "Portrait"),
    ("HorizontalPagination", "Clip"),
    ("VerticalPagination", "Auto"),
    ("ScaleFactor", "1.0"),
    ("HorizontallyCentered", "Yes"),
    ("VerticallyCentered", "Yes"),
    ("Collates", "Yes"),
    ("PagesAcross", "1"),
    ("PagesDown", "1"),
];

/// Write a Scapple document to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_scap<P: AsRef<Path>>(doc: &ScapDocument, path: P) -> Result<()> {
    let xml = serialize_scap(doc)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a Scapple document to an XML string
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_scap(doc: &ScapDocument) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

    let mut root = BytesStart::new("ScappleDocument");
    root.push_attribute(("Version", doc.version.as_deref().unwrap_or(ScapDocument::VERSION)));
    if let Some(ref id) = doc.id {
        root.push_attribute(("ID", id.as_str()));
    }
    writer.write_event(Event::Start(root.borrow()))?;

    writer.write_event(Event::Start(BytesStart::new("Notes")))?;
    for note in &doc.notes {
        write_note(&mut writer, note)?;
    }
    writer.write_event(Event::End(BytesEnd::new("Notes")))?;

    writer.write_event(Event::Empty(BytesStart::new("BackgroundShapes")))?;
    writer.write_event(Event::Empty(BytesStart::new("NoteStyles")))?;

    writer.write_event(Event::Start(BytesStart::new("UISettings")))?;
    write_text_element(&mut writer, "BackgroundColor", "1.0 0.99 0.96")?;
    write_text_element(&mut writer, "DefaultFont", "Helvetica")?;
    write_text_element(&mut writer, "NoteXPadding", "8.0")?;
    writer.write_event(Event::End(BytesEnd::new("UISettings")))?;

    let mut print = BytesStart::new("PrintSettings");
    for attr in PRINT_SETTINGS {
        print.push_attribute(attr);
    }
    writer.write_event(Event::Empty(print))?;

    writer.write_event(Event::End(BytesEnd::new("ScappleDocument")))?;

    let xml = String::from_utf8(output)?;
    Ok(xml)
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &ScapNote) -> Result<()> {
    let mut start = BytesStart::new("Note");
    start.push_attribute(("ID", note.id.as_str()));
    if let Some(ref font_size) = note.font_size {
        start.push_attribute(("FontSize", font_size.as_str()));
    }
    if let Some(ref position) = note.position {
        start.push_attribute(("Position", position.as_str()));
    }
    if let Some(ref width) = note.width {
        start.push_attribute(("Width", width.as_str()));
    }
    writer.write_event(Event::Start(start.borrow()))?;

    if let Some(ref appearance) = note.appearance {
        writer.write_event(Event::Start(BytesStart::new("Appearance")))?;
        write_text_element(writer, "Alignment", &appearance.alignment)?;

        let mut border = BytesStart::new("Border");
        border.push_attribute(("Weight", appearance.border_weight.as_str()));
        writer.write_event(Event::Start(border.borrow()))?;
        writer.write_event(Event::Text(BytesText::new(&appearance.border_color)))?;
        writer.write_event(Event::End(BytesEnd::new("Border")))?;

        write_text_element(writer, "Fill", &appearance.fill)?;
        writer.write_event(Event::End(BytesEnd::new("Appearance")))?;
    }

    write_text_element(writer, "String", &note.text)?;

    if !note.points_to.is_empty() {
        write_text_element(writer, "PointsToNoteIDs", &format_id_list(&note.points_to))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Note")))?;
    Ok(())
}

/// `<name>text</name>`, or `<name/>` for empty text so no indentation leaks into the value
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::scap::{NoteAppearance, parse_scap};

    fn sample() -> ScapDocument {
        let mut doc = ScapDocument::new();
        doc.id = Some("0F1E2D3C-0000-4000-8000-000000000000".to_string());

        let mut first = ScapNote::new("1", "A [HILDE]\n  Tom & <Jerry>  ");
        first.position = Some("100.0,100.0".to_string());
        first.points_to = vec!["2".to_string(), "3".to_string()];
        first.appearance = Some(NoteAppearance::with_fill(NoteAppearance::CHARACTER_FILL));
        doc.notes.push(first);
        doc.notes.push(ScapNote::new("2", ""));
        doc.notes.push(ScapNote::new("3", "\n"));
        doc
    }

    #[test]
    fn test_serialize_roundtrip() {
        let doc = sample();
        let xml = serialize_scap(&doc).unwrap();
        let back = parse_scap(&xml).unwrap();

        assert_eq!(back.notes, doc.notes);
        assert_eq!(back.id, doc.id);
        assert_eq!(back.version.as_deref(), Some("1.3"));
    }

    #[test]
    fn test_cosmetic_sections_written() {
        let xml = serialize_scap(&sample()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"));
        assert!(xml.contains("<DefaultFont>Helvetica</DefaultFont>"));
        assert!(xml.contains("PaperType=\"iso-a4\""));
        assert!(xml.contains("<Border Weight=\"1\">"));
        assert!(xml.contains("<PointsToNoteIDs>2, 3</PointsToNoteIDs>"));
        assert!(xml.contains("<String/>"));
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.scap");
        write_scap(&sample(), &path).unwrap();
        let back = crate::formats::scap::read_scap(&path).unwrap();
        assert_eq!(back.notes.len(), 3);
    }
}
