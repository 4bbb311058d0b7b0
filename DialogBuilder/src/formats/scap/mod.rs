//! Scapple mind-map (.scap) format module

mod document;
mod reader;
mod writer;

pub use document::{MAX_ID_RANGE, NoteAppearance, ScapDocument, ScapNote, format_id_list, parse_id_list};
pub use reader::{parse_scap, read_scap};
pub use writer::{serialize_scap, write_scap};
