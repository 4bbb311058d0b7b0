//! Voice-line CSV format module
//!
//! One row per dialog node: `DialogName, Character, DialogLine, AudioClipName`.
//! The node id travels inside the clip name after an `ID_` token.

mod document;
mod reader;
mod writer;

pub use document::{
    ID_TOKEN, VoiceLineGroup, VoiceLineRecord, VoiceLineTable, clip_name, extract_identifier,
};
pub use reader::{parse_voice_lines, read_voice_lines};
pub use writer::{serialize_voice_lines, write_voice_lines};
