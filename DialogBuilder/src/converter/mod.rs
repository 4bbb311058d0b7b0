//! Conversions between dialog trees and the interchange formats
//!
//! - [`import_scap`]: Scapple document -> tree (root detection, depths, classification)
//! - [`export_scap`]: trees -> Scapple document (plain or labeled notes)
//! - [`voice_line_table`] / [`export_csv`]: trees -> voice-line table
//! - [`apply_voice_lines`] / [`import_csv_file`]: voice-line table -> node text and clips

mod csv_export;
mod csv_import;
mod scap_export;
mod scap_import;

pub use csv_export::{CsvExportOutcome, UNKNOWN_CHARACTER, csv_file_name, export_csv, voice_line_table};
pub use csv_import::{AudioLibrary, CsvImportOutcome, apply_voice_lines, import_csv_file};
pub use scap_export::{ExportOptions, ExportOutcome, ExportVariant, GridParams, export_scap, export_scap_file};
pub use scap_import::{
    DEFAULT_CHARACTER_NAMES, ImportOptions, ImportOutcome, NoteText, classify_note, import_scap,
    import_scap_file,
};
