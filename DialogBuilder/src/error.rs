//! Error types for `DialogBuilder`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `DialogBuilder` operations.
///
/// Only conditions that abort a whole operation live here. Skipped elements and
/// review warnings are reported as [`crate::tree::Diagnostic`]s instead.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Scap (mind-map) Structure Errors ====================
    /// The document has no root element at all.
    #[error("scap document has no root element")]
    MissingRootElement,

    /// The root element has no `<Notes>` child.
    #[error("no <Notes> element found in scap document (root: <{root}>)")]
    MissingNotesElement {
        /// Name of the root element that was found.
        root: String,
    },

    // ==================== Tree Errors ====================
    /// A node referenced by id does not exist in the tree.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A node with the same id is already part of the tree.
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// No trees were given to an operation that needs at least one.
    #[error("no dialog trees given")]
    NoTrees,

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("invalid config {path}: {source}")]
    Config {
        /// Path of the offending config file.
        path: PathBuf,
        /// The TOML error.
        source: toml::de::Error,
    },

    /// A layout policy or naming scheme name was not recognised.
    #[error("unknown {kind} '{value}'")]
    UnknownOption {
        /// What was being parsed ("layout policy", "naming scheme").
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `DialogBuilder` operations.
pub type Result<T> = std::result::Result<T, Error>;
