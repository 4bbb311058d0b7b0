//! Voice-line table back onto dialog trees

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;
use crate::formats::csv::{self, VoiceLineRecord};
use crate::tree::{Diagnostic, Diagnostics, DialogTree};

/// Names of the audio clips that rows may bind to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioLibrary {
    clips: BTreeSet<String>,
}

impl AudioLibrary {
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clips: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect the file stems of every file below `dir`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be walked.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut clips = BTreeSet::new();
        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(stem) = entry.path().file_stem() {
                clips.insert(stem.to_string_lossy().into_owned());
            }
        }
        tracing::debug!("Found {} audio clips in {}", clips.len(), dir.as_ref().display());
        Ok(Self { clips })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Result of applying a voice-line table
#[derive(Debug, Clone, Default)]
pub struct CsvImportOutcome {
    /// Rows that matched a node
    pub matched: usize,
    /// Rows that bound an audio clip
    pub bound_clips: usize,
    pub diagnostics: Diagnostics,
}

/// Apply voice-line rows to the nodes they name.
///
/// The node id is read from each row's clip name and looked up in the tree named
/// by the row's `DialogName`; rows without a name search every tree. A row with a
/// `DialogLine` replaces the node's text; an empty cell leaves it unchanged. When an audio
/// library is given, the clip is bound if the library has it. Rows without an
/// id (such as the documentation row) are skipped. Several rows for one node
/// apply in order, so the last one wins.
pub fn apply_voice_lines(
    trees: &mut [DialogTree],
    records: &[VoiceLineRecord],
    audio: Option<&AudioLibrary>,
) -> CsvImportOutcome {
    let mut outcome = CsvImportOutcome::default();
    let mut seen: HashMap<(usize, String), Option<String>> = HashMap::new();

    for record in records {
        let Some(identifier) = record.identifier() else {
            tracing::debug!("Skipping row without node id: {:?}", record.audio_clip_name);
            continue;
        };

        // ids repeat across trees, so a row only matches inside its own DialogName
        let dialog_name = record.dialog_name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let found = trees
            .iter_mut()
            .enumerate()
            .filter(|(_, tree)| dialog_name.is_none_or(|name| tree.name == name))
            .find_map(|(index, tree)| tree.get_node_mut(identifier).map(|node| (index, node)));
        let Some((tree_index, node)) = found else {
            outcome.diagnostics.push(Diagnostic::UnknownCsvIdentifier {
                identifier: identifier.to_string(),
            });
            continue;
        };
        outcome.matched += 1;

        if let Some(previous) = seen.insert((tree_index, identifier.to_string()), record.dialog_line.clone())
            && previous != record.dialog_line
        {
            outcome.diagnostics.push(Diagnostic::ConflictingCsvRows {
                identifier: identifier.to_string(),
            });
        }

        if let Some(ref line) = record.dialog_line {
            node.dialog_line.clone_from(line);
        }

        if let (Some(library), Some(clip)) = (audio, record.audio_clip_name.as_deref()) {
            if library.contains(clip) {
                node.audio_clip = Some(clip.to_string());
                outcome.bound_clips += 1;
            } else {
                outcome.diagnostics.push(Diagnostic::MissingAudioClip { clip: clip.to_string() });
            }
        }
    }

    tracing::info!(
        "Applied {} of {} voice-line rows ({} clips bound)",
        outcome.matched,
        records.len(),
        outcome.bound_clips
    );
    outcome
}

/// Read a voice-line table and apply it
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn import_csv_file<P: AsRef<Path>>(
    trees: &mut [DialogTree],
    path: P,
    audio: Option<&AudioLibrary>,
) -> Result<CsvImportOutcome> {
    let records = csv::read_voice_lines(path)?;
    Ok(apply_voice_lines(trees, &records, audio))
}
