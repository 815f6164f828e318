//! Labware definition loader.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::LABWARE_FILE_EXTENSION;
use crate::error::{DeckError, Result};
use crate::models::LabwareDefinition;

/// Resolves a definition filename inside a search directory.
///
/// Filenames given without an extension get `.json` appended, so `"plate_96"`
/// and `"plate_96.json"` name the same file.
#[must_use]
pub fn definition_path(filename: &str, dir: &Path) -> PathBuf {
    let path = dir.join(filename);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(LABWARE_FILE_EXTENSION)
    }
}

/// Reads and parses a labware definition file.
///
/// # Arguments
///
/// * `filename` - Definition file name, with or without `.json`
/// * `dir` - Directory to look in
///
/// # Errors
///
/// Returns [`DeckError::LabwareIo`] if the file cannot be read and
/// [`DeckError::LabwareParse`] if it is not a JSON object.
pub fn load_labware_definition(filename: &str, dir: &Path) -> Result<LabwareDefinition> {
    let path = definition_path(filename, dir);
    debug!(path = %path.display(), "loading labware definition");

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) => return Err(DeckError::LabwareIo { path, source }),
    };

    serde_json::from_str(&content).map_err(|source| DeckError::LabwareParse { path, source })
}
