//! Error types for deck construction, slot lookup and labware loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`Deck`](crate::models::Deck) and its collaborators.
///
/// Every failure aborts the current operation; nothing is retried and the deck
/// is left exactly as it was before the call.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The key is neither a slot identifier nor a valid position.
    #[error("no such slot: '{key}' is not a slot identifier or a valid position")]
    SlotNotFound {
        /// The identifier or position that failed to resolve
        key: String,
    },

    /// A required key is missing from the deck configuration or a labware definition.
    #[error("missing key: {key}")]
    MissingKey {
        /// Dotted path of the missing key (e.g. `deckSlots.total`)
        key: String,
    },

    /// A configuration key is present but its value has the wrong type.
    #[error("invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// Dotted path of the key (e.g. `deckSlots.total`)
        key: String,
        /// Description of the accepted values
        expected: &'static str,
    },

    /// A `slots` entry could not be mapped onto a slot record.
    #[error("invalid configuration for slot '{slot}': {reason}")]
    InvalidSlot {
        /// Slot identifier as configured
        slot: String,
        /// What was wrong with the entry
        reason: String,
    },

    /// A labware definition file could not be read.
    #[error("failed to read labware definition {}: {source}", .path.display())]
    LabwareIo {
        /// Resolved path of the definition file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A labware definition file is not valid JSON for a labware definition.
    #[error("failed to parse labware definition {}: {source}", .path.display())]
    LabwareParse {
        /// Resolved path of the definition file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The deck configuration is not valid JSON or has the wrong shape.
    #[error("invalid deck configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The deck configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    pub(crate) fn slot_not_found(key: impl Into<String>) -> Self {
        Self::SlotNotFound { key: key.into() }
    }

    pub(crate) fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub(crate) fn invalid_value(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            key: key.into(),
            expected,
        }
    }

    pub(crate) fn invalid_slot(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSlot {
            slot: slot.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_not_found_message() {
        let err = DeckError::slot_not_found("Z9");
        assert_eq!(
            err.to_string(),
            "no such slot: 'Z9' is not a slot identifier or a valid position"
        );
    }

    #[test]
    fn test_missing_key_message() {
        let err = DeckError::missing_key("deckSlots.total");
        assert_eq!(err.to_string(), "missing key: deckSlots.total");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = DeckError::invalid_value("deckSlots.total", "a non-negative integer");
        assert_eq!(
            err.to_string(),
            "invalid value for deckSlots.total: expected a non-negative integer"
        );
    }

    #[test]
    fn test_labware_io_includes_path() {
        let err = DeckError::LabwareIo {
            path: PathBuf::from("defs/plate.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let message = err.to_string();
        assert!(message.contains("defs/plate.json"));
        assert!(message.contains("gone"));
    }
}
