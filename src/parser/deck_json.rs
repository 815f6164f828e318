//! Deck configuration parser.
//!
//! A deck configuration is a JSON document describing the bed and its slots:
//!
//! ```json
//! {
//!   "bedType": "standard",
//!   "deckSlots": {"total": 2, "type": "grid"},
//!   "offsetFrom": {"corner": "bottom_left"},
//!   "material": {"top": "aluminum"},
//!   "slots": {
//!     "A1": {"offset": [0, 0, 0], "has_labware": false, "labware": ""},
//!     "A2": {"offset": [140, 0, 0], "has_labware": false, "labware": ""}
//!   }
//! }
//! ```
//!
//! The top level is parsed loosely (the deck reads what it needs on demand),
//! while every `slots` entry is mapped explicitly onto [`SlotConfig`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{DeckError, Result};
use crate::models::{Offset, Slot, SlotSet};

/// Raw deck configuration.
///
/// This is the source of truth a [`Deck`](crate::models::Deck) keeps; deck
/// metadata accessors read from it on every call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckConfig {
    /// Slot entries keyed by slot identifier, in file order
    #[serde(default)]
    pub slots: Map<String, Value>,
    /// Bed type label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
    /// Slot layout summary (`total`, `type`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_slots: Option<Value>,
    /// Reference-frame descriptor for slot offsets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_from: Option<Value>,
    /// Deck material descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Value>,
    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeckConfig {
    /// Builds the slot collection from the `slots` section.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidSlot`] for the first entry that does not map
    /// onto a [`SlotConfig`].
    pub fn build_slots(&self) -> Result<SlotSet> {
        self.slots
            .iter()
            .map(|(id, entry)| SlotConfig::from_entry(id, entry)?.into_slot(id))
            .collect()
    }
}

/// One entry of the `slots` section.
///
/// All three fields are required and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotConfig {
    /// Placement offset, a three-element array
    pub offset: Offset,
    /// Occupancy flag; must be `false` in a configuration
    pub has_labware: bool,
    /// Labware placeholder; must be empty or `null` in a configuration
    pub labware: Value,
}

impl SlotConfig {
    /// Maps a raw `slots` entry onto a `SlotConfig`.
    pub fn from_entry(slot: &str, entry: &Value) -> Result<Self> {
        Self::deserialize(entry).map_err(|e| DeckError::invalid_slot(slot, e.to_string()))
    }

    /// Converts the entry into an empty [`Slot`].
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidSlot`] if the entry claims labware is already
    /// loaded, since there is no labware entity to bind.
    pub fn into_slot(self, slot: &str) -> Result<Slot> {
        let placeholder_empty = match &self.labware {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        };

        if self.has_labware || !placeholder_empty {
            return Err(DeckError::invalid_slot(
                slot,
                "preloaded labware is not supported; load it with load_labware",
            ));
        }

        Ok(Slot::new(slot, self.offset))
    }
}

/// Parses a deck configuration from a JSON string.
pub fn parse_deck_config(content: &str) -> Result<DeckConfig> {
    let config: DeckConfig = serde_json::from_str(content)?;
    debug!(slots = config.slots.len(), "parsed deck configuration");
    Ok(config)
}

/// Parses a deck configuration file.
///
/// # Errors
///
/// Returns [`DeckError::Io`] if the file cannot be read and
/// [`DeckError::Config`] if it is not a valid deck configuration.
pub fn parse_deck_file(path: &Path) -> Result<DeckConfig> {
    debug!(path = %path.display(), "reading deck configuration");
    let content = fs::read_to_string(path)?;
    parse_deck_config(&content)
}
