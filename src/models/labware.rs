//! Labware entity and its parsed definition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DeckError, Result};
use crate::models::Offset;

/// Parsed labware definition file.
///
/// Only the parts the deck reads are typed. Every other top-level field is kept
/// in `extra` so nothing in the definition is lost.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabwareDefinition {
    /// Physical dimensions (`xDimension`, `yDimension`, `zDimension`, ...)
    #[serde(default)]
    pub dimensions: Map<String, Value>,
    /// Descriptive metadata (`displayName`, `displayCategory`, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Remaining definition fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LabwareDefinition {
    /// Creates a definition with only a height, mostly useful for callers that
    /// build labware in code rather than from files.
    #[must_use]
    pub fn with_z_dimension(z_dimension: f64) -> Self {
        let mut dimensions = Map::new();
        dimensions.insert("zDimension".to_string(), Value::from(z_dimension));
        Self {
            dimensions,
            ..Self::default()
        }
    }
}

/// A plate, rack, tip box or other container placed on the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Labware {
    definition: LabwareDefinition,
    /// Placement offset, set when the labware is bound to a slot
    pub offset: Option<Offset>,
}

impl Labware {
    /// Creates labware from a parsed definition. The offset starts unset.
    #[must_use]
    pub fn new(definition: LabwareDefinition) -> Self {
        Self {
            definition,
            offset: None,
        }
    }

    /// Sets the placement offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The definition this labware was built from.
    #[must_use]
    pub fn definition(&self) -> &LabwareDefinition {
        &self.definition
    }

    /// Physical dimensions from the definition.
    #[must_use]
    pub fn dimensions(&self) -> &Map<String, Value> {
        &self.definition.dimensions
    }

    /// Height of the labware.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::MissingKey`] if `dimensions.zDimension` is absent
    /// or not a number.
    pub fn z_dimension(&self) -> Result<f64> {
        self.definition
            .dimensions
            .get("zDimension")
            .and_then(Value::as_f64)
            .ok_or_else(|| DeckError::missing_key("dimensions.zDimension"))
    }

    /// Human-readable name from `metadata.displayName`, if present.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.definition
            .metadata
            .get("displayName")
            .and_then(Value::as_str)
    }
}
