//! Deck model: slots, deck metadata, safe travel height and labware loading.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::constants::DEFAULT_LABWARE_PATH;
use crate::error::{DeckError, Result};
use crate::models::{Labware, LabwareDefinition, Slot, SlotSet};
use crate::parser::deck_json::{parse_deck_config, parse_deck_file, DeckConfig};
use crate::parser::labware_json::load_labware_definition;

/// The fixed surface of slots on an automation platform.
///
/// Deck metadata (`bed_type`, `total_slots`, ...) is read from the
/// configuration on every call. The slot collection is built once at
/// construction and then only changes through labware loading.
#[derive(Debug, Clone)]
pub struct Deck {
    config: DeckConfig,
    slots: SlotSet,
    safe_z: Option<f64>,
    labware_dir: PathBuf,
}

impl Deck {
    /// Builds a deck from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidSlot`] if any `slots` entry cannot be mapped
    /// onto a slot.
    pub fn new(config: DeckConfig) -> Result<Self> {
        let slots = config.build_slots()?;
        debug!(slots = slots.len(), bed_type = ?config.bed_type, "built deck");

        Ok(Self {
            config,
            slots,
            safe_z: None,
            labware_dir: PathBuf::from(DEFAULT_LABWARE_PATH),
        })
    }

    /// Builds a deck from a JSON configuration string.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::new(parse_deck_config(content)?)
    }

    /// Builds a deck from a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(parse_deck_file(path)?)
    }

    /// Uses the labware definitions directory from `settings`.
    #[must_use]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.with_labware_dir(settings.paths.labware_definitions.clone())
    }

    /// Sets the directory [`Deck::load_labware`] searches.
    #[must_use]
    pub fn with_labware_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.labware_dir = dir.into();
        self
    }

    /// Directory [`Deck::load_labware`] searches for definitions.
    #[must_use]
    pub fn labware_dir(&self) -> &Path {
        &self.labware_dir
    }

    /// The configuration this deck was built from.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// All slots, in configuration order.
    #[must_use]
    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    /// Looks up a slot by identifier, falling back to position.
    ///
    /// See [`SlotSet::resolve`].
    pub fn slot(&self, key: &str) -> Result<&Slot> {
        self.slots.resolve(key)
    }

    /// Slots that currently hold labware.
    pub fn occupied_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.has_labware())
    }

    /// Bed type label, empty if not configured.
    #[must_use]
    pub fn bed_type(&self) -> &str {
        self.config.bed_type.as_deref().unwrap_or("")
    }

    /// Configured number of slots (`deckSlots.total`).
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::MissingKey`] if `deckSlots` or its `total` is
    /// absent, and [`DeckError::InvalidValue`] if `total` is not a
    /// non-negative integer. Floats such as `6.0` count as invalid.
    pub fn total_slots(&self) -> Result<u64> {
        self.deck_slots_field("total")?
            .as_u64()
            .ok_or_else(|| DeckError::invalid_value("deckSlots.total", "a non-negative integer"))
    }

    /// Configured slot type (`deckSlots.type`).
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::MissingKey`] if `deckSlots` or its `type` is
    /// absent, and [`DeckError::InvalidValue`] if `type` is not a string.
    pub fn slot_type(&self) -> Result<&str> {
        self.deck_slots_field("type")?
            .as_str()
            .ok_or_else(|| DeckError::invalid_value("deckSlots.type", "a string"))
    }

    fn deck_slots_field(&self, field: &str) -> Result<&Value> {
        self.config
            .deck_slots
            .as_ref()
            .and_then(|deck_slots| deck_slots.get(field))
            .ok_or_else(|| DeckError::missing_key(format!("deckSlots.{field}")))
    }

    /// Reference-frame descriptor for slot offsets, an empty object if not configured.
    #[must_use]
    pub fn offset_from(&self) -> Value {
        self.config
            .offset_from
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Deck material descriptor, an empty object if not configured.
    #[must_use]
    pub fn material(&self) -> Value {
        self.config
            .material
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Minimum clearance height: the tallest labware loaded so far.
    ///
    /// `None` until the first labware is loaded.
    #[must_use]
    pub const fn safe_z(&self) -> Option<f64> {
        self.safe_z
    }

    /// Offers a new clearance height.
    ///
    /// The first value is always taken. After that a value replaces the stored
    /// one only when the stored one is `<=` it, so `safe_z` never decreases.
    pub fn set_safe_z(&mut self, value: f64) {
        match self.safe_z {
            None => self.safe_z = Some(value),
            Some(current) if current <= value => self.safe_z = Some(value),
            Some(_) => {}
        }
    }

    /// Loads a labware definition from the deck's labware directory into a slot.
    ///
    /// Equivalent to [`Deck::load_labware_from`] with [`Deck::labware_dir`].
    pub fn load_labware(&mut self, filename: &str, slot: &str) -> Result<Rc<Labware>> {
        let dir = self.labware_dir.clone();
        self.load_labware_from(filename, slot, &dir)
    }

    /// Loads a labware definition from `dir` into a slot.
    ///
    /// The slot's offset is copied onto the new labware, the slot is marked
    /// occupied and `safe_z` is raised to the labware height if it is taller
    /// than anything loaded before.
    ///
    /// `slot` is matched against slot identifiers only. Unlike [`Deck::slot`]
    /// there is no positional fallback, so a mistyped or numeric key never
    /// places labware in some other slot.
    ///
    /// # Errors
    ///
    /// - [`DeckError::SlotNotFound`] if no slot has the identifier `slot`
    /// - [`DeckError::LabwareIo`] / [`DeckError::LabwareParse`] if the
    ///   definition cannot be read or parsed
    /// - [`DeckError::MissingKey`] if the definition has no `dimensions.zDimension`
    ///
    /// The deck is unchanged when any of these occur.
    pub fn load_labware_from(
        &mut self,
        filename: &str,
        slot: &str,
        dir: &Path,
    ) -> Result<Rc<Labware>> {
        self.slot_by_identifier(slot)?;
        let definition = load_labware_definition(filename, dir)?;
        self.place_labware(definition, slot)
    }

    /// Binds an already parsed definition to a slot.
    ///
    /// Same effects and errors as [`Deck::load_labware_from`], without file access.
    pub fn place_labware(
        &mut self,
        definition: LabwareDefinition,
        slot: &str,
    ) -> Result<Rc<Labware>> {
        let offset = self.slot_by_identifier(slot)?.offset;
        let labware = Labware::new(definition);
        let height = labware.z_dimension()?;
        let labware = Rc::new(labware.with_offset(offset));

        let target = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| DeckError::slot_not_found(slot))?;
        if let Some(previous) = target.set_labware(Rc::clone(&labware)) {
            warn!(
                slot = %target.slot_index,
                previous = previous.display_name().unwrap_or("unnamed"),
                "replacing labware already loaded in slot"
            );
        }
        info!(
            slot = %target.slot_index,
            labware = labware.display_name().unwrap_or("unnamed"),
            height,
            "loaded labware"
        );

        self.set_safe_z(height);
        Ok(labware)
    }

    fn slot_by_identifier(&self, slot: &str) -> Result<&Slot> {
        self.slots
            .get(slot)
            .ok_or_else(|| DeckError::slot_not_found(slot))
    }

    /// Human-readable label for the deck: its bed type.
    #[must_use]
    pub fn describe(&self) -> String {
        self.bed_type().to_string()
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bed_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Offset;
    use serde_json::json;

    const SCENARIO: &str = r#"{
        "slots": {"A1": {"offset": [0,0,0], "has_labware": false, "labware": ""}},
        "bedType": "standard",
        "deckSlots": {"total": 1, "type": "grid"}
    }"#;

    fn two_slot_deck() -> Deck {
        Deck::from_json(
            r#"{
                "slots": {
                    "A1": {"offset": [10, 20, 0], "has_labware": false, "labware": ""},
                    "A2": {"offset": [150, 20, 0], "has_labware": false, "labware": null}
                },
                "bedType": "standard",
                "deckSlots": {"total": 2, "type": "grid"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deck_from_scenario_config() {
        let deck = Deck::from_json(SCENARIO).unwrap();

        assert_eq!(deck.bed_type(), "standard");
        assert_eq!(deck.total_slots().unwrap(), 1);
        assert_eq!(deck.slot_type().unwrap(), "grid");
        assert_eq!(deck.slot("A1").unwrap().offset.as_tuple(), (0.0, 0.0, 0.0));
        assert_eq!(deck.safe_z(), None);
        assert_eq!(deck.to_string(), "standard");
        assert_eq!(deck.describe(), "standard");
    }

    #[test]
    fn test_deck_slots_start_empty() {
        let deck = two_slot_deck();
        assert_eq!(deck.slots().len(), 2);
        assert!(deck.slots().iter().all(|s| !s.has_labware() && s.labware().is_none()));
        assert_eq!(deck.occupied_slots().count(), 0);
    }

    #[test]
    fn test_deck_defaults_when_metadata_absent() {
        let deck = Deck::from_json(r#"{"slots": {}}"#).unwrap();

        assert_eq!(deck.bed_type(), "");
        assert_eq!(deck.offset_from(), json!({}));
        assert_eq!(deck.material(), json!({}));
        assert!(deck.slots().is_empty());
    }

    #[test]
    fn test_deck_metadata_passthrough() {
        let deck = Deck::from_json(
            r#"{"slots": {}, "offsetFrom": {"corner": "front_left"}, "material": "aluminum"}"#,
        )
        .unwrap();

        assert_eq!(deck.offset_from(), json!({"corner": "front_left"}));
        assert_eq!(deck.material(), json!("aluminum"));
    }

    #[test]
    fn test_total_slots_and_type_missing_key() {
        let deck = Deck::from_json(r#"{"slots": {}}"#).unwrap();

        assert!(matches!(
            deck.total_slots(),
            Err(DeckError::MissingKey { ref key }) if key == "deckSlots.total"
        ));
        assert!(matches!(
            deck.slot_type(),
            Err(DeckError::MissingKey { ref key }) if key == "deckSlots.type"
        ));
    }

    #[test]
    fn test_total_slots_malformed() {
        let deck = Deck::from_json(r#"{"slots": {}, "deckSlots": {"total": "six", "type": 3}}"#)
            .unwrap();
        assert!(matches!(
            deck.total_slots(),
            Err(DeckError::InvalidValue { ref key, .. }) if key == "deckSlots.total"
        ));
        assert!(matches!(
            deck.slot_type(),
            Err(DeckError::InvalidValue { ref key, .. }) if key == "deckSlots.type"
        ));
    }

    #[test]
    fn test_total_slots_rejects_float() {
        let deck = Deck::from_json(r#"{"slots": {}, "deckSlots": {"total": 6.0, "type": "grid"}}"#)
            .unwrap();
        assert!(matches!(deck.total_slots(), Err(DeckError::InvalidValue { .. })));
        assert_eq!(deck.slot_type().unwrap(), "grid");
    }

    #[test]
    fn test_total_slots_missing_field_in_section() {
        let deck = Deck::from_json(r#"{"slots": {}, "deckSlots": {"type": "grid"}}"#).unwrap();
        assert!(matches!(
            deck.total_slots(),
            Err(DeckError::MissingKey { ref key }) if key == "deckSlots.total"
        ));
    }

    #[test]
    fn test_safe_z_high_water_mark() {
        let mut deck = two_slot_deck();

        deck.set_safe_z(10.0);
        assert_eq!(deck.safe_z(), Some(10.0));

        deck.set_safe_z(5.0);
        assert_eq!(deck.safe_z(), Some(10.0));

        deck.set_safe_z(10.0);
        assert_eq!(deck.safe_z(), Some(10.0));

        deck.set_safe_z(12.5);
        assert_eq!(deck.safe_z(), Some(12.5));
    }

    #[test]
    fn test_safe_z_first_value_taken_unconditionally() {
        let mut deck = two_slot_deck();
        deck.set_safe_z(-3.0);
        assert_eq!(deck.safe_z(), Some(-3.0));
    }

    #[test]
    fn test_safe_z_ignores_nan_after_first_value() {
        let mut deck = two_slot_deck();
        deck.set_safe_z(4.0);
        deck.set_safe_z(f64::NAN);
        assert_eq!(deck.safe_z(), Some(4.0));
    }

    #[test]
    fn test_place_labware_binds_slot() {
        let mut deck = two_slot_deck();
        let labware = deck
            .place_labware(LabwareDefinition::with_z_dimension(14.0), "A2")
            .unwrap();

        assert_eq!(labware.offset, Some(Offset::new(150.0, 20.0, 0.0)));
        let slot = deck.slot("A2").unwrap();
        assert!(slot.has_labware());
        assert!(Rc::ptr_eq(slot.labware().unwrap(), &labware));
        assert_eq!(deck.safe_z(), Some(14.0));
    }

    #[test]
    fn test_place_labware_requires_identifier() {
        let mut deck = two_slot_deck();

        for key in ["0", "1", "-1"] {
            let err = deck
                .place_labware(LabwareDefinition::with_z_dimension(3.0), key)
                .unwrap_err();
            assert!(matches!(err, DeckError::SlotNotFound { key: ref k } if k == key));
        }

        assert_eq!(deck.occupied_slots().count(), 0);
        assert_eq!(deck.safe_z(), None);
    }

    #[test]
    fn test_place_labware_safe_z_order_independent() {
        let mut forward = two_slot_deck();
        forward
            .place_labware(LabwareDefinition::with_z_dimension(10.0), "A1")
            .unwrap();
        forward
            .place_labware(LabwareDefinition::with_z_dimension(5.0), "A2")
            .unwrap();

        let mut reverse = two_slot_deck();
        reverse
            .place_labware(LabwareDefinition::with_z_dimension(5.0), "A1")
            .unwrap();
        reverse
            .place_labware(LabwareDefinition::with_z_dimension(10.0), "A2")
            .unwrap();

        assert_eq!(forward.safe_z(), Some(10.0));
        assert_eq!(reverse.safe_z(), Some(10.0));
    }

    #[test]
    fn test_place_labware_unknown_slot_leaves_deck_unchanged() {
        let mut deck = two_slot_deck();
        let err = deck
            .place_labware(LabwareDefinition::with_z_dimension(1.0), "Z9")
            .unwrap_err();

        assert!(matches!(err, DeckError::SlotNotFound { .. }));
        assert_eq!(deck.safe_z(), None);
        assert_eq!(deck.occupied_slots().count(), 0);
    }

    #[test]
    fn test_place_labware_without_height_leaves_slot_empty() {
        let mut deck = two_slot_deck();
        let err = deck
            .place_labware(LabwareDefinition::default(), "A1")
            .unwrap_err();

        assert!(matches!(err, DeckError::MissingKey { .. }));
        assert!(!deck.slot("A1").unwrap().has_labware());
        assert_eq!(deck.safe_z(), None);
    }

    #[test]
    fn test_place_labware_replaces_existing() {
        let mut deck = two_slot_deck();
        let first = deck
            .place_labware(LabwareDefinition::with_z_dimension(20.0), "A1")
            .unwrap();
        let second = deck
            .place_labware(LabwareDefinition::with_z_dimension(8.0), "A1")
            .unwrap();

        let slot = deck.slot("A1").unwrap();
        assert!(Rc::ptr_eq(slot.labware().unwrap(), &second));
        assert!(!Rc::ptr_eq(slot.labware().unwrap(), &first));
        // the replaced labware still counts towards clearance
        assert_eq!(deck.safe_z(), Some(20.0));
    }

    #[test]
    fn test_with_settings_sets_labware_dir() {
        let mut settings = Settings::new();
        settings.paths.labware_definitions = PathBuf::from("/srv/labware");

        let deck = two_slot_deck().with_settings(&settings);
        assert_eq!(deck.labware_dir(), Path::new("/srv/labware"));
    }

    #[test]
    fn test_default_labware_dir() {
        assert_eq!(two_slot_deck().labware_dir(), Path::new(DEFAULT_LABWARE_PATH));
    }

    #[test]
    fn test_invalid_slot_entry_fails_construction() {
        let result = Deck::from_json(r#"{"slots": {"A1": {"offset": [0, 0, 0]}}}"#);
        assert!(matches!(result, Err(DeckError::InvalidSlot { .. })));
    }
}
