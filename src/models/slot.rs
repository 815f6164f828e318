//! Deck slots and the ordered slot collection.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DeckError, Result};
use crate::models::{Labware, Offset};

/// One addressable position on the deck that may hold one labware item.
///
/// The labware reference is shared: whoever loaded the labware holds the same
/// `Rc`, so the slot only tracks occupancy and does not decide how long the
/// labware lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Identifier, unique within a deck
    pub slot_index: String,
    /// Placement offset relative to the deck's reference frame
    pub offset: Offset,
    labware: Option<Rc<Labware>>,
}

impl Slot {
    /// Creates an empty slot.
    pub fn new(slot_index: impl Into<String>, offset: Offset) -> Self {
        Self {
            slot_index: slot_index.into(),
            offset,
            labware: None,
        }
    }

    /// Whether labware has been loaded into this slot.
    #[must_use]
    pub const fn has_labware(&self) -> bool {
        self.labware.is_some()
    }

    /// The labware currently bound to this slot.
    #[must_use]
    pub fn labware(&self) -> Option<&Rc<Labware>> {
        self.labware.as_ref()
    }

    /// Binds labware to this slot, returning whatever was bound before.
    pub fn set_labware(&mut self, labware: Rc<Labware>) -> Option<Rc<Labware>> {
        self.labware.replace(labware)
    }
}

/// Ordered collection of slots addressable by identifier or by position.
///
/// Order is the order slots were inserted, which for a deck is the order of
/// the `slots` section of its configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotSet {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl SlotSet {
    /// Creates an empty slot set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a slot. A slot with the same identifier is replaced in place and
    /// keeps its position.
    pub fn insert(&mut self, slot: Slot) {
        if let Some(&position) = self.index.get(&slot.slot_index) {
            self.slots[position] = slot;
        } else {
            self.index.insert(slot.slot_index.clone(), self.slots.len());
            self.slots.push(slot);
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates slots in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Iterates slot identifiers in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.slot_index.as_str())
    }

    /// Looks up a slot by identifier only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.index.get(key).map(|&position| &self.slots[position])
    }

    /// Mutable variant of [`SlotSet::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Slot> {
        let position = *self.index.get(key)?;
        self.slots.get_mut(position)
    }

    /// Looks up a slot by position only.
    #[must_use]
    pub fn get_index(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    /// Resolves a key to a slot.
    ///
    /// The key is tried as an identifier first. If no slot has that identifier
    /// and the key parses as an integer, it is used as a position in insertion
    /// order; negative values count back from the end.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::SlotNotFound`] when neither step finds a slot.
    pub fn resolve(&self, key: &str) -> Result<&Slot> {
        let position = self.resolve_position(key)?;
        Ok(&self.slots[position])
    }

    /// Mutable variant of [`SlotSet::resolve`].
    pub fn resolve_mut(&mut self, key: &str) -> Result<&mut Slot> {
        let position = self.resolve_position(key)?;
        Ok(&mut self.slots[position])
    }

    /// Two-step resolution: identifier, then integer position.
    fn resolve_position(&self, key: &str) -> Result<usize> {
        if let Some(&position) = self.index.get(key) {
            return Ok(position);
        }

        key.parse::<i64>()
            .ok()
            .and_then(|raw| self.normalize_position(raw))
            .ok_or_else(|| DeckError::slot_not_found(key))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn normalize_position(&self, raw: i64) -> Option<usize> {
        let len = i64::try_from(self.slots.len()).ok()?;
        let position = if raw < 0 { len + raw } else { raw };
        (0..len).contains(&position).then_some(position as usize)
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut set = Self::new();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}
