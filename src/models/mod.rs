//! Data models for the deck, its slots and the labware placed on them.
//!
//! Models are independent of how configurations and definitions are read;
//! see [`crate::parser`] for that.

pub mod deck;
pub mod labware;
pub mod offset;
pub mod slot;

// Re-export all model types
pub use deck::Deck;
pub use labware::{Labware, LabwareDefinition};
pub use offset::Offset;
pub use slot::{Slot, SlotSet};
