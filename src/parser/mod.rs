//! Parsers for deck configurations and labware definitions.
//!
//! Both formats are JSON; this module turns them into the typed structures the
//! deck model works with.

pub mod deck_json;
pub mod labware_json;

pub use deck_json::{parse_deck_config, parse_deck_file, DeckConfig, SlotConfig};
pub use labware_json::load_labware_definition;
