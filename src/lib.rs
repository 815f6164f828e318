//! Lab deck model library
//!
//! This library models the deck of a laboratory automation platform: a grid of
//! slots with spatial offsets onto which labware is loaded. It parses deck
//! configurations, resolves slots by identifier or position, binds labware
//! definitions to slots and tracks the safe travel height.
//!
//! ```no_run
//! use labdeck::models::Deck;
//! use std::path::Path;
//!
//! # fn main() -> labdeck::Result<()> {
//! let mut deck = Deck::from_file(Path::new("decks/lab_automation_deck.json"))?;
//! let plate = deck.load_labware("corning_96_wellplate_360ul_flat", "A1")?;
//! println!("plate at {:?}, safe z {:?}", plate.offset, deck.safe_z());
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;

pub use error::{DeckError, Result};
