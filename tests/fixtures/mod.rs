//! Shared test fixtures for deck integration tests.
#![allow(dead_code)] // Not every test file uses every fixture

use labdeck::models::Deck;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Deck configuration with a 2x3 grid of slots named `0`..`5`, laid out the
/// way tool-changer decks usually number them.
pub fn six_slot_config() -> serde_json::Value {
    let mut slots = serde_json::Map::new();
    for index in 0..6 {
        let x = f64::from(index % 3) * 141.0;
        let y = f64::from(index / 3) * 95.0;
        slots.insert(
            index.to_string(),
            json!({"offset": [x, y, 0.0], "has_labware": false, "labware": ""}),
        );
    }

    json!({
        "bedType": "lab_automation_deck",
        "deckSlots": {"total": 6, "type": "SLAS standard"},
        "offsetFrom": {"corner": "bottom_left", "x": 0.0, "y": 0.0},
        "material": {"top": "aluminum", "bottom": "aluminum"},
        "slots": slots,
    })
}

/// Deck built from [`six_slot_config`].
pub fn six_slot_deck() -> Deck {
    Deck::from_json(&six_slot_config().to_string()).expect("fixture deck should parse")
}

/// Writes a deck configuration file and returns its path.
pub fn write_deck_file(dir: &Path, config: &serde_json::Value) -> PathBuf {
    let path = dir.join("deck.json");
    fs::write(&path, serde_json::to_string_pretty(config).unwrap()).unwrap();
    path
}

/// Writes a labware definition with the given name and height.
pub fn write_labware(dir: &Path, name: &str, z_dimension: f64) -> PathBuf {
    let definition = json!({
        "metadata": {"displayName": name, "displayCategory": "wellPlate"},
        "dimensions": {"xDimension": 127.76, "yDimension": 85.48, "zDimension": z_dimension},
        "parameters": {"loadName": name, "isTiprack": false},
    });
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, serde_json::to_string_pretty(&definition).unwrap()).unwrap();
    path
}

/// Temporary labware library holding a short plate, a tall tip rack and a
/// definition with no height.
pub fn labware_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_labware(dir.path(), "plate_96", 14.22);
    write_labware(dir.path(), "tiprack_300", 64.69);
    fs::write(
        dir.path().join("flat_sheet.json"),
        r#"{"metadata": {"displayName": "flat_sheet"}, "dimensions": {"xDimension": 100.0}}"#,
    )
    .unwrap();
    dir
}
