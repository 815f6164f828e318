//! Crate-wide constants.
//!
//! Default locations and file naming used when resolving labware definitions
//! and the settings file.

/// Directory searched for labware definition files when nothing else is configured.
pub const DEFAULT_LABWARE_PATH: &str = "../labware/labware_definition/";

/// Extension appended to labware definition filenames given without one.
pub const LABWARE_FILE_EXTENSION: &str = "json";

/// Name of the settings directory under the platform config directory.
pub const SETTINGS_DIR_NAME: &str = "labdeck";

/// Name of the settings file inside [`SETTINGS_DIR_NAME`].
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
