//! Spatial offset of a slot relative to the deck's reference frame.

use serde::{Deserialize, Serialize};

/// Translation `(x, y, z)` from the deck origin to a placement point.
///
/// Serialized as a three-element array (`[x, y, z]`), which is how deck
/// configuration files write it. Sequences of any other length are rejected
/// on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Offset {
    /// X translation
    pub x: f64,
    /// Y translation
    pub y: f64,
    /// Z translation
    pub z: f64,
}

impl Offset {
    /// Creates a new `Offset`.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the offset as an `(x, y, z)` tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Offset {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Offset> for [f64; 3] {
    fn from(offset: Offset) -> Self {
        [offset.x, offset.y, offset.z]
    }
}

impl From<(f64, f64, f64)> for Offset {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
