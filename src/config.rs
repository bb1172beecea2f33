//! Arrangement configuration: orientation, alignment, padding, spacing.
//!
//! A `Configuration` is what gets persisted on a container (as a JSON blob
//! under [`CONFIG_KEY`]) and what presets are made of. The serialized form
//! must round-trip exactly.

use serde::{Deserialize, Serialize};

/// Plugin-data key under which a container's last-applied settings are stored.
pub const CONFIG_KEY: &str = "tidy:config";

/// Layout direction for an arrangement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Leave positions untouched; only padding/container-resize logic runs.
    Maintain,
}

/// Cross-axis alignment. `Top`/`Center`/`Bottom` apply to horizontal layouts,
/// `Left`/`Center`/`Right` to vertical ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Top,
    Center,
    Bottom,
    Left,
    Right,
}

/// Distance from a container's edges to its content bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Uniform padding on all sides.
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn zero() -> Self {
        Self::all(0.0)
    }
}

/// A full set of arrangement settings, applied in one operation and persisted
/// for later re-application.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub padding: Padding,
    pub spacing: f64,
    pub layout: Orientation,
    pub alignment: Alignment,
}

impl Configuration {
    /// Whether the alignment value is legal for the chosen orientation.
    /// Alignment is unused (always accepted) for `Maintain`.
    pub fn is_valid(&self) -> bool {
        match self.layout {
            Orientation::Horizontal => matches!(
                self.alignment,
                Alignment::Top | Alignment::Center | Alignment::Bottom
            ),
            Orientation::Vertical => matches!(
                self.alignment,
                Alignment::Left | Alignment::Center | Alignment::Right
            ),
            Orientation::Maintain => true,
        }
    }
}

impl Default for Configuration {
    /// The conceptual "Default" preset: wrap with generous padding, move
    /// nothing.
    fn default() -> Self {
        Self {
            padding: Padding::all(80.0),
            spacing: 0.0,
            layout: Orientation::Maintain,
            alignment: Alignment::Top,
        }
    }
}
