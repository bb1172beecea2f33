//! Named configuration presets.
//!
//! Presets live in a process-wide collection behind an injected
//! [`PresetStore`] capability. The collection preserves insertion order for
//! display; ids are unique, names need not be. The "Default" preset is
//! conceptual: it is materialized on demand under a fixed id and is never
//! persisted or deletable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::{Result, TidyError};

/// Fixed id of the conceptual Default preset.
pub const DEFAULT_PRESET_ID: &str = "default";

/// A named, persisted configuration independent of any single container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub config: Configuration,
}

/// The materialized Default preset.
pub fn default_preset() -> Preset {
    Preset {
        id: DEFAULT_PRESET_ID.to_string(),
        name: "Default".to_string(),
        config: Configuration::default(),
    }
}

/// Persistence capability for the preset collection. Implementations load and
/// store the whole ordered list; failures surface as `Persistence` errors.
pub trait PresetStore {
    fn load(&self) -> Result<Vec<Preset>>;
    fn save(&mut self, presets: &[Preset]) -> Result<()>;
}

/// Generate a unique preset id: millisecond timestamp plus a process-local
/// counter. Uniqueness is the only contract; the format is opaque to callers.
fn generate_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", ms, n)
}

/// All presets for display: the Default first, then stored ones in insertion
/// order.
pub fn list_presets(store: &dyn PresetStore) -> Result<Vec<Preset>> {
    let mut presets = vec![default_preset()];
    presets.extend(store.load()?);
    Ok(presets)
}

/// Store a new preset under a freshly generated id and return it.
pub fn save_preset(
    store: &mut dyn PresetStore,
    name: &str,
    config: Configuration,
) -> Result<Preset> {
    let preset = Preset {
        id: generate_id(),
        name: name.to_string(),
        config,
    };
    let mut presets = store.load()?;
    presets.push(preset.clone());
    store.save(&presets)?;
    Ok(preset)
}

/// Overwrite an existing stored preset's name and configuration.
pub fn update_preset(
    store: &mut dyn PresetStore,
    id: &str,
    name: &str,
    config: Configuration,
) -> Result<Preset> {
    let mut presets = store.load()?;
    let slot = presets
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| TidyError::PresetNotFound(id.to_string()))?;
    slot.name = name.to_string();
    slot.config = config;
    let updated = slot.clone();
    store.save(&presets)?;
    Ok(updated)
}

/// Remove a stored preset. Deleting an unknown id is a no-op, and the Default
/// preset is never deletable.
pub fn delete_preset(store: &mut dyn PresetStore, id: &str) -> Result<()> {
    if id == DEFAULT_PRESET_ID {
        return Ok(());
    }
    let mut presets = store.load()?;
    let before = presets.len();
    presets.retain(|p| p.id != id);
    if presets.len() != before {
        store.save(&presets)?;
    }
    Ok(())
}

/// Fetch a preset by id (the Default id always resolves).
pub fn load_preset(store: &dyn PresetStore, id: &str) -> Result<Preset> {
    if id == DEFAULT_PRESET_ID {
        return Ok(default_preset());
    }
    store
        .load()?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| TidyError::PresetNotFound(id.to_string()))
}

/// In-memory store, for tests and host-less use.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStore {
    presets: Vec<Preset>,
    fail: bool,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every storage operation fail.
    pub fn fail_operations(&mut self) {
        self.fail = true;
    }
}

impl PresetStore for MemoryPresetStore {
    fn load(&self) -> Result<Vec<Preset>> {
        if self.fail {
            return Err(TidyError::Persistence("preset store unavailable".into()));
        }
        Ok(self.presets.clone())
    }

    fn save(&mut self, presets: &[Preset]) -> Result<()> {
        if self.fail {
            return Err(TidyError::Persistence("preset store unavailable".into()));
        }
        self.presets = presets.to_vec();
        Ok(())
    }
}
