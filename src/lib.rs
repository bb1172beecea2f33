//! tidy-core: infer how rectangles are laid out, then re-arrange them into a
//! padded, evenly spaced container with persisted settings.
//!
//! The crate is split along the data flow: `detect` figures out what the
//! designer meant (spacing, orientation, alignment), `arrange` makes it
//! exact, `container` wraps the result and persists the configuration, and
//! `dispatch` is the request surface a configuration UI talks to. The host
//! document is always behind the `Document` trait.

mod arrange;
mod config;
mod container;
mod detect;
mod dispatch;
mod document;
mod error;
mod geometry;
mod presets;
pub mod wasm;

pub use arrange::arrange;
pub use config::{Alignment, CONFIG_KEY, Configuration, Orientation, Padding};
pub use container::{
    Defaults, GroupFrame, create_group, detect_defaults, group_frame, refresh, refresh_all,
    resolve_target, stored_config, update_group, update_group_resolved,
};
pub use detect::{Detected, classify, detect_spacing};
pub use dispatch::{ApplyMode, Request, Response, handle};
pub use document::{Document, MemoryDocument, NodeId};
pub use error::{Result, TidyError};
pub use geometry::{Bounds, Point, Rect, bounding_box};
pub use presets::{
    DEFAULT_PRESET_ID, MemoryPresetStore, Preset, PresetStore, default_preset, delete_preset,
    list_presets, load_preset, save_preset, update_preset,
};
