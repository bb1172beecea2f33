//! The request/response surface for a configuration UI.
//!
//! One closed set of tagged request variants, one dispatcher with a branch
//! per variant, one tagged response per outcome. Errors come back as a
//! payload, never as a panic, so a host can always show a message.

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::container::{
    Defaults, create_group, detect_defaults, refresh, refresh_all, resolve_target, update_group,
};
use crate::document::{Document, NodeId};
use crate::error::TidyError;
use crate::presets::{
    Preset, PresetStore, delete_preset, list_presets, load_preset, save_preset, update_preset,
};

/// Whether an apply request wraps the selection in a new container or
/// re-tidies the one it is in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    Create,
    Update,
}

/// A request from the UI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    /// Detected or stored settings for the current selection.
    GetDefaults,
    /// Apply a configuration to the current selection.
    Apply { mode: ApplyMode, config: Configuration },
    /// Re-apply the stored settings of the selected container.
    Refresh,
    /// Re-apply stored settings on every configured container.
    RefreshAll,
    SavePreset { name: String, config: Configuration },
    UpdatePreset { id: String, name: String, config: Configuration },
    DeletePreset { id: String },
    ListPresets,
    LoadPreset { id: String },
}

/// The dispatcher's answer, one variant per request outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    Defaults { defaults: Defaults },
    Applied { container: NodeId },
    Refreshed { container: NodeId },
    RefreshedAll { updated: usize, failed: usize },
    PresetSaved { preset: Preset },
    PresetUpdated { preset: Preset },
    PresetDeleted,
    Presets { presets: Vec<Preset> },
    PresetLoaded { preset: Preset },
    Error { message: String },
}

impl From<TidyError> for Response {
    fn from(e: TidyError) -> Self {
        Response::Error {
            message: e.to_string(),
        }
    }
}

/// Handle one UI request against the document and preset store.
pub fn handle(
    request: Request,
    doc: &mut dyn Document,
    store: &mut dyn PresetStore,
) -> Response {
    let selection = doc.selection();
    match request {
        Request::GetDefaults => match detect_defaults(doc, &selection) {
            Ok(defaults) => Response::Defaults { defaults },
            Err(e) => e.into(),
        },
        Request::Apply { mode, config } => {
            if !config.is_valid() {
                return Response::Error {
                    message: format!(
                        "alignment {:?} is not valid for {:?} layout",
                        config.alignment, config.layout
                    ),
                };
            }
            match mode {
                ApplyMode::Create => match create_group(doc, &selection, &config) {
                    Ok(container) => Response::Applied { container },
                    Err(e) => e.into(),
                },
                ApplyMode::Update => {
                    let container = match resolve_target(doc, &selection) {
                        Ok(container) => container,
                        Err(e) => return e.into(),
                    };
                    match update_group(doc, container, &config) {
                        Ok(()) => Response::Applied { container },
                        Err(e) => e.into(),
                    }
                }
            }
        }
        Request::Refresh => {
            let container = match resolve_target(doc, &selection) {
                Ok(container) => container,
                Err(e) => return e.into(),
            };
            match refresh(doc, container) {
                Ok(()) => Response::Refreshed { container },
                Err(e) => e.into(),
            }
        }
        Request::RefreshAll => {
            let (updated, failed) = refresh_all(doc);
            Response::RefreshedAll { updated, failed }
        }
        Request::SavePreset { name, config } => match save_preset(store, &name, config) {
            Ok(preset) => Response::PresetSaved { preset },
            Err(e) => e.into(),
        },
        Request::UpdatePreset { id, name, config } => {
            match update_preset(store, &id, &name, config) {
                Ok(preset) => Response::PresetUpdated { preset },
                Err(e) => e.into(),
            }
        }
        Request::DeletePreset { id } => match delete_preset(store, &id) {
            Ok(()) => Response::PresetDeleted,
            Err(e) => e.into(),
        },
        Request::ListPresets => match list_presets(store) {
            Ok(presets) => Response::Presets { presets },
            Err(e) => e.into(),
        },
        Request::LoadPreset { id } => match load_preset(store, &id) {
            Ok(preset) => Response::PresetLoaded { preset },
            Err(e) => e.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Alignment, Orientation, Padding};
    use crate::document::MemoryDocument;
    use crate::geometry::Rect;
    use crate::presets::MemoryPresetStore;

    fn config() -> Configuration {
        Configuration {
            padding: Padding::all(80.0),
            spacing: 10.0,
            layout: Orientation::Horizontal,
            alignment: Alignment::Top,
        }
    }

    fn doc_with_row() -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let ids: Vec<NodeId> = (0..3)
            .map(|i| doc.add_rect(root, Rect::new(i as f64 * 110.0, 0.0, 100.0, 100.0)))
            .collect();
        doc.set_selection(ids.clone());
        (doc, ids)
    }

    #[test]
    fn test_request_json_shape() {
        let req: Request =
            serde_json::from_str(r#"{"type": "load-preset", "id": "abc"}"#).unwrap();
        assert_eq!(req, Request::LoadPreset { id: "abc".into() });

        let req: Request = serde_json::from_str(
            r#"{"type": "apply", "mode": "create", "config": {
                "padding": {"top": 80.0, "right": 80.0, "bottom": 80.0, "left": 80.0},
                "spacing": 10.0, "layout": "horizontal", "alignment": "top"}}"#,
        )
        .unwrap();
        assert!(matches!(req, Request::Apply { mode: ApplyMode::Create, .. }));
    }

    #[test]
    fn test_apply_create_end_to_end() {
        let (mut doc, ids) = doc_with_row();
        let mut store = MemoryPresetStore::new();

        let response = handle(
            Request::Apply {
                mode: ApplyMode::Create,
                config: config(),
            },
            &mut doc,
            &mut store,
        );
        let Response::Applied { container } = response else {
            panic!("expected Applied, got {:?}", response);
        };
        assert_eq!(doc.rect(container).unwrap().w, 480.0);
        assert_eq!(doc.children(container), ids);
    }

    #[test]
    fn test_apply_rejects_off_axis_alignment() {
        let (mut doc, _) = doc_with_row();
        let mut store = MemoryPresetStore::new();
        let mut bad = config();
        bad.alignment = Alignment::Left;

        let response = handle(
            Request::Apply {
                mode: ApplyMode::Create,
                config: bad,
            },
            &mut doc,
            &mut store,
        );
        assert!(matches!(response, Response::Error { .. }));
    }

    #[test]
    fn test_refresh_reports_missing_configuration() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let container = doc.create_container(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.add_rect(container, Rect::new(10.0, 10.0, 20.0, 20.0));
        doc.set_selection(vec![container]);
        let mut store = MemoryPresetStore::new();

        let response = handle(Request::Refresh, &mut doc, &mut store);
        let Response::Error { message } = response else {
            panic!("expected error response");
        };
        assert!(message.contains("no stored"));
    }

    #[test]
    fn test_preset_round_trip_through_dispatcher() {
        let mut doc = MemoryDocument::new();
        let mut store = MemoryPresetStore::new();

        let response = handle(
            Request::SavePreset {
                name: "Cards".into(),
                config: config(),
            },
            &mut doc,
            &mut store,
        );
        let Response::PresetSaved { preset } = response else {
            panic!("expected PresetSaved");
        };

        let response = handle(Request::ListPresets, &mut doc, &mut store);
        let Response::Presets { presets } = response else {
            panic!("expected Presets");
        };
        // Default first, then the saved one.
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[1], preset);

        let response = handle(
            Request::DeletePreset {
                id: preset.id.clone(),
            },
            &mut doc,
            &mut store,
        );
        assert_eq!(response, Response::PresetDeleted);

        let response = handle(Request::LoadPreset { id: preset.id }, &mut doc, &mut store);
        assert!(matches!(response, Response::Error { .. }));
    }
}
