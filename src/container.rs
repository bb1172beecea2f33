//! The container layout orchestrator.
//!
//! Composes detection, arrangement and the document boundary into the
//! end-to-end operations: create a new tidied container from a selection,
//! re-tidy an existing container, refresh from stored settings, and refresh
//! every configured container in the document.
//!
//! Coordinate discipline: arrangement only happens in absolute coordinates.
//! Updating an existing container therefore round-trips its members
//! relative -> absolute -> arrange -> relative.

use serde::Serialize;

use crate::arrange::arrange;
use crate::config::{Alignment, CONFIG_KEY, Configuration, Orientation, Padding};
use crate::detect::{classify, detect_spacing};
use crate::document::{Document, NodeId};
use crate::error::{Result, TidyError};
use crate::geometry::{Point, Rect, bounding_box};

/// Settings offered to the UI before anything is applied: either the
/// container's stored configuration, or freshly detected values.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Defaults {
    pub padding: Padding,
    pub spacing: Option<f64>,
    pub layout: Orientation,
    pub alignment: Alignment,
    /// True when these came from a persisted configuration.
    pub stored: bool,
}

/// A container's computed geometry: its own rect (in the parent frame) and
/// each member's position relative to the container origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupFrame {
    pub container: Rect,
    pub relative: Vec<Point>,
}

/// Compute the container frame for already-arranged absolute rectangles:
/// origin is the content bounding box inset by the left/top padding, size is
/// the furthest member extent plus the right/bottom padding.
pub fn group_frame(rects: &[Rect], padding: &Padding) -> Result<GroupFrame> {
    let bounds = bounding_box(rects)?;
    let relative: Vec<Point> = rects
        .iter()
        .map(|r| Point {
            x: r.x - bounds.min_x + padding.left,
            y: r.y - bounds.min_y + padding.top,
        })
        .collect();

    let mut content_w: f64 = 0.0;
    let mut content_h: f64 = 0.0;
    for (p, r) in relative.iter().zip(rects) {
        content_w = content_w.max(p.x + r.w);
        content_h = content_h.max(p.y + r.h);
    }

    Ok(GroupFrame {
        container: Rect::new(
            bounds.min_x - padding.left,
            bounds.min_y - padding.top,
            content_w + padding.right,
            content_h + padding.bottom,
        ),
        relative,
    })
}

/// Arrange the selected rectangles and wrap them in a new container.
/// Returns the created container's id.
pub fn create_group(
    doc: &mut dyn Document,
    ids: &[NodeId],
    config: &Configuration,
) -> Result<NodeId> {
    let members = eligible_members(doc, ids);
    if members.is_empty() {
        return Err(TidyError::EmptySelection);
    }
    let parent = doc.parent(members[0].0).unwrap_or_else(|| doc.root());
    place_group(doc, None, parent, members, config)
}

/// Re-arrange an existing container's members with the given configuration,
/// resizing the container to fit.
pub fn update_group(
    doc: &mut dyn Document,
    container: NodeId,
    config: &Configuration,
) -> Result<()> {
    let container_rect = doc.rect(container).ok_or(TidyError::NotInContainer)?;
    let members = eligible_members(doc, &doc.children(container));
    if members.is_empty() {
        return Err(TidyError::EmptySelection);
    }
    let parent = doc.parent(container).unwrap_or_else(|| doc.root());

    // Step 0: move members out to the former parent, converting their stored
    // positions from container-relative to absolute so arrangement operates
    // in one frame.
    let mut absolute = Vec::with_capacity(members.len());
    for (id, rel) in members {
        let abs = Rect::new(
            rel.x + container_rect.x,
            rel.y + container_rect.y,
            rel.w,
            rel.h,
        );
        if let Err(e) = doc.reparent(id, parent) {
            log::warn!("could not detach node {:?} for re-tidy: {}", id, e);
        }
        if let Err(e) = doc.set_position(id, abs.x, abs.y) {
            log::warn!("could not move node {:?}: {}", id, e);
        }
        absolute.push((id, abs));
    }

    place_group(doc, Some(container), parent, absolute, config)?;
    Ok(())
}

/// Re-tidy using the stored configuration if one exists (malformed blobs fall
/// back to detection with a warning), else detect everything from the current
/// geometry.
pub fn update_group_resolved(doc: &mut dyn Document, container: NodeId) -> Result<()> {
    let config = match stored_config(doc, container) {
        Ok(Some(config)) => config,
        Ok(None) => detect_config(doc, container),
        Err(e) => {
            log::warn!("stored tidy settings unreadable, re-detecting: {}", e);
            detect_config(doc, container)
        }
    };
    update_group(doc, container, &config)
}

/// Re-tidy strictly from the stored configuration. A missing blob is
/// `NoStoredConfiguration`, a malformed one `MalformedStoredConfiguration`;
/// both abort before any document mutation.
pub fn refresh(doc: &mut dyn Document, container: NodeId) -> Result<()> {
    let blob = doc
        .plugin_data(container, CONFIG_KEY)
        .ok_or(TidyError::NoStoredConfiguration)?;
    let config: Configuration = serde_json::from_str(&blob)?;
    update_group(doc, container, &config)
}

/// Re-tidy every container in the document that carries stored settings.
/// One container's failure never stops the rest; returns (updated, failed).
pub fn refresh_all(doc: &mut dyn Document) -> (usize, usize) {
    let mut targets = Vec::new();
    // Depth-first in document order, for deterministic processing.
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if doc.is_container(id) && doc.plugin_data(id, CONFIG_KEY).is_some() {
            targets.push(id);
        }
        let mut children = doc.children(id);
        children.reverse();
        stack.extend(children);
    }

    let mut updated = 0;
    let mut failed = 0;
    for container in targets {
        match update_group_resolved(doc, container) {
            Ok(()) => updated += 1,
            Err(e) => {
                log::warn!("re-tidy of container {:?} failed: {}", container, e);
                failed += 1;
            }
        }
    }
    (updated, failed)
}

/// Resolve the update target from a selection: the selected container itself,
/// or the nearest container ancestor of any selected node.
pub fn resolve_target(doc: &dyn Document, ids: &[NodeId]) -> Result<NodeId> {
    if ids.is_empty() {
        return Err(TidyError::EmptySelection);
    }
    let root = doc.root();
    for &id in ids {
        if id != root && doc.is_container(id) {
            return Ok(id);
        }
        let mut cursor = id;
        while let Some(parent) = doc.parent(cursor) {
            if parent != root && doc.is_container(parent) {
                return Ok(parent);
            }
            cursor = parent;
        }
    }
    Err(TidyError::NotInContainer)
}

/// Settings to prefill the UI with for the current selection: the stored
/// configuration when the target container has a readable one, otherwise
/// detection results (with measured padding for containers, zero padding for
/// loose selections).
pub fn detect_defaults(doc: &dyn Document, ids: &[NodeId]) -> Result<Defaults> {
    if ids.is_empty() {
        return Err(TidyError::EmptySelection);
    }

    if let Ok(container) = resolve_target(doc, ids) {
        if let Ok(Some(config)) = stored_config(doc, container) {
            return Ok(Defaults {
                padding: config.padding,
                spacing: Some(config.spacing),
                layout: config.layout,
                alignment: config.alignment,
                stored: true,
            });
        }
        let config = detect_config(doc, container);
        return Ok(Defaults {
            padding: config.padding,
            spacing: Some(config.spacing),
            layout: config.layout,
            alignment: config.alignment,
            stored: false,
        });
    }

    let members = eligible_members(doc, ids);
    if members.is_empty() {
        return Err(TidyError::EmptySelection);
    }
    let rects: Vec<Rect> = members.iter().map(|(_, r)| *r).collect();
    let detected = classify(&rects);
    Ok(Defaults {
        padding: Padding::zero(),
        spacing: detect_spacing(&rects),
        layout: detected.layout,
        alignment: detected.alignment,
        stored: false,
    })
}

/// The persisted configuration, if any. `Err` means a blob exists but does
/// not deserialize; the caller decides whether that is soft or hard.
pub fn stored_config(doc: &dyn Document, container: NodeId) -> Result<Option<Configuration>> {
    match doc.plugin_data(container, CONFIG_KEY) {
        Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        None => Ok(None),
    }
}

/// Shared skeleton of Create and Update, operating on absolute-coordinate
/// members: arrange, compute the container frame, create or move/resize the
/// container, reparent members in at relative positions, persist the
/// configuration.
fn place_group(
    doc: &mut dyn Document,
    existing: Option<NodeId>,
    parent: NodeId,
    members: Vec<(NodeId, Rect)>,
    config: &Configuration,
) -> Result<NodeId> {
    let ids: Vec<NodeId> = members.iter().map(|(id, _)| *id).collect();
    let mut rects: Vec<Rect> = members.iter().map(|(_, r)| *r).collect();

    // Lay out from where the content already is.
    let origin = bounding_box(&rects)?;
    arrange(
        &mut rects,
        config.layout,
        config.alignment,
        config.spacing,
        origin.min_x,
        origin.min_y,
    );

    let frame = group_frame(&rects, &config.padding)?;
    let container = match existing {
        Some(container) => {
            doc.set_position(container, frame.container.x, frame.container.y)?;
            doc.resize(container, frame.container.w, frame.container.h)?;
            container
        }
        None => doc.create_container(parent, frame.container),
    };

    // Per-member failures are soft: log, skip, keep going.
    for (id, rel) in ids.iter().zip(&frame.relative) {
        if let Err(e) = doc.reparent(*id, container) {
            log::warn!("could not move node {:?} into container: {}", id, e);
            continue;
        }
        if let Err(e) = doc.set_position(*id, rel.x, rel.y) {
            log::warn!("could not position node {:?}: {}", id, e);
        }
    }

    let blob =
        serde_json::to_string(config).map_err(|e| TidyError::Persistence(e.to_string()))?;
    doc.set_plugin_data(container, CONFIG_KEY, &blob);
    Ok(container)
}

/// Selected nodes that have geometry, paired with their current rects.
fn eligible_members(doc: &dyn Document, ids: &[NodeId]) -> Vec<(NodeId, Rect)> {
    let root = doc.root();
    ids.iter()
        .filter(|id| **id != root)
        .filter_map(|id| doc.rect(*id).map(|r| (*id, r)))
        .collect()
}

/// Detection fallback for an existing container: infer spacing and layout
/// from the members, measure padding as the distance from the content
/// bounding box to the container edges (clamped at zero for overflow).
fn detect_config(doc: &dyn Document, container: NodeId) -> Configuration {
    let members = eligible_members(doc, &doc.children(container));
    let rects: Vec<Rect> = members.iter().map(|(_, r)| *r).collect();
    let (Some(container_rect), Ok(bounds)) = (doc.rect(container), bounding_box(&rects)) else {
        return Configuration::default();
    };

    let detected = classify(&rects);
    Configuration {
        padding: Padding {
            top: bounds.min_y.max(0.0),
            right: (container_rect.w - bounds.max_x).max(0.0),
            bottom: (container_rect.h - bounds.max_y).max(0.0),
            left: bounds.min_x.max(0.0),
        },
        spacing: detect_spacing(&rects).unwrap_or(0.0),
        layout: detected.layout,
        alignment: detected.alignment,
    }
}
