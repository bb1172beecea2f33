//! The host document boundary.
//!
//! The core never owns canvas elements; it reads and writes them through the
//! [`Document`] trait so a host adapter (or a test double) can be injected.
//! Positions are raw numbers whose coordinate frame is defined by the node's
//! parent; reparenting never rewrites them, the orchestrator converts
//! explicitly before and after.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{Result, TidyError};
use crate::geometry::Rect;

/// Opaque handle to a node in the host document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

/// Read/write access to the host document's node tree.
pub trait Document {
    /// The root of the working set (not itself a tidy container).
    fn root(&self) -> NodeId;

    /// Currently selected nodes, in document order.
    fn selection(&self) -> Vec<NodeId>;

    /// Position and size of a node, in its parent's frame. `None` for nodes
    /// without geometry.
    fn rect(&self, id: NodeId) -> Option<Rect>;

    /// Move a node. May fail per node (locked elements and the like); the
    /// caller decides whether that aborts anything.
    fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> Result<()>;

    /// Resize a node.
    fn resize(&mut self, id: NodeId, w: f64, h: f64) -> Result<()>;

    /// Whether the node is a grouping entity that can own children.
    fn is_container(&self, id: NodeId) -> bool;

    /// Create a new empty container under `parent` with the given geometry.
    fn create_container(&mut self, parent: NodeId, rect: Rect) -> NodeId;

    /// Move `child` under `new_parent`, keeping its stored position numbers.
    fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<()>;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Direct children, in document order.
    fn children(&self, id: NodeId) -> Vec<NodeId>;

    /// Opaque per-node key/value storage.
    fn plugin_data(&self, id: NodeId, key: &str) -> Option<String>;

    fn set_plugin_data(&mut self, id: NodeId, key: &str, value: &str);
}

// ============================================================================
// In-memory document
// ============================================================================

#[derive(Debug, Clone)]
struct NodeRecord {
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    container: bool,
    plugin_data: HashMap<String, String>,
}

/// A self-contained [`Document`] implementation. Used as the test double and
/// for running the orchestrator natively without a host.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<NodeRecord>,
    selection: Vec<NodeId>,
    /// Nodes whose position writes fail, to exercise soft-failure paths.
    locked: HashSet<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self::default();
        // Node 0 is the root.
        doc.nodes.push(NodeRecord {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            parent: None,
            children: Vec::new(),
            container: false,
            plugin_data: HashMap::new(),
        });
        doc
    }

    /// Add a plain rectangle node under `parent`.
    pub fn add_rect(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        self.add_node(parent, rect, false)
    }

    pub fn set_selection(&mut self, ids: Vec<NodeId>) {
        self.selection = ids;
    }

    /// Make future position writes to `id` fail.
    pub fn lock(&mut self, id: NodeId) {
        self.locked.insert(id);
    }

    fn add_node(&mut self, parent: NodeId, rect: Rect, container: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeRecord {
            rect,
            parent: Some(parent),
            children: Vec::new(),
            container,
            plugin_data: HashMap::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id.0).map(|n| n.rect)
    }

    fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> Result<()> {
        if self.locked.contains(&id) {
            return Err(TidyError::Persistence(format!("node {} is locked", id.0)));
        }
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| TidyError::Persistence(format!("no such node {}", id.0)))?;
        node.rect.x = x;
        node.rect.y = y;
        Ok(())
    }

    fn resize(&mut self, id: NodeId, w: f64, h: f64) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| TidyError::Persistence(format!("no such node {}", id.0)))?;
        node.rect.w = w;
        node.rect.h = h;
        Ok(())
    }

    fn is_container(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.container)
    }

    fn create_container(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        self.add_node(parent, rect, true)
    }

    fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<()> {
        if child.0 >= self.nodes.len() || new_parent.0 >= self.nodes.len() {
            return Err(TidyError::Persistence("reparent of unknown node".into()));
        }
        if let Some(old) = self.nodes[child.0].parent {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(child);
        Ok(())
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.get(id.0).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn plugin_data(&self, id: NodeId, key: &str) -> Option<String> {
        self.nodes.get(id.0).and_then(|n| n.plugin_data.get(key).cloned())
    }

    fn set_plugin_data(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.plugin_data.insert(key.to_string(), value.to_string());
        }
    }
}
