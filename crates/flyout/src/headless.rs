#![forbid(unsafe_code)]

//! In-memory view layer.
//!
//! [`HeadlessView`] implements [`ViewLayer`] over a plain node store so the
//! popup component can be exercised without a host environment: the crate's
//! own tests run on it, and embedders can use it for headless runs.
//!
//! Transitions are modeled as instantaneous: `show`/`hide` flip a
//! visibility flag immediately. Their timing is the real host's business and
//! is out of scope here.
//!
//! # Invariants
//!
//! 1. Node ids are unique per view and never reused.
//! 2. Parent links only point at nodes that existed at insertion time, so
//!    ancestor chains are acyclic by construction.
//! 3. Marker storage preserves insertion order and holds no duplicates.

use std::collections::HashMap;

use crate::geometry::{Point, Rect, Size};
use crate::view::{Marker, NodeId, ViewError, ViewLayer};

#[derive(Debug, Clone)]
struct Node {
    bounds: Rect,
    parent: Option<NodeId>,
    markers: Vec<Marker>,
    visible: bool,
}

/// An in-memory scene of nodes implementing [`ViewLayer`].
#[derive(Debug, Clone)]
pub struct HeadlessView {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    viewport: Size,
}

impl HeadlessView {
    /// Create an empty scene with the given viewport extent.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
            viewport,
        }
    }

    /// Replace the viewport extent (a host window resize).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Insert a root node with the given bounds. Nodes start visible and
    /// unmarked.
    pub fn insert_node(&mut self, bounds: Rect) -> NodeId {
        self.alloc(bounds, None)
    }

    /// Insert a node parented to an existing one.
    pub fn insert_child(&mut self, parent: NodeId, bounds: Rect) -> Result<NodeId, ViewError> {
        if !self.nodes.contains_key(&parent) {
            return Err(ViewError::NodeNotFound { node: parent });
        }
        Ok(self.alloc(bounds, Some(parent)))
    }

    /// Current top-left corner of a node (inspection shorthand).
    pub fn position_of(&self, node: NodeId) -> Result<Point, ViewError> {
        Ok(self.node(node)?.bounds.origin())
    }

    /// Current visibility flag of a node.
    pub fn is_visible(&self, node: NodeId) -> Result<bool, ViewError> {
        Ok(self.node(node)?.visible)
    }

    /// Markers on a node, in insertion order.
    pub fn markers_of(&self, node: NodeId) -> Result<&[Marker], ViewError> {
        Ok(self.node(node)?.markers.as_slice())
    }

    fn alloc(&mut self, bounds: Rect, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                bounds,
                parent,
                markers: Vec::new(),
                visible: true,
            },
        );
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node, ViewError> {
        self.nodes
            .get(&id)
            .ok_or(ViewError::NodeNotFound { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, ViewError> {
        self.nodes
            .get_mut(&id)
            .ok_or(ViewError::NodeNotFound { node: id })
    }
}

impl ViewLayer for HeadlessView {
    fn bounds_of(&self, node: NodeId) -> Result<Rect, ViewError> {
        Ok(self.node(node)?.bounds)
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_position(&mut self, node: NodeId, position: Point) -> Result<(), ViewError> {
        let node = self.node_mut(node)?;
        node.bounds.x = position.x;
        node.bounds.y = position.y;
        Ok(())
    }

    fn show(&mut self, node: NodeId) -> Result<(), ViewError> {
        self.node_mut(node)?.visible = true;
        Ok(())
    }

    fn hide(&mut self, node: NodeId) -> Result<(), ViewError> {
        self.node_mut(node)?.visible = false;
        Ok(())
    }

    fn has_marker(&self, node: NodeId, marker: Marker) -> Result<bool, ViewError> {
        Ok(self.node(node)?.markers.contains(&marker))
    }

    fn add_marker(&mut self, node: NodeId, marker: Marker) -> Result<(), ViewError> {
        let node = self.node_mut(node)?;
        if !node.markers.contains(&marker) {
            node.markers.push(marker);
        }
        Ok(())
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> Result<bool, ViewError> {
        if !self.nodes.contains_key(&ancestor) {
            return Err(ViewError::NodeNotFound { node: ancestor });
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.node(id)?.parent;
        }
        Ok(false)
    }
}
