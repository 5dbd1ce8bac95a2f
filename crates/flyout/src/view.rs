#![forbid(unsafe_code)]

//! The view-layer boundary.
//!
//! [`ViewLayer`] is the seam between the popup component and whatever host
//! actually owns the screen: DOM mutations in a browser embedding, a native
//! compositor, or the in-memory scene in [`headless`](crate::headless). The
//! component drives this trait for geometry queries, position writes,
//! visibility transitions, and marker membership, and never reaches behind
//! it.
//!
//! All preconditions are the caller's burden: an identifier that does not
//! resolve surfaces as [`ViewError::NodeNotFound`] from the first operation
//! that touches the node. Nothing is validated ahead of use, retried, or
//! recovered.

use core::fmt;

use crate::geometry::{Point, Rect, Size};

/// Identifier of a view-layer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// A class-like tag on a view-layer node.
///
/// Markers identify related nodes to the host (for styling or inspection);
/// membership is a set, so adding the same marker twice leaves a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(pub &'static str);

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The marker every popup panel carries, applied at construction so hosts
/// can recognize and style popup nodes.
pub const POPUP_MARKER: Marker = Marker("popup");

/// Errors surfaced by view-layer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// An identifier did not resolve to a node.
    NodeNotFound { node: NodeId },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node } => write!(f, "view node {node} not found"),
        }
    }
}

impl std::error::Error for ViewError {}

/// Host-environment capabilities the popup component consumes.
///
/// Implementations own all rendering detail. Visibility transitions may be
/// animated; the component fires them and never awaits completion, so
/// `show`/`hide` must return once the transition is *started* and must
/// tolerate redundant calls (showing a visible node and hiding a hidden one
/// are no-ops).
pub trait ViewLayer {
    /// Current on-screen bounds of a node: top-left origin plus rendered
    /// size.
    fn bounds_of(&self, node: NodeId) -> Result<Rect, ViewError>;

    /// Current viewport extent.
    fn viewport(&self) -> Size;

    /// Move a node's top-left corner to `position`.
    fn set_position(&mut self, node: NodeId, position: Point) -> Result<(), ViewError>;

    /// Start the reveal transition for a node.
    fn show(&mut self, node: NodeId) -> Result<(), ViewError>;

    /// Start the conceal transition for a node.
    fn hide(&mut self, node: NodeId) -> Result<(), ViewError>;

    /// Check whether a node carries a marker.
    fn has_marker(&self, node: NodeId, marker: Marker) -> Result<bool, ViewError>;

    /// Tag a node with a marker. Idempotent: other markers are untouched and
    /// no duplicate is added.
    fn add_marker(&mut self, node: NodeId, marker: Marker) -> Result<(), ViewError>;

    /// Check whether `node` is `ancestor` itself or inside its subtree.
    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> Result<bool, ViewError>;
}
