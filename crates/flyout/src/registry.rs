#![forbid(unsafe_code)]

//! Book-keeping for popups that are currently open.
//!
//! [`PopupRegistry`] maps the id of every open [`Popup`](crate::Popup) to
//! its panel node. Outside-click dismissal consults this map instead of
//! scanning the whole scene for marked nodes: a pointer press dismisses a
//! popup only when its target sits outside *every* registered panel.
//!
//! The registry holds ids, not popups. [`Popup::open`](crate::Popup::open)
//! and [`Popup::close`](crate::Popup::close) keep it current, so the host
//! owns exactly one registry per view and threads it through those calls.
//!
//! # Design Notes
//!
//! Membership is keyed by popup id, so reopening a popup replaces its entry
//! instead of accumulating one per open. The containment query is a plain
//! OR over panels and therefore independent of iteration order.

use std::collections::HashMap;

use crate::popup::PopupId;
use crate::view::{NodeId, ViewError, ViewLayer};

/// The set of currently open popups, keyed by [`PopupId`].
#[derive(Debug, Clone, Default)]
pub struct PopupRegistry {
    open: HashMap<PopupId, NodeId>,
}

impl PopupRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of popups currently open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// `true` when no popup is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Whether the given popup is currently registered as open.
    #[must_use]
    pub fn is_registered(&self, popup: PopupId) -> bool {
        self.open.contains_key(&popup)
    }

    /// Whether `target` lies inside any open panel's subtree.
    ///
    /// A targetless event hits nothing, so it counts as outside.
    pub fn contains_target<V>(&self, view: &V, target: Option<NodeId>) -> Result<bool, ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        let Some(target) = target else {
            return Ok(false);
        };
        for &panel in self.open.values() {
            if view.is_descendant(target, panel)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub(crate) fn insert(&mut self, popup: PopupId, panel: NodeId) {
        self.open.insert(popup, panel);
    }

    pub(crate) fn remove(&mut self, popup: PopupId) {
        self.open.remove(&popup);
    }
}
