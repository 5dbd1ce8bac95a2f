#![forbid(unsafe_code)]

//! Anchored popup panels.
//!
//! [`Popup`] positions a panel node relative to an anchor node at a
//! configurable offset, corrects the position when it would overflow the
//! viewport, and dismisses the panel when a pointer press lands outside
//! every open popup.
//!
//! # Design Notes
//!
//! - **Overflow handling is mirror-based, not clamp-based**: when the panel
//!   would cross the far viewport edge on an axis, [`avoid_overflow`] pulls
//!   it back by one panel-plus-offset stride, which lands the panel's
//!   trailing edge on the anchor's origin. Each axis is corrected
//!   independently, at most once. Clamping is available on top via
//!   [`Popup::clamp_to_viewport`].
//! - **Placement is computed at open time**: moving the anchor or calling
//!   [`Popup::set_offset`] while the popup is open does not move the panel;
//!   the next [`Popup::open`] picks up the current geometry.
//! - **Dismissal is pull-based**: the host forwards pointer presses to
//!   [`Popup::handle_pointer_down`] and each popup decides for itself, using
//!   the shared [`PopupRegistry`] to treat a press inside *any* open panel
//!   as inside.
//!
//! # Example
//!
//! ```ignore
//! use flyout::{HeadlessView, Offset, Popup, PopupRegistry, Rect, Size};
//!
//! let mut view = HeadlessView::new(Size::new(800, 600));
//! let anchor = view.insert_node(Rect::new(100, 100, 40, 20));
//! let panel = view.insert_node(Rect::new(0, 0, 200, 150));
//!
//! let mut registry = PopupRegistry::new();
//! let mut popup = Popup::create(&mut view, panel, anchor)?
//!     .with_offset(Offset::new(10, 5));
//! popup.open(&mut view, &mut registry)?;
//! // Panel sits at anchor origin + offset: (110, 105).
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{PointerEvent, Propagation};
use crate::geometry::{Offset, Point, Size};
use crate::registry::PopupRegistry;
use crate::view::{NodeId, POPUP_MARKER, ViewError, ViewLayer};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Unique identity of a [`Popup`] instance.
///
/// Ids are allocated from a process-wide counter and never reused, so two
/// popups over the same panel node are still distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupId(pub u64);

impl PopupId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup:{}", self.0)
    }
}

/// Apply the overflow-avoidance rule to a desired panel position.
///
/// Each axis is handled independently: when the desired coordinate exceeds
/// `viewport - (panel + offset)`, the position is pulled back by one
/// `panel + offset` stride, which mirrors the panel to the other side of
/// the anchor (its trailing edge lands on the anchor's origin). The
/// correction applies at most once per axis, so a panel that cannot fit
/// either way is left where the single correction put it rather than
/// oscillating. Saturating arithmetic keeps the function total at the i32
/// extremes.
#[must_use]
pub const fn avoid_overflow(desired: Point, panel: Size, viewport: Size, offset: Offset) -> Point {
    let stride_x = panel.width.saturating_add(offset.dx);
    let stride_y = panel.height.saturating_add(offset.dy);
    let mut x = desired.x;
    let mut y = desired.y;
    if x > viewport.width.saturating_sub(stride_x) {
        x = x.saturating_sub(stride_x);
    }
    if y > viewport.height.saturating_sub(stride_y) {
        y = y.saturating_sub(stride_y);
    }
    Point::new(x, y)
}

/// Clamp a panel position so the panel stays inside the viewport.
///
/// When the panel is larger than the viewport on an axis, the position is
/// pinned to `0` so the panel's top-left corner stays visible.
#[must_use]
pub const fn clamp_to_bounds(position: Point, panel: Size, viewport: Size) -> Point {
    let max_x = viewport.width.saturating_sub(panel.width);
    let max_y = viewport.height.saturating_sub(panel.height);
    let mut x = if position.x > max_x { max_x } else { position.x };
    let mut y = if position.y > max_y { max_y } else { position.y };
    if x < 0 {
        x = 0;
    }
    if y < 0 {
        y = 0;
    }
    Point::new(x, y)
}

/// An anchored popup panel.
///
/// A popup ties a `panel` node (the content) to an `anchor` node it is
/// positioned against, at an [`Offset`] from the anchor's top-left corner.
/// Panel and anchor are fixed for the popup's lifetime; only the offset is
/// mutable. [`Popup::open`] computes the placement, moves the panel, shows
/// it, and registers it in the host's [`PopupRegistry`]; [`Popup::close`]
/// reverses that. Close a popup before removing its panel or anchor from
/// the view, and before dropping the popup itself, so the registry never
/// holds a stale entry.
#[derive(Debug)]
pub struct Popup {
    id: PopupId,
    panel: NodeId,
    anchor: NodeId,
    offset: Offset,
    clamp_to_viewport: bool,
    visible: bool,
}

impl Popup {
    /// Create a popup over an existing panel node.
    ///
    /// Tags the panel with [`POPUP_MARKER`] (idempotently, so a panel
    /// reused across popups carries the marker once). The panel must exist;
    /// the anchor is only resolved at [`Popup::open`] time. The popup
    /// starts closed with a zero offset.
    pub fn create<V>(view: &mut V, panel: NodeId, anchor: NodeId) -> Result<Self, ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        view.add_marker(panel, POPUP_MARKER)?;
        let popup = Self {
            id: PopupId::next(),
            panel,
            anchor,
            offset: Offset::default(),
            clamp_to_viewport: false,
            visible: false,
        };
        #[cfg(feature = "tracing")]
        debug!(
            message = "popup.create",
            popup = popup.id.0,
            panel = panel.0,
            anchor = anchor.0
        );
        Ok(popup)
    }

    /// Set the anchor offset at construction time.
    #[must_use]
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Keep the panel fully inside the viewport after overflow avoidance.
    ///
    /// Off by default: the single mirror correction of [`avoid_overflow`]
    /// can still leave a panel partly outside when nothing fits, and some
    /// hosts prefer that over covering the anchor.
    #[must_use]
    pub fn clamp_to_viewport(mut self, clamp: bool) -> Self {
        self.clamp_to_viewport = clamp;
        self
    }

    /// This popup's id.
    #[must_use]
    pub const fn id(&self) -> PopupId {
        self.id
    }

    /// The panel node holding the popup content.
    #[must_use]
    pub const fn panel(&self) -> NodeId {
        self.panel
    }

    /// The anchor node the panel is positioned against.
    #[must_use]
    pub const fn anchor(&self) -> NodeId {
        self.anchor
    }

    /// The configured offset from the anchor's top-left corner.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Whether the popup is currently open.
    ///
    /// Tracked on the instance, not queried from the view layer, so state
    /// is inspectable without touching rendered style.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.visible
    }

    /// Replace the anchor offset.
    ///
    /// Takes effect at the next [`Popup::open`]; an open panel stays where
    /// it is until then.
    pub fn set_offset(&mut self, dx: i32, dy: i32) {
        self.offset = Offset::new(dx, dy);
    }

    /// Position the panel against the anchor and show it.
    ///
    /// The placement is `anchor origin + offset`, run through
    /// [`avoid_overflow`] and, when [`Popup::clamp_to_viewport`] is set,
    /// [`clamp_to_bounds`]. Opening an already-open popup repositions it
    /// against the anchor's current bounds.
    ///
    /// Fails with [`ViewError::NodeNotFound`] when the anchor or panel no
    /// longer exists; the popup then stays closed and unregistered.
    pub fn open<V>(&mut self, view: &mut V, registry: &mut PopupRegistry) -> Result<(), ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        let anchor_origin = view.bounds_of(self.anchor)?.origin();
        self.position_at(view, anchor_origin + self.offset)?;
        view.show(self.panel)?;
        self.visible = true;
        registry.insert(self.id, self.panel);
        #[cfg(feature = "tracing")]
        debug!(message = "popup.open", popup = self.id.0, panel = self.panel.0);
        Ok(())
    }

    /// Hide the panel and deregister the popup.
    ///
    /// The hide is issued unconditionally, so a panel that was shown behind
    /// the popup's back still ends up hidden. Closing an already-closed
    /// popup is otherwise a no-op, so `close` is safe to call
    /// unconditionally.
    pub fn close<V>(&mut self, view: &mut V, registry: &mut PopupRegistry) -> Result<(), ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        view.hide(self.panel)?;
        self.visible = false;
        registry.remove(self.id);
        #[cfg(feature = "tracing")]
        debug!(message = "popup.close", popup = self.id.0, panel = self.panel.0);
        Ok(())
    }

    /// Dismiss the popup when a pointer press lands outside every open panel.
    ///
    /// The host forwards each pointer press to every open popup, then honors
    /// [`Propagation::is_stopped`] for its remaining handlers. Any button
    /// counts as a press. The press is measured against *all* panels in the
    /// registry, so a press inside a sibling popup keeps this one open, and
    /// the outcome does not depend on the order popups are visited in.
    ///
    /// Returns `true` when this popup closed in response. A press that
    /// dismisses stops propagation so it does not also activate whatever
    /// sits underneath the former popup.
    pub fn handle_pointer_down<V>(
        &mut self,
        view: &mut V,
        registry: &mut PopupRegistry,
        event: &PointerEvent,
        propagation: &mut Propagation,
    ) -> Result<bool, ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        if !self.visible || !event.is_down() {
            return Ok(false);
        }
        if registry.contains_target(view, event.target)? {
            return Ok(false);
        }
        self.close(view, registry)?;
        propagation.stop();
        #[cfg(feature = "tracing")]
        debug!(message = "popup.dismiss", popup = self.id.0);
        Ok(true)
    }

    /// Apply overflow-corrected placement for a desired top-left corner.
    ///
    /// Writes the final position to the panel without touching visibility.
    fn position_at<V>(&self, view: &mut V, desired: Point) -> Result<(), ViewError>
    where
        V: ViewLayer + ?Sized,
    {
        let panel_size = view.bounds_of(self.panel)?.size();
        let viewport = view.viewport();
        let mut position = avoid_overflow(desired, panel_size, viewport, self.offset);
        if self.clamp_to_viewport {
            position = clamp_to_bounds(position, panel_size, viewport);
        }
        view.set_position(self.panel, position)?;
        #[cfg(feature = "tracing")]
        debug!(
            message = "popup.place",
            popup = self.id.0,
            x = position.x,
            y = position.y
        );
        Ok(())
    }
}
