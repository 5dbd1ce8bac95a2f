#![forbid(unsafe_code)]

//! Anchored popups for node-tree UIs.
//!
//! # Role
//! `flyout` positions a popup panel relative to an anchor node at a
//! configurable offset, corrects the placement when it would overflow the
//! viewport, and dismisses the popup when a pointer press lands outside
//! every open panel. It is toolkit-agnostic: hosts implement [`ViewLayer`]
//! over their own scene and forward pointer presses.
//!
//! # Primary responsibilities
//! - **Popup lifecycle**: [`Popup::create`], [`Popup::open`], [`Popup::close`],
//!   with placement recomputed at every open.
//! - **Overflow avoidance**: [`popup::avoid_overflow`] mirrors the panel back
//!   over the anchor per overflowing axis; [`Popup::clamp_to_viewport`]
//!   optionally pins it fully inside.
//! - **Outside-press dismissal**: [`Popup::handle_pointer_down`] consults the
//!   [`PopupRegistry`] so a press inside *any* open panel dismisses nothing.
//! - **Headless hosting**: [`HeadlessView`] is an in-memory [`ViewLayer`] for
//!   tests and host-free runs.
//!
//! # How it fits in a host
//! The host owns one [`PopupRegistry`] per view and threads it through open,
//! close, and dismissal calls. On a pointer press it calls
//! [`Popup::handle_pointer_down`] on every popup first, then honors
//! [`Propagation::is_stopped`] for its remaining handlers, so a press that
//! dismisses a popup does not also activate what was underneath it.

pub mod event;
pub mod geometry;
pub mod headless;
pub mod popup;
pub mod registry;
pub mod view;

// Re-export the primary types at the crate root for ergonomic use.
pub use event::{Modifiers, PointerButton, PointerEvent, PointerEventKind, Propagation};
pub use geometry::{Offset, Point, Rect, Size};
pub use headless::HeadlessView;
pub use popup::{Popup, PopupId};
pub use registry::PopupRegistry;
pub use view::{Marker, NodeId, POPUP_MARKER, ViewError, ViewLayer};
