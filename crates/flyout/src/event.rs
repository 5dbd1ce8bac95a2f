#![forbid(unsafe_code)]

//! Pointer notifications and propagation control.
//!
//! The host environment forwards every global pointer-down to the dismissal
//! pass as a [`PointerEvent`]. All types are plain data deriving `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Dismissal reacts to [`PointerEventKind::Down`] of *any* button; the
//!   other kinds exist so hosts can forward their full pointer stream
//!   unfiltered.
//! - `target` is the node under the pointer, `None` when the pointer was
//!   over no tracked node at all (bare backdrop).
//! - [`Propagation::stop`] suppresses delivery of the one notification to
//!   handlers that run after the dismissal pass; it does not short-circuit
//!   the pass itself.

use bitflags::bitflags;

use crate::geometry::Point;
use crate::view::NodeId;

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left/primary button.
    Left,

    /// Right/secondary button.
    Right,

    /// Middle button (wheel click).
    Middle,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved with no button change.
    Moved,
}

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A global pointer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// On-screen pointer position.
    pub position: Point,

    /// The view-layer node under the pointer, if any.
    pub target: Option<NodeId>,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event with no target and no modifiers.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            target: None,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach the node under the pointer.
    #[must_use]
    pub const fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach held modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a button-down event (any button).
    #[must_use]
    pub fn is_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(_))
    }
}

/// Delivery control for a single notification.
///
/// When the dismissal pass closes a popup it calls [`stop`](Self::stop), and
/// handlers running after the pass check [`is_stopped`](Self::is_stopped)
/// before acting on the event. Stopping is per notification: the host
/// constructs a fresh `Propagation` for each event it forwards.
#[derive(Debug, Default)]
pub struct Propagation {
    stopped: bool,
}

impl Propagation {
    /// Create a running (not stopped) propagation token.
    #[must_use]
    pub const fn new() -> Self {
        Self { stopped: false }
    }

    /// Suppress further propagation of this notification.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Check whether propagation has been suppressed.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}
