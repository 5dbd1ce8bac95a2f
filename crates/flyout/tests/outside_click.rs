#![forbid(unsafe_code)]

//! Integration tests for the host-side dismissal flow.
//!
//! These tests drive [`Popup`] the way a host event loop would:
//! - one registry per view, threaded through open/close/dismissal
//! - every pointer press forwarded to every popup, in host-chosen order
//! - [`Propagation::is_stopped`] honored only after the full pass

use flyout::{
    HeadlessView, NodeId, Offset, POPUP_MARKER, Point, PointerButton, PointerEvent,
    PointerEventKind, Popup, PopupRegistry, Propagation, Rect, Size, ViewLayer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// 800x600 scene with a toolbar-button anchor and a hidden menu panel.
fn scene() -> (HeadlessView, NodeId, NodeId) {
    let mut view = HeadlessView::new(Size::new(800, 600));
    let anchor = view.insert_node(Rect::new(100, 100, 40, 20));
    let panel = view.insert_node(Rect::new(0, 0, 200, 150));
    view.hide(panel).expect("hide staged panel");
    (view, anchor, panel)
}

fn press_on(target: NodeId, at: Point) -> PointerEvent {
    PointerEvent::new(PointerEventKind::Down(PointerButton::Left), at).with_target(target)
}

/// Forward a press to every open popup the way a host event loop would,
/// then report whether the press was consumed by a dismissal.
fn dispatch_press(
    view: &mut HeadlessView,
    registry: &mut PopupRegistry,
    popups: &mut [&mut Popup],
    event: &PointerEvent,
) -> bool {
    let mut propagation = Propagation::new();
    for popup in popups.iter_mut() {
        popup
            .handle_pointer_down(view, registry, event, &mut propagation)
            .expect("dispatch press");
    }
    propagation.is_stopped()
}

#[test]
fn lifecycle_open_dismiss_reopen() {
    init_tracing();
    let (mut view, anchor, panel) = scene();
    let outside = view.insert_node(Rect::new(600, 20, 10, 10));
    let mut registry = PopupRegistry::new();

    let mut popup = Popup::create(&mut view, panel, anchor)
        .expect("create popup")
        .with_offset(Offset::new(10, 5));
    assert!(view.has_marker(panel, POPUP_MARKER).expect("marker query"));

    popup.open(&mut view, &mut registry).expect("open popup");
    assert_eq!(view.position_of(panel).expect("panel position"), Point::new(110, 105));

    let consumed = dispatch_press(
        &mut view,
        &mut registry,
        &mut [&mut popup],
        &press_on(outside, Point::new(605, 25)),
    );
    assert!(consumed);
    assert!(!popup.is_open());
    assert!(!view.is_visible(panel).expect("panel visibility"));
    assert!(registry.is_empty());

    // A second press hits a scene with no popups and is not consumed.
    let consumed = dispatch_press(
        &mut view,
        &mut registry,
        &mut [&mut popup],
        &press_on(outside, Point::new(605, 25)),
    );
    assert!(!consumed);

    // Reopening recomputes placement and registers again.
    popup.open(&mut view, &mut registry).expect("reopen popup");
    assert!(popup.is_open());
    assert_eq!(view.position_of(panel).expect("panel position"), Point::new(110, 105));
    assert_eq!(registry.open_count(), 1);
}

#[test]
fn outside_press_closes_every_open_popup() {
    init_tracing();
    let (mut view, anchor, panel_a) = scene();
    let panel_b = view.insert_node(Rect::new(0, 0, 120, 80));
    view.hide(panel_b).expect("hide staged panel");
    let outside = view.insert_node(Rect::new(700, 550, 10, 10));
    let mut registry = PopupRegistry::new();

    let mut a = Popup::create(&mut view, panel_a, anchor)
        .expect("create a")
        .with_offset(Offset::new(10, 5));
    let mut b = Popup::create(&mut view, panel_b, anchor)
        .expect("create b")
        .with_offset(Offset::new(50, 30));
    a.open(&mut view, &mut registry).expect("open a");
    b.open(&mut view, &mut registry).expect("open b");
    assert_eq!(registry.open_count(), 2);

    let consumed = dispatch_press(
        &mut view,
        &mut registry,
        &mut [&mut a, &mut b],
        &press_on(outside, Point::new(705, 555)),
    );
    assert!(consumed);
    assert!(!a.is_open());
    assert!(!b.is_open());
    assert!(registry.is_empty());
}

#[test]
fn press_inside_one_popup_protects_all() {
    let (mut view, anchor, panel_a) = scene();
    let panel_b = view.insert_node(Rect::new(0, 0, 120, 80));
    view.hide(panel_b).expect("hide staged panel");
    let inner_a = view
        .insert_child(panel_a, Rect::new(120, 120, 30, 10))
        .expect("panel child");
    let mut registry = PopupRegistry::new();

    let mut a = Popup::create(&mut view, panel_a, anchor)
        .expect("create a")
        .with_offset(Offset::new(10, 5));
    let mut b = Popup::create(&mut view, panel_b, anchor)
        .expect("create b")
        .with_offset(Offset::new(50, 30));
    a.open(&mut view, &mut registry).expect("open a");
    b.open(&mut view, &mut registry).expect("open b");

    // A press inside popup A's subtree dismisses neither popup.
    let consumed = dispatch_press(
        &mut view,
        &mut registry,
        &mut [&mut a, &mut b],
        &press_on(inner_a, Point::new(125, 122)),
    );
    assert!(!consumed);
    assert!(a.is_open());
    assert!(b.is_open());
    assert_eq!(registry.open_count(), 2);
}

#[test]
fn press_deep_in_a_panel_subtree_is_inside() {
    let (mut view, anchor, panel) = scene();
    let row = view
        .insert_child(panel, Rect::new(115, 110, 180, 20))
        .expect("panel row");
    let label = view
        .insert_child(row, Rect::new(118, 112, 60, 12))
        .expect("row label");
    let mut registry = PopupRegistry::new();

    let mut popup = Popup::create(&mut view, panel, anchor)
        .expect("create")
        .with_offset(Offset::new(10, 5));
    popup.open(&mut view, &mut registry).expect("open");

    let consumed = dispatch_press(
        &mut view,
        &mut registry,
        &mut [&mut popup],
        &press_on(label, Point::new(120, 115)),
    );
    assert!(!consumed);
    assert!(popup.is_open());
}

#[test]
fn dismissal_outcome_is_dispatch_order_independent() {
    for reverse in [false, true] {
        let (mut view, anchor, panel_a) = scene();
        let panel_b = view.insert_node(Rect::new(0, 0, 120, 80));
        view.hide(panel_b).expect("hide staged panel");
        let inner_a = view
            .insert_child(panel_a, Rect::new(120, 120, 30, 10))
            .expect("panel child");
        let outside = view.insert_node(Rect::new(700, 550, 10, 10));
        let mut registry = PopupRegistry::new();

        let mut a = Popup::create(&mut view, panel_a, anchor)
            .expect("create a")
            .with_offset(Offset::new(10, 5));
        let mut b = Popup::create(&mut view, panel_b, anchor)
            .expect("create b")
            .with_offset(Offset::new(50, 30));
        a.open(&mut view, &mut registry).expect("open a");
        b.open(&mut view, &mut registry).expect("open b");

        // Inside press: both stay open, regardless of visit order.
        let inside = press_on(inner_a, Point::new(125, 122));
        let consumed = if reverse {
            dispatch_press(&mut view, &mut registry, &mut [&mut b, &mut a], &inside)
        } else {
            dispatch_press(&mut view, &mut registry, &mut [&mut a, &mut b], &inside)
        };
        assert!(!consumed);
        assert_eq!(registry.open_count(), 2);

        // Outside press: both close, regardless of visit order.
        let away = press_on(outside, Point::new(705, 555));
        let consumed = if reverse {
            dispatch_press(&mut view, &mut registry, &mut [&mut b, &mut a], &away)
        } else {
            dispatch_press(&mut view, &mut registry, &mut [&mut a, &mut b], &away)
        };
        assert!(consumed);
        assert!(registry.is_empty());
    }
}

#[test]
fn repeated_open_close_does_not_accumulate_handlers() {
    let (mut view, anchor, panel) = scene();
    let outside = view.insert_node(Rect::new(600, 20, 10, 10));
    let mut registry = PopupRegistry::new();
    let mut popup = Popup::create(&mut view, panel, anchor)
        .expect("create")
        .with_offset(Offset::new(10, 5));

    for _ in 0..5 {
        popup.open(&mut view, &mut registry).expect("open");
        popup.close(&mut view, &mut registry).expect("close");
    }
    popup.open(&mut view, &mut registry).expect("open");
    assert_eq!(registry.open_count(), 1);

    // One press, one dismissal; the next press finds nothing to dismiss.
    let mut propagation = Propagation::new();
    let first = popup
        .handle_pointer_down(
            &mut view,
            &mut registry,
            &press_on(outside, Point::new(605, 25)),
            &mut propagation,
        )
        .expect("press");
    let second = popup
        .handle_pointer_down(
            &mut view,
            &mut registry,
            &press_on(outside, Point::new(605, 25)),
            &mut propagation,
        )
        .expect("press");
    assert!(first);
    assert!(!second);
    assert!(registry.is_empty());
}

#[test]
fn viewport_resize_changes_the_next_placement() {
    let (mut view, _anchor, panel) = scene();
    let anchor = view.insert_node(Rect::new(150, 100, 10, 10));
    let mut registry = PopupRegistry::new();
    let mut popup = Popup::create(&mut view, panel, anchor)
        .expect("create")
        .with_offset(Offset::new(10, 5));

    popup.open(&mut view, &mut registry).expect("open");
    assert_eq!(view.position_of(panel).expect("panel position"), Point::new(160, 105));

    // Shrink the viewport: the same anchor now overflows to the right.
    view.set_viewport(Size::new(300, 300));
    popup.open(&mut view, &mut registry).expect("reopen");
    assert_eq!(view.position_of(panel).expect("panel position"), Point::new(-50, 105));
}
