mod common;

use common::harness;
use outline::{Event, EventResult, Key, KeyCombo, OutlineEvent, PointerEvent, SharedFlags};

// ============================================================================
// Focus Tracking
// ============================================================================

#[test]
fn test_focus_gained_publishes_flag() {
    let mut h = harness();
    assert!(!h.flags.is_focus_owner());

    h.controller.on_focus_gained();

    assert!(h.controller.state().is_focused());
    assert!(h.flags.is_focus_owner());
    assert_eq!(
        h.controller.drain_events(),
        vec![OutlineEvent::FocusChanged { focused: true }]
    );
}

#[test]
fn test_focus_lost_republishes_flag() {
    let mut h = harness();
    h.controller.on_focus_gained();
    h.controller.on_focus_lost();

    assert!(!h.controller.state().is_focused());
    assert!(!h.flags.is_focus_owner());
    assert_eq!(
        h.controller.drain_events(),
        vec![
            OutlineEvent::FocusChanged { focused: true },
            OutlineEvent::FocusChanged { focused: false },
        ]
    );
}

#[test]
fn test_repeated_focus_gain_notifies_once() {
    let mut h = harness();
    h.controller.on_focus_gained();
    h.controller.on_focus_gained();
    assert_eq!(h.controller.drain_events().len(), 1);
    assert!(h.flags.is_focus_owner());
}

#[test]
fn test_flags_shared_between_clones() {
    let flags = SharedFlags::new();
    let other = flags.clone();

    flags.set_focus_owner(true);
    other.set_input_enabled(false);

    assert!(other.is_focus_owner());
    assert!(!flags.is_input_enabled());
}

#[test]
fn test_focus_and_blur_events() {
    let mut h = harness();
    assert_eq!(h.controller.handle_event(&Event::Focus), EventResult::Consumed);
    assert!(h.flags.is_focus_owner());
    assert_eq!(h.controller.handle_event(&Event::Blur), EventResult::Consumed);
    assert!(!h.flags.is_focus_owner());
}

// ============================================================================
// Secondary Click Takes Focus
// ============================================================================

#[test]
fn test_right_click_on_row_takes_focus_before_menu() {
    let mut h = harness();
    assert!(h.right_click(2));

    assert!(h.flags.is_focus_owner());
    let events = h.controller.drain_events();
    assert_eq!(events[0], OutlineEvent::FocusChanged { focused: true });
    assert_eq!(
        events[1],
        OutlineEvent::MenuOpened {
            path: "/home/b".to_string()
        }
    );
}

#[test]
fn test_right_click_on_empty_area_still_takes_focus() {
    let mut h = harness();
    assert!(!h.right_click(12));
    assert!(h.controller.state().is_focused());
    assert!(h.controller.menu().is_none());
}

#[test]
fn test_shortcut_after_right_click_reaches_outline() {
    let mut h = harness();
    h.click(1);
    h.right_click(12);

    let copy = KeyCombo::key(Key::Char('c')).meta();
    assert_eq!(h.controller.on_key(&copy), EventResult::Consumed);
    assert_eq!(
        h.clipboard.borrow().writes,
        vec![vec!["/home/a".to_string()]]
    );
}

// ============================================================================
// Keys Without Focus
// ============================================================================

#[test]
fn test_keys_ignored_without_focus() {
    let mut h = harness();
    h.click(1);
    let copy = KeyCombo::key(Key::Char('c')).meta();
    assert_eq!(h.controller.on_key(&copy), EventResult::Ignored);
    assert!(h.clipboard.borrow().writes.is_empty());
}

#[test]
fn test_primary_click_does_not_take_focus() {
    let mut h = harness();
    h.controller.on_mouse_down(&PointerEvent::primary(2, 1));
    assert!(!h.flags.is_focus_owner());
}
