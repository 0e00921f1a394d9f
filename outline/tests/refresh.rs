mod common;

use common::{harness, harness_with};
use outline::{
    Modifiers, Node, OutlineConfig, OutlineEvent, PointerEvent, RestoreStrategy, SelectionMode,
};

fn by_identity() -> OutlineConfig {
    OutlineConfig {
        restore: RestoreStrategy::ByIdentity,
        ..Default::default()
    }
}

fn no_selection_events(events: &[OutlineEvent]) -> bool {
    !events
        .iter()
        .any(|e| matches!(e, OutlineEvent::SelectionChanged { .. }))
}

// ============================================================================
// Refresh Preserving Selection
// ============================================================================

#[test]
fn test_refresh_is_idempotent() {
    let mut h = harness();
    h.click(2);
    h.controller
        .on_mouse_down(&PointerEvent::primary(2, 4).with_modifiers(Modifiers::meta()));
    h.controller.drain_events();

    for _ in 0..5 {
        h.controller.refresh_preserving_selection();
        assert_eq!(h.controller.selection().indices(), vec![2, 4]);
        assert_eq!(h.highlighted(), vec!["/home/b", "/tmp"]);
        assert_eq!(h.controller.rows().len(), 6);
    }
    assert!(h.controller.drain_events().is_empty());
    assert!(!h.controller.state().suppress_selection_side_effects());
}

#[test]
fn test_refresh_rebuilds_rows() {
    let mut h = harness();
    let before = h.controller.rows().generation();
    h.controller.refresh_preserving_selection();
    h.controller.refresh_preserving_selection();
    assert_eq!(h.controller.rows().generation(), before + 2);
}

#[test]
fn test_refresh_picks_up_new_nodes() {
    let mut h = harness();
    h.tree.borrow_mut().push(Node::new("/usr", "usr"));
    h.controller.refresh_preserving_selection();
    assert_eq!(h.controller.rows().len(), 7);
    assert_eq!(h.controller.rows().path_at(6), Some("/usr"));
}

#[test]
fn test_default_restore_keeps_row_indices() {
    let mut h = harness();
    h.click(4);
    h.controller.drain_events();

    // A node appears above the selection; the highlight stays on row 4
    h.tree.borrow_mut().insert(0, Node::new("/aaa", "aaa"));
    h.controller.refresh_preserving_selection();

    assert_eq!(h.controller.selection().indices(), vec![4]);
    assert_eq!(h.highlighted(), vec!["/home/c"]);
    assert!(no_selection_events(&h.controller.drain_events()));
}

#[test]
fn test_identity_restore_follows_nodes() {
    let mut h = harness_with(by_identity());
    h.click(4);
    h.controller.drain_events();

    h.tree.borrow_mut().insert(0, Node::new("/aaa", "aaa"));
    h.controller.refresh_preserving_selection();

    assert_eq!(h.controller.selection().indices(), vec![5]);
    assert_eq!(h.highlighted(), vec!["/tmp"]);
    assert!(no_selection_events(&h.controller.drain_events()));
}

#[test]
fn test_rows_past_end_are_dropped() {
    let mut h = harness();
    h.click(5);
    h.controller.drain_events();

    h.tree.borrow_mut().truncate(1);
    h.controller.refresh_preserving_selection();

    assert_eq!(h.controller.rows().len(), 4);
    assert!(h.controller.selection().is_empty());
    assert!(h.controller.drain_events().is_empty());
}

#[test]
fn test_identity_restore_drops_vanished_nodes() {
    let mut h = harness_with(by_identity());
    h.click(2);
    h.controller
        .on_mouse_down(&PointerEvent::primary(2, 4).with_modifiers(Modifiers::meta()));

    h.tree.borrow_mut().retain(|n| n.path() != "/tmp");
    h.controller.refresh_preserving_selection();

    assert_eq!(h.highlighted(), vec!["/home/b"]);
}

#[test]
fn test_click_after_refresh_notifies_again() {
    let mut h = harness();
    h.controller.refresh_preserving_selection();
    h.click(3);
    assert_eq!(
        h.controller.drain_events(),
        vec![OutlineEvent::SelectionChanged { rows: vec![3] }]
    );
}

// ============================================================================
// Expand And Collapse
// ============================================================================

#[test]
fn test_collapse_keeps_selected_node() {
    let mut h = harness();
    h.click(4);
    h.controller.drain_events();

    assert!(h.controller.collapse("/home"));
    assert_eq!(h.controller.rows().len(), 3);
    assert_eq!(h.controller.selection().indices(), vec![1]);
    assert_eq!(h.highlighted(), vec!["/tmp"]);

    assert!(h.controller.expand("/home"));
    assert_eq!(h.controller.selection().indices(), vec![4]);
    assert!(h.controller.drain_events().is_empty());
}

#[test]
fn test_collapse_drops_hidden_children() {
    let mut h = harness();
    h.click(2);
    h.controller.collapse("/home");
    assert!(h.controller.selection().is_empty());
}

#[test]
fn test_expand_and_collapse_report_change() {
    let mut h = harness();
    assert!(!h.controller.expand("/home"));
    assert!(h.controller.is_expanded("/home"));

    h.controller.toggle("/home");
    assert!(!h.controller.is_expanded("/home"));
    assert!(!h.controller.collapse("/home"));

    h.controller.toggle("/home");
    assert!(h.controller.is_expanded("/home"));
}

#[test]
fn test_vanished_nodes_forget_expansion() {
    let mut h = harness();
    let home = h.tree.borrow()[0].clone();

    h.tree.borrow_mut().remove(0);
    h.controller.refresh_preserving_selection();
    assert!(!h.controller.is_expanded("/home"));

    // A node that comes back under the same path starts collapsed
    h.tree.borrow_mut().insert(0, home);
    h.controller.refresh_preserving_selection();
    assert_eq!(h.controller.rows().len(), 3);
}

#[test]
fn test_hidden_nodes_keep_expansion() {
    let mut h = harness();
    h.controller.expand("/home/a");
    h.controller.collapse("/home");
    h.controller.refresh_preserving_selection();
    assert!(h.controller.is_expanded("/home/a"));
}

// ============================================================================
// Reload Item
// ============================================================================

#[test]
fn test_reload_item_splices_subtree() {
    let mut h = harness();
    h.click(4);
    h.controller.drain_events();

    h.tree.borrow_mut()[0] = Node::new("/home", "home").children_from([
        Node::new("/home/a", "a"),
        Node::new("/home/b", "b"),
        Node::new("/home/c", "c"),
        Node::new("/home/d", "d"),
    ]);
    assert!(h.controller.reload_item("/home"));

    assert_eq!(h.controller.rows().len(), 7);
    assert_eq!(h.controller.rows().path_at(4), Some("/home/d"));
    assert_eq!(h.highlighted(), vec!["/tmp"]);
    assert!(h.controller.drain_events().is_empty());
}

#[test]
fn test_reload_item_for_missing_node() {
    let mut h = harness();
    let generation = h.controller.rows().generation();
    assert!(!h.controller.reload_item("/nope"));
    assert_eq!(h.controller.rows().generation(), generation);
}

// ============================================================================
// Programmatic Selection
// ============================================================================

#[test]
fn test_select_rows_notifies() {
    let mut h = harness();
    h.controller.select_rows([3, 1, 42]);
    assert_eq!(h.controller.selection().indices(), vec![1, 3]);
    assert_eq!(
        h.controller.drain_events(),
        vec![OutlineEvent::SelectionChanged { rows: vec![1, 3] }]
    );

    h.controller.select_rows([1, 3]);
    assert!(h.controller.drain_events().is_empty());
}

#[test]
fn test_single_selection_mode() {
    let config = OutlineConfig {
        selection_mode: SelectionMode::Single,
        ..Default::default()
    };
    let mut h = harness_with(config);
    h.controller.select_rows([4, 2]);
    assert_eq!(h.highlighted(), vec!["/home/b"]);

    h.controller
        .on_mouse_down(&PointerEvent::primary(2, 5).with_modifiers(Modifiers::meta()));
    assert_eq!(h.highlighted(), vec!["/var"]);
}
