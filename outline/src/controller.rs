//! The outline interaction controller.
//!
//! `OutlineController` owns the interaction state of one tree control. It
//! routes pointer and key events, tracks focus and the right-click target,
//! builds the context menu, dispatches actions and re-renders rows without
//! changing what the user sees as selected.
//!
//! # Menu lifecycle
//!
//! ```text
//! Idle --secondary click on row R--> MenuOpen    (path + row captured)
//! MenuOpen --dismissed-------------> Idle        (row cleared, path kept)
//! ```
//!
//! Both transitions reload the rows with selection side effects
//! suppressed and re-select the previously selected nodes by path.

use std::collections::HashSet;
use std::rc::{Rc, Weak};

use log::debug;

use crate::config::{OutlineConfig, RestoreStrategy};
use crate::dispatch::{DispatchOutcome, Dispatcher, Invocation, Targets};
use crate::error::ConfigError;
use crate::event::{Event, EventResult, KeyCombo, MouseButton, PointerEvent};
use crate::flags::SharedFlags;
use crate::focus::FocusTracker;
use crate::hit::{RowGeometry, hit_test_row};
use crate::keybinds::Keybinds;
use crate::layout::Rect;
use crate::menu::{ContextMenu, MenuAction, MenuContext};
use crate::node::{Node, NodeSource};
use crate::rows::{RowIndex, RowMap};
use crate::selection::RowSelection;
use crate::services::{Collaborators, EventSink, OperationId, OperationOutcome};

/// Notifications queued for the host, drained with
/// [`OutlineController::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineEvent {
    /// The user changed the selection. Never queued during a reload.
    SelectionChanged { rows: Vec<RowIndex> },
    /// Focus ownership changed.
    FocusChanged { focused: bool },
    MenuOpened { path: String },
    MenuClosed,
}

/// Per-control interaction state.
#[derive(Debug)]
pub struct InteractionState {
    focus: FocusTracker,
    right_clicked_path: Option<String>,
    right_clicked_row: Option<RowIndex>,
    suppress_selection_side_effects: bool,
    menu_open: bool,
}

impl InteractionState {
    fn new(flags: SharedFlags) -> Self {
        Self {
            focus: FocusTracker::new(flags),
            right_clicked_path: None,
            right_clicked_row: None,
            suppress_selection_side_effects: false,
            menu_open: false,
        }
    }

    pub fn is_input_enabled(&self) -> bool {
        self.focus.flags().is_input_enabled()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// Identity captured by the last secondary click on a row.
    pub fn right_clicked_path(&self) -> Option<&str> {
        self.right_clicked_path.as_deref()
    }

    /// Row captured by the last secondary click; cleared when the menu closes.
    pub fn right_clicked_row(&self) -> Option<RowIndex> {
        self.right_clicked_row
    }

    pub fn suppress_selection_side_effects(&self) -> bool {
        self.suppress_selection_side_effects
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}

pub struct OutlineController {
    config: OutlineConfig,
    state: InteractionState,
    source: Box<dyn NodeSource>,
    roots: Vec<Node>,
    expanded: HashSet<String>,
    rows: RowMap,
    selection: RowSelection,
    geometry: RowGeometry,
    keybinds: Keybinds,
    menu: Option<ContextMenu>,
    dispatcher: Dispatcher,
    services: Collaborators,
    next_responder: Option<Weak<dyn EventSink>>,
    events: Vec<OutlineEvent>,
}

impl std::fmt::Debug for OutlineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineController")
            .field("state", &self.state)
            .field("rows", &self.rows.len())
            .field("selection", &self.selection)
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

impl OutlineController {
    /// Create a controller and bind the initial rows.
    pub fn new(
        config: OutlineConfig,
        flags: SharedFlags,
        source: impl NodeSource + 'static,
        services: Collaborators,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let keybinds = config.keybinds()?;
        let mut controller = Self {
            selection: RowSelection::new(config.selection_mode),
            geometry: RowGeometry::new(Rect::default(), config.row_height),
            dispatcher: Dispatcher::new(config.overlap_policy),
            config,
            state: InteractionState::new(flags),
            source: Box::new(source),
            roots: Vec::new(),
            expanded: HashSet::new(),
            rows: RowMap::new(),
            keybinds,
            menu: None,
            services,
            next_responder: None,
            events: Vec::new(),
        };
        controller.reload_rows();
        Ok(controller)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn flags(&self) -> &SharedFlags {
        self.state.focus.flags()
    }

    pub fn rows(&self) -> &RowMap {
        &self.rows
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    /// Paths of the selected rows, topmost first.
    pub fn selected_paths(&self) -> Vec<String> {
        self.selection
            .iter()
            .filter_map(|r| self.rows.path_at(r).map(str::to_string))
            .collect()
    }

    /// Identity of the first selected row.
    pub fn first_selected_path(&self) -> Option<&str> {
        self.selection.first().and_then(|r| self.rows.path_at(r))
    }

    /// The open context menu, if any.
    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref().filter(|_| self.state.menu_open)
    }

    pub fn keybinds(&self) -> &Keybinds {
        &self.keybinds
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Take all queued notifications.
    pub fn drain_events(&mut self) -> Vec<OutlineEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Wiring
    // -------------------------------------------------------------------------

    /// Set the responder that receives pointer events the outline declines.
    /// Only a weak reference is kept.
    pub fn set_next_responder(&mut self, sink: &Rc<dyn EventSink>) {
        self.next_responder = Some(Rc::downgrade(sink));
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.geometry.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, offset: u16) {
        self.geometry.scroll_offset = offset;
    }

    pub fn geometry(&self) -> &RowGeometry {
        &self.geometry
    }

    // -------------------------------------------------------------------------
    // Event routing
    // -------------------------------------------------------------------------

    /// Route a high-level event to the matching handler.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::MouseDown(pointer) => match pointer.button {
                MouseButton::Left => self.on_mouse_down(pointer),
                MouseButton::Right => {
                    if self.on_right_mouse_down(pointer).is_some() {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
                MouseButton::Middle => self.forward(pointer),
            },
            Event::Key(combo) => self.on_key(combo),
            Event::Focus => {
                self.on_focus_gained();
                EventResult::Consumed
            }
            Event::Blur => {
                self.on_focus_lost();
                EventResult::Consumed
            }
        }
    }

    pub fn on_focus_gained(&mut self) {
        if self.state.focus.on_focus_gained() {
            self.events.push(OutlineEvent::FocusChanged { focused: true });
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.state.focus.on_focus_lost() {
            self.events.push(OutlineEvent::FocusChanged { focused: false });
        }
    }

    /// Primary pointer-down.
    ///
    /// Selection changes only for a primary click on a row while input is
    /// enabled.
    /// Anything else goes to the next responder untouched, which keeps
    /// rapid clicks in a neighbouring view or an open rename prompt from
    /// moving the tree's selection.
    pub fn on_mouse_down(&mut self, event: &PointerEvent) -> EventResult {
        let hit = hit_test_row(&self.geometry, &self.rows, event.x, event.y);
        match hit {
            Some(row) if event.button == MouseButton::Left && self.state.is_input_enabled() => {
                debug!("Click on row {} ({:?})", row, self.rows.path_at(row));
                let changed = if event.modifiers.shift {
                    self.selection.select_range(row)
                } else if event.modifiers.toggles() {
                    self.selection.toggle(row)
                } else {
                    self.selection.select_only(row)
                };
                if changed {
                    self.notify_selection_changed();
                }
                EventResult::Consumed
            }
            _ => {
                debug!(
                    "Forwarding {:?} click at ({}, {}): hit={:?} input_enabled={}",
                    event.button,
                    event.x,
                    event.y,
                    hit,
                    self.state.is_input_enabled()
                );
                self.forward(event)
            }
        }
    }

    fn forward(&self, event: &PointerEvent) -> EventResult {
        if let Some(sink) = self.next_responder.as_ref().and_then(Weak::upgrade) {
            sink.pointer_down(event);
        }
        EventResult::Ignored
    }

    /// Secondary pointer-down.
    ///
    /// The outline always takes focus first so that shortcuts pressed right
    /// after the right-click act on this control. A click on a row then
    /// opens the context menu; a click elsewhere opens nothing.
    pub fn on_right_mouse_down(&mut self, event: &PointerEvent) -> Option<&ContextMenu> {
        self.on_focus_gained();
        let row = hit_test_row(&self.geometry, &self.rows, event.x, event.y)?;
        self.open_menu(row)
    }

    /// Key press. Ignored unless the outline owns focus.
    ///
    /// With a menu open, bound keys pick the matching enabled item.
    /// Otherwise rename, trash, copy and refresh run against the selection.
    /// Every other key is swallowed: the outline has no type-ahead, so
    /// letters never collide with application shortcuts.
    pub fn on_key(&mut self, combo: &KeyCombo) -> EventResult {
        if !self.state.is_focused() {
            return EventResult::Ignored;
        }
        let Some(action) = self.keybinds.get(combo) else {
            return EventResult::Consumed;
        };
        if self.state.menu_open {
            self.invoke_menu_item(action);
        } else if action.runs_from_keyboard() {
            self.invoke_shortcut(action);
        } else {
            debug!("{} has no keyboard target outside the menu", action);
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Menu lifecycle
    // -------------------------------------------------------------------------

    /// Capture the right-click target and build the context menu for `row`.
    ///
    /// Returns None (and changes nothing) if `row` is not a valid row.
    pub fn open_menu(&mut self, row: RowIndex) -> Option<&ContextMenu> {
        let path = self.rows.path_at(row)?.to_string();
        debug!("Opening menu on row {} ({})", row, path);

        self.state.right_clicked_path = Some(path.clone());
        self.state.right_clicked_row = Some(row);
        self.reload_restoring(RestoreStrategy::ByIdentity);

        let cx = MenuContext {
            can_open_window: self.services.windows.can_open_window(),
            clipboard_has_file: self.services.clipboard.holds_file_reference(),
        };
        self.menu = Some(ContextMenu::build(path.clone(), row, &cx, &self.keybinds));
        self.state.menu_open = true;
        self.events.push(OutlineEvent::MenuOpened { path });
        self.menu.as_ref()
    }

    /// Menu dismissed, with or without a chosen item.
    ///
    /// Clears the right-clicked row but keeps the path, so an item chosen
    /// at the moment of dismissal still resolves.
    pub fn on_menu_closed(&mut self) {
        debug!("Menu closed");
        self.state.right_clicked_row = None;
        self.state.menu_open = false;
        self.reload_restoring(RestoreStrategy::ByIdentity);
        self.events.push(OutlineEvent::MenuClosed);
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Run a context-menu item against the right-clicked node.
    ///
    /// Works while the menu is open and after it closed; disabled items
    /// (as evaluated when the menu was built) do nothing.
    pub fn invoke_menu_item(&mut self, action: MenuAction) -> DispatchOutcome {
        match &self.menu {
            None => return DispatchOutcome::Unresolved,
            Some(menu) if !menu.is_enabled(action) => {
                debug!("{} is disabled in this menu", action);
                return DispatchOutcome::Disabled;
            }
            Some(_) => {}
        }
        self.dispatch(action, Invocation::Menu)
    }

    /// Run an action from a keyboard shortcut against the selection.
    pub fn invoke_shortcut(&mut self, action: MenuAction) -> DispatchOutcome {
        if !self.state.is_focused() {
            debug!("Shortcut {} ignored: outline not focused", action);
            return DispatchOutcome::Unresolved;
        }
        self.dispatch(action, Invocation::Keyboard)
    }

    fn dispatch(&mut self, action: MenuAction, invocation: Invocation) -> DispatchOutcome {
        let targets = Targets {
            right_clicked_path: self.state.right_clicked_path.as_deref(),
            right_clicked_row: self.state.right_clicked_row,
            selection: &self.selection,
            rows: &self.rows,
        };
        self.dispatcher.dispatch(
            action,
            invocation,
            &targets,
            self.services.files.as_mut(),
            self.services.clipboard.as_mut(),
        )
    }

    /// Report the outcome of an operation previously dispatched.
    /// Returns true if a full refresh was requested.
    ///
    /// A successful operation may have changed the tree, so the rows are
    /// rebuilt from the source afterwards, following selected nodes by path.
    pub fn complete_operation(&mut self, op: OperationId, outcome: OperationOutcome) -> bool {
        let known = self.dispatcher.pending(op).is_some();
        let refreshed = self.dispatcher.complete(
            op,
            outcome,
            self.selection.first(),
            self.services.files.as_mut(),
        );
        if known && outcome.is_success() {
            self.reload_restoring(RestoreStrategy::ByIdentity);
        }
        refreshed
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Replace the selection programmatically.
    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = RowIndex>) {
        if self.selection.replace(rows, self.rows.len()) {
            self.notify_selection_changed();
        }
    }

    fn notify_selection_changed(&mut self) {
        if self.state.suppress_selection_side_effects {
            return;
        }
        self.events.push(OutlineEvent::SelectionChanged {
            rows: self.selection.indices(),
        });
    }

    // -------------------------------------------------------------------------
    // Reloading
    // -------------------------------------------------------------------------

    /// Rebuild rows from the source without changing the highlighted rows.
    ///
    /// Selection-change notifications stay off for the whole reload.
    /// Idempotent while the tree is unchanged.
    pub fn refresh_preserving_selection(&mut self) {
        self.reload_restoring(self.config.restore);
    }

    /// Replace one node's subtree from the source, then rebuild rows.
    /// Returns false if the source no longer knows `path`.
    pub fn reload_item(&mut self, path: &str) -> bool {
        let Some(subtree) = self.source.subtree(path) else {
            debug!("reload_item: {} is gone from the source", path);
            return false;
        };
        self.with_suppressed(RestoreStrategy::ByIdentity, |this| {
            if !this.roots.iter_mut().any(|r| r.replace(&subtree)) {
                this.roots = this.source.roots();
            }
            this.prune_expanded();
            this.rows.rebuild(&this.roots, &this.expanded);
        });
        true
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Expand a node. Returns true if it was collapsed.
    pub fn expand(&mut self, path: &str) -> bool {
        if !self.expanded.insert(path.to_string()) {
            return false;
        }
        self.rebind_rows();
        true
    }

    /// Collapse a node. Returns true if it was expanded.
    pub fn collapse(&mut self, path: &str) -> bool {
        if !self.expanded.remove(path) {
            return false;
        }
        self.rebind_rows();
        true
    }

    pub fn toggle(&mut self, path: &str) {
        if !self.collapse(path) {
            self.expand(path);
        }
    }

    /// Rebuild rows from the cached tree after an expand/collapse.
    /// Rows shift, so the selection follows paths.
    fn rebind_rows(&mut self) {
        self.with_suppressed(RestoreStrategy::ByIdentity, |this| {
            this.rows.rebuild(&this.roots, &this.expanded);
        });
    }

    fn reload_restoring(&mut self, strategy: RestoreStrategy) {
        self.with_suppressed(strategy, |this| this.reload_rows());
    }

    fn reload_rows(&mut self) {
        self.roots = self.source.roots();
        self.prune_expanded();
        self.rows.rebuild(&self.roots, &self.expanded);
    }

    /// Forget expanded paths that no longer exist anywhere in the tree.
    /// Hidden but existing nodes keep their state.
    fn prune_expanded(&mut self) {
        let roots = &self.roots;
        let before = self.expanded.len();
        self.expanded
            .retain(|path| roots.iter().any(|r| r.find(path).is_some()));
        if self.expanded.len() != before {
            debug!(
                "Dropped {} expanded paths gone from the source",
                before - self.expanded.len()
            );
        }
    }

    /// Capture the selection, run `rebuild` with selection side effects
    /// suppressed, then re-apply the selection.
    ///
    /// Nested calls keep side effects suppressed until the outermost
    /// one finishes.
    fn with_suppressed(&mut self, strategy: RestoreStrategy, rebuild: impl FnOnce(&mut Self)) {
        let was_suppressed = self.state.suppress_selection_side_effects;
        self.state.suppress_selection_side_effects = true;

        let captured_rows = self.selection.indices();
        let captured_paths = self.selected_paths();

        rebuild(self);

        let restored: Vec<RowIndex> = match strategy {
            RestoreStrategy::ByIndex => captured_rows,
            RestoreStrategy::ByIdentity => captured_paths
                .iter()
                .filter_map(|p| self.rows.row_of(p))
                .collect(),
        };
        self.selection.replace(restored, self.rows.len());
        debug!(
            "Reloaded {} rows (pass {}), selection {:?}",
            self.rows.len(),
            self.rows.generation(),
            self.selection.indices()
        );

        self.state.suppress_selection_side_effects = was_suppressed;
    }
}
