//! Context menu for a right-clicked row.
//!
//! The menu is a declarative table of actions with an enabled predicate
//! and a default shortcut. Each secondary click evaluates the table again
//! against a fresh [`MenuContext`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{Key, KeyCombo};
use crate::keybinds::Keybinds;
use crate::rows::RowIndex;

/// Everything the context menu can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    OpenInNewTab,
    OpenInSystemBrowser,
    Rename,
    MoveToTrash,
    Copy,
    Paste,
    MoveHere,
    NewFolder,
    Refresh,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::OpenInNewTab,
        MenuAction::OpenInSystemBrowser,
        MenuAction::Rename,
        MenuAction::MoveToTrash,
        MenuAction::Copy,
        MenuAction::Paste,
        MenuAction::MoveHere,
        MenuAction::NewFolder,
        MenuAction::Refresh,
    ];

    /// Stable snake_case name, used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            MenuAction::OpenInNewTab => "open_in_new_tab",
            MenuAction::OpenInSystemBrowser => "open_in_system_browser",
            MenuAction::Rename => "rename",
            MenuAction::MoveToTrash => "move_to_trash",
            MenuAction::Copy => "copy",
            MenuAction::Paste => "paste",
            MenuAction::MoveHere => "move_here",
            MenuAction::NewFolder => "new_folder",
            MenuAction::Refresh => "refresh",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Whether a successful run may change the tree's topology.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            MenuAction::Rename
                | MenuAction::MoveToTrash
                | MenuAction::Paste
                | MenuAction::MoveHere
                | MenuAction::NewFolder
        )
    }

    /// Actions a focused outline runs from its own shortcuts, outside an
    /// open menu. Rename, trash and copy target the first selected row.
    pub fn runs_from_keyboard(&self) -> bool {
        matches!(
            self,
            MenuAction::Rename | MenuAction::MoveToTrash | MenuAction::Copy | MenuAction::Refresh
        )
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs to the enabled predicates, sampled when the menu is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuContext {
    /// Window count is below the configured maximum.
    pub can_open_window: bool,
    /// Clipboard holds a file reference.
    pub clipboard_has_file: bool,
}

/// One row of the menu table.
pub(crate) struct MenuSpec {
    pub action: MenuAction,
    /// Localization key; strings are resolved by the presentation layer.
    pub label: &'static str,
    pub enabled: fn(&MenuContext) -> bool,
    pub shortcut: Option<KeyCombo>,
    pub separator_after: bool,
}

fn always(_: &MenuContext) -> bool {
    true
}

fn window_available(cx: &MenuContext) -> bool {
    cx.can_open_window
}

fn clipboard_has_file(cx: &MenuContext) -> bool {
    cx.clipboard_has_file
}

pub(crate) const MENU_TABLE: &[MenuSpec] = &[
    MenuSpec {
        action: MenuAction::OpenInNewTab,
        label: "open-in-new-tab",
        enabled: window_available,
        shortcut: None,
        separator_after: false,
    },
    MenuSpec {
        action: MenuAction::OpenInSystemBrowser,
        label: "open-in-finder",
        enabled: always,
        shortcut: None,
        separator_after: false,
    },
    MenuSpec {
        action: MenuAction::Rename,
        label: "rename",
        enabled: always,
        shortcut: Some(KeyCombo::key(Key::Enter)),
        separator_after: true,
    },
    MenuSpec {
        action: MenuAction::MoveToTrash,
        label: "move-to-trash",
        enabled: always,
        shortcut: Some(KeyCombo::key(Key::Delete)),
        separator_after: true,
    },
    MenuSpec {
        action: MenuAction::Copy,
        label: "copy",
        enabled: always,
        shortcut: Some(KeyCombo::key(Key::Char('c')).meta()),
        separator_after: false,
    },
    MenuSpec {
        action: MenuAction::Paste,
        label: "paste",
        enabled: clipboard_has_file,
        shortcut: Some(KeyCombo::key(Key::Char('v')).meta()),
        separator_after: false,
    },
    MenuSpec {
        action: MenuAction::MoveHere,
        label: "move-here",
        enabled: clipboard_has_file,
        shortcut: Some(KeyCombo::key(Key::Char('v')).alt().meta()),
        separator_after: true,
    },
    MenuSpec {
        action: MenuAction::NewFolder,
        label: "new-folder",
        enabled: always,
        shortcut: Some(KeyCombo::key(Key::Char('n')).shift().meta()),
        separator_after: true,
    },
    MenuSpec {
        action: MenuAction::Refresh,
        label: "refresh",
        enabled: always,
        shortcut: Some(KeyCombo::key(Key::Char('r')).meta()),
        separator_after: false,
    },
];

/// An evaluated menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: &'static str,
    pub enabled: bool,
    pub shortcut: Option<KeyCombo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

/// A context menu built for one secondary click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    target: String,
    row: RowIndex,
    entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Evaluate the menu table for the node at `row`.
    ///
    /// Shortcuts shown are the effective ones from `keybinds`, so user
    /// overrides appear in the menu.
    pub fn build(
        target: impl Into<String>,
        row: RowIndex,
        cx: &MenuContext,
        keybinds: &Keybinds,
    ) -> Self {
        let mut entries = Vec::with_capacity(MENU_TABLE.len() + 4);
        for spec in MENU_TABLE {
            entries.push(MenuEntry::Item(MenuItem {
                action: spec.action,
                label: spec.label,
                enabled: (spec.enabled)(cx),
                shortcut: keybinds.shortcut_for(spec.action),
            }));
            if spec.separator_after {
                entries.push(MenuEntry::Separator);
            }
        }
        // No trailing separator
        if matches!(entries.last(), Some(MenuEntry::Separator)) {
            entries.pop();
        }
        Self {
            target: target.into(),
            row,
            entries,
        }
    }

    /// Identity of the right-clicked node.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Row that was right-clicked, in the render pass the menu was built in.
    pub fn row(&self) -> RowIndex {
        self.row
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    pub fn item(&self, action: MenuAction) -> Option<&MenuItem> {
        self.items().find(|i| i.action == action)
    }

    pub fn is_enabled(&self, action: MenuAction) -> bool {
        self.item(action).is_some_and(|i| i.enabled)
    }
}
