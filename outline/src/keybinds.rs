use std::collections::{BTreeMap, HashMap};

use crate::error::KeybindError;
use crate::event::{Key, KeyCombo};
use crate::menu::{MENU_TABLE, MenuAction};

/// Shortcut table mapping key combos to menu actions.
///
/// Each action has one primary combo (shown in the menu) and may have
/// aliases; Backspace is an alias of Delete for moving to the trash.
#[derive(Debug, Clone, Default)]
pub struct Keybinds {
    /// Quick lookup for key presses
    by_combo: HashMap<KeyCombo, MenuAction>,
    /// Primary combo per action, for display
    primary: HashMap<MenuAction, KeyCombo>,
}

impl Keybinds {
    /// Create empty keybinds
    pub fn new() -> Self {
        Self::default()
    }

    /// Default shortcuts from the menu table.
    pub fn defaults() -> Self {
        let mut binds = Self::new();
        for spec in MENU_TABLE {
            if let Some(combo) = spec.shortcut {
                binds.by_combo.insert(combo, spec.action);
                binds.primary.insert(spec.action, combo);
            }
        }
        binds
            .by_combo
            .insert(KeyCombo::key(Key::Backspace), MenuAction::MoveToTrash);
        binds
    }

    /// Bind an additional combo to an action.
    ///
    /// The first combo bound to an action becomes its primary shortcut.
    pub fn bind(&mut self, combo: KeyCombo, action: MenuAction) -> Result<(), KeybindError> {
        let combo = combo.normalized();
        if let Some(existing) = self.by_combo.get(&combo)
            && *existing != action
        {
            return Err(KeybindError::Conflict {
                combo: combo.to_string(),
                existing: *existing,
            });
        }
        self.by_combo.insert(combo, action);
        self.primary.entry(action).or_insert(combo);
        Ok(())
    }

    /// Replace every combo of an action with a single new one.
    pub fn rebind(&mut self, action: MenuAction, combo: KeyCombo) -> Result<(), KeybindError> {
        let combo = combo.normalized();
        if let Some(existing) = self.by_combo.get(&combo)
            && *existing != action
        {
            return Err(KeybindError::Conflict {
                combo: combo.to_string(),
                existing: *existing,
            });
        }
        self.by_combo.retain(|_, a| *a != action);
        self.by_combo.insert(combo, action);
        self.primary.insert(action, combo);
        Ok(())
    }

    /// Apply `action name -> shortcut string` overrides, in name order.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<(), KeybindError> {
        for (name, shortcut) in overrides {
            let action = MenuAction::from_name(name)
                .ok_or_else(|| KeybindError::UnknownAction(name.clone()))?;
            let combo: KeyCombo = shortcut.parse()?;
            self.rebind(action, combo)?;
        }
        Ok(())
    }

    /// Look up the action for a key press.
    pub fn get(&self, combo: &KeyCombo) -> Option<MenuAction> {
        self.by_combo.get(&combo.normalized()).copied()
    }

    /// Primary shortcut of an action.
    pub fn shortcut_for(&self, action: MenuAction) -> Option<KeyCombo> {
        self.primary.get(&action).copied()
    }
}
