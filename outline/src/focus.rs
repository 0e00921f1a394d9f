use log::debug;

use crate::flags::SharedFlags;

/// Tracks whether the outline owns keyboard focus and publishes it.
#[derive(Debug)]
pub struct FocusTracker {
    focused: bool,
    flags: SharedFlags,
}

impl FocusTracker {
    pub fn new(flags: SharedFlags) -> Self {
        Self {
            focused: false,
            flags,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn flags(&self) -> &SharedFlags {
        &self.flags
    }

    /// Mark the control as focus owner and publish the flag.
    /// Returns true if focus changed.
    pub fn on_focus_gained(&mut self) -> bool {
        let changed = !self.focused;
        self.focused = true;
        self.flags.set_focus_owner(true);
        if changed {
            debug!("Outline gained focus");
        }
        changed
    }

    /// Clear focus ownership and publish the flag.
    /// Returns true if focus changed.
    pub fn on_focus_lost(&mut self) -> bool {
        let changed = self.focused;
        self.focused = false;
        self.flags.set_focus_owner(false);
        if changed {
            debug!("Outline lost focus");
        }
        changed
    }
}
