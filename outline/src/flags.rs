//! Application-wide interaction flags shared between controls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
struct FlagsInner {
    input_enabled: AtomicBool,
    focus_owner: AtomicBool,
}

/// Shared context carrying the process-wide interaction flags.
///
/// Cloning is cheap and every clone observes the same flags, so the
/// outline control, the window's shortcut router and any modal prompt can
/// each hold one.
#[derive(Debug, Clone)]
pub struct SharedFlags {
    inner: Arc<FlagsInner>,
}

impl SharedFlags {
    /// Input enabled, no outline owning focus.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FlagsInner {
                input_enabled: AtomicBool::new(true),
                focus_owner: AtomicBool::new(false),
            }),
        }
    }

    /// Whether primary clicks may change the selection. Cleared while a
    /// modal prompt is up.
    pub fn is_input_enabled(&self) -> bool {
        self.inner.input_enabled.load(Ordering::SeqCst)
    }

    pub fn set_input_enabled(&self, enabled: bool) {
        self.inner.input_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether the outline currently owns keyboard focus. Global shortcut
    /// handling stays off while this is set.
    pub fn is_focus_owner(&self) -> bool {
        self.inner.focus_owner.load(Ordering::SeqCst)
    }

    pub fn set_focus_owner(&self, owner: bool) {
        self.inner.focus_owner.store(owner, Ordering::SeqCst);
    }
}

impl Default for SharedFlags {
    fn default() -> Self {
        Self::new()
    }
}
