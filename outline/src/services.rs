//! Collaborators the outline control talks to.
//!
//! None of these are implemented here: the host application wires in its
//! file-operation service, the system clipboard, its window registry and
//! the responder that receives events the outline declines.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{EventResult, PointerEvent};

/// Identifies one in-flight file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// How an asynchronous file operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The operation changed the file system.
    Succeeded,
    /// The service reported an error (and already told the user).
    Failed,
    /// The user declined a prompt or confirmation.
    Cancelled,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Succeeded)
    }
}

impl From<bool> for OperationOutcome {
    /// Maps the service's `did_*` flags: true succeeded, false cancelled.
    fn from(done: bool) -> Self {
        if done {
            OperationOutcome::Succeeded
        } else {
            OperationOutcome::Cancelled
        }
    }
}

/// External file-operation service.
///
/// Mutating calls return immediately; the host reports the result later
/// through `OutlineController::complete_operation` with the same
/// [`OperationId`]. Error reporting is entirely the service's job.
pub trait FileOperations {
    fn open_new_tab(&mut self, path: &str);

    fn open_in_system_browser(&mut self, path: &str);

    /// Show the rename prompt for `path`.
    fn prompt_rename(&mut self, op: OperationId, path: &str);

    /// Move `paths` to the trash, asking first when `show_prompt` is set.
    fn confirm_and_delete(&mut self, op: OperationId, paths: &[String], show_prompt: bool);

    /// Create a new folder inside `parent`.
    fn create_folder(&mut self, op: OperationId, parent: &str);

    /// Copy the clipboard's file references into `target`.
    fn paste_from_clipboard(&mut self, op: OperationId, target: &str);

    /// Move the clipboard's file references into `target`.
    fn move_from_clipboard(&mut self, op: OperationId, target: &str);

    /// Reload the whole browser view, tree included.
    fn full_refresh(&mut self);
}

/// The system clipboard, owned by the operating environment.
pub trait Clipboard {
    /// Whether the clipboard currently holds at least one file reference.
    fn holds_file_reference(&self) -> bool;

    /// Replace the clipboard contents with file references.
    fn write_file_references(&mut self, paths: &[String]);
}

/// Externally-maintained window count limit.
pub trait WindowLimit {
    fn window_count(&self) -> usize;

    fn max_windows(&self) -> usize;

    fn can_open_window(&self) -> bool {
        self.window_count() < self.max_windows()
    }
}

/// Next responder in the containment chain.
///
/// The outline holds only a weak reference and hands it pointer events it
/// declines.
pub trait EventSink {
    fn pointer_down(&self, event: &PointerEvent) -> EventResult;
}

/// Services the controller forwards actions to.
pub struct Collaborators {
    pub files: Box<dyn FileOperations>,
    pub clipboard: Box<dyn Clipboard>,
    pub windows: Box<dyn WindowLimit>,
}

impl Collaborators {
    pub fn new(
        files: impl FileOperations + 'static,
        clipboard: impl Clipboard + 'static,
        windows: impl WindowLimit + 'static,
    ) -> Self {
        Self {
            files: Box::new(files),
            clipboard: Box::new(clipboard),
            windows: Box::new(windows),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
