//! Context action dispatch.
//!
//! Resolves which node an action applies to, forwards it to exactly one
//! collaborator call and remembers mutating operations until the host
//! reports their outcome. A successful mutation triggers a full refresh
//! when the acted-on row is not the row the user has selected.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::menu::MenuAction;
use crate::rows::{RowIndex, RowMap};
use crate::selection::RowSelection;
use crate::services::{Clipboard, FileOperations, OperationId, OperationOutcome};

/// How an action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Chosen from the context menu; targets the right-clicked node.
    Menu,
    /// Shortcut while the outline is focused; targets the first selected row.
    Keyboard,
}

/// What to do when a mutating action arrives while another is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Dispatch regardless.
    Allow,
    /// Refuse while an operation on the same path is in flight.
    #[default]
    RejectSameTarget,
}

/// A mutating operation waiting for its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    pub action: MenuAction,
    pub target: String,
    /// Row of the target when the action was dispatched.
    pub target_row: Option<RowIndex>,
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Forwarded; nothing further to wait for.
    Forwarded,
    /// Forwarded; the host must report completion for this id.
    Pending(OperationId),
    /// No target could be resolved. Nothing was forwarded.
    Unresolved,
    /// The menu item was disabled when the menu was built.
    Disabled,
    /// An operation on the same target is still in flight.
    Rejected,
}

/// Interaction state an action resolves its target from.
#[derive(Debug, Clone, Copy)]
pub struct Targets<'a> {
    pub right_clicked_path: Option<&'a str>,
    pub right_clicked_row: Option<RowIndex>,
    pub selection: &'a RowSelection,
    pub rows: &'a RowMap,
}

impl Targets<'_> {
    /// Resolve the target path and its row.
    ///
    /// Rename, trash and copy from the keyboard use the first selected row;
    /// everything else uses the right-clicked node. Once the menu closed the
    /// right-clicked index is gone, so the row currently bound to the
    /// right-clicked path stands in.
    pub fn resolve(
        &self,
        action: MenuAction,
        invocation: Invocation,
    ) -> Option<(String, Option<RowIndex>)> {
        let by_selection = invocation == Invocation::Keyboard
            && matches!(
                action,
                MenuAction::Rename | MenuAction::MoveToTrash | MenuAction::Copy
            );
        if by_selection {
            let row = self.selection.first()?;
            let path = self.rows.path_at(row)?;
            return Some((path.to_string(), Some(row)));
        }
        let path = self.right_clicked_path?;
        let row = self.right_clicked_row.or_else(|| self.rows.row_of(path));
        Some((path.to_string(), row))
    }
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    policy: OverlapPolicy,
    pending: HashMap<OperationId, PendingOperation>,
}

impl Dispatcher {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            pending: HashMap::new(),
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Number of operations waiting for completion.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn is_in_flight(&self, path: &str) -> bool {
        self.pending.values().any(|p| p.target == path)
    }

    pub fn pending(&self, op: OperationId) -> Option<&PendingOperation> {
        self.pending.get(&op)
    }

    /// Resolve the target and forward the action to its collaborator.
    pub fn dispatch(
        &mut self,
        action: MenuAction,
        invocation: Invocation,
        targets: &Targets<'_>,
        files: &mut dyn FileOperations,
        clipboard: &mut dyn Clipboard,
    ) -> DispatchOutcome {
        if action == MenuAction::Refresh {
            info!("Dispatch {} ({:?})", action, invocation);
            files.full_refresh();
            return DispatchOutcome::Forwarded;
        }

        let Some((target, target_row)) = targets.resolve(action, invocation) else {
            debug!("No target for {} ({:?}), ignoring", action, invocation);
            return DispatchOutcome::Unresolved;
        };

        if action.is_mutating()
            && self.policy == OverlapPolicy::RejectSameTarget
            && self.is_in_flight(&target)
        {
            warn!(
                "Rejecting {} on {}: another operation on it is in flight",
                action, target
            );
            return DispatchOutcome::Rejected;
        }

        info!("Dispatch {} on {} ({:?})", action, target, invocation);

        match action {
            MenuAction::OpenInNewTab => {
                files.open_new_tab(&target);
                DispatchOutcome::Forwarded
            }
            MenuAction::OpenInSystemBrowser => {
                files.open_in_system_browser(&target);
                DispatchOutcome::Forwarded
            }
            MenuAction::Copy => {
                clipboard.write_file_references(&[target]);
                DispatchOutcome::Forwarded
            }
            MenuAction::Rename => {
                let op = self.track(action, &target, target_row);
                files.prompt_rename(op, &target);
                DispatchOutcome::Pending(op)
            }
            MenuAction::MoveToTrash => {
                let op = self.track(action, &target, target_row);
                let show_prompt = invocation == Invocation::Keyboard;
                files.confirm_and_delete(op, &[target], show_prompt);
                DispatchOutcome::Pending(op)
            }
            MenuAction::Paste => {
                let op = self.track(action, &target, target_row);
                files.paste_from_clipboard(op, &target);
                DispatchOutcome::Pending(op)
            }
            MenuAction::MoveHere => {
                let op = self.track(action, &target, target_row);
                files.move_from_clipboard(op, &target);
                DispatchOutcome::Pending(op)
            }
            MenuAction::NewFolder => {
                let op = self.track(action, &target, target_row);
                files.create_folder(op, &target);
                DispatchOutcome::Pending(op)
            }
            // Handled before target resolution
            MenuAction::Refresh => DispatchOutcome::Forwarded,
        }
    }

    fn track(&mut self, action: MenuAction, target: &str, target_row: Option<RowIndex>) -> OperationId {
        let op = OperationId::new();
        self.pending.insert(
            op,
            PendingOperation {
                action,
                target: target.to_string(),
                target_row,
            },
        );
        op
    }

    /// Record an operation's outcome.
    ///
    /// On success, refreshes once if the acted-on row differs from the
    /// first selected row. Returns true if a refresh was requested.
    pub fn complete(
        &mut self,
        op: OperationId,
        outcome: OperationOutcome,
        first_selected: Option<RowIndex>,
        files: &mut dyn FileOperations,
    ) -> bool {
        let Some(pending) = self.pending.remove(&op) else {
            debug!("Completion for unknown operation {}", op);
            return false;
        };
        debug!(
            "{} {} on {} finished: {:?}",
            op, pending.action, pending.target, outcome
        );
        if !outcome.is_success() {
            return false;
        }
        if pending.target_row != first_selected {
            info!(
                "Acted-on row {:?} differs from selected row {:?}, refreshing",
                pending.target_row, first_selected
            );
            files.full_refresh();
            return true;
        }
        false
    }
}
