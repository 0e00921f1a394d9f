pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod flags;
pub mod focus;
pub mod hit;
pub mod keybinds;
pub mod layout;
pub mod menu;
pub mod node;
pub mod rows;
pub mod selection;
pub mod services;

pub use config::{OutlineConfig, RestoreStrategy};
pub use controller::{InteractionState, OutlineController, OutlineEvent};
pub use dispatch::{DispatchOutcome, Dispatcher, Invocation, OverlapPolicy, PendingOperation};
pub use error::{ConfigError, KeybindError};
pub use event::{Event, EventResult, Key, KeyCombo, Modifiers, MouseButton, PointerEvent};
pub use flags::SharedFlags;
pub use focus::FocusTracker;
pub use hit::{hit_test_row, RowGeometry};
pub use keybinds::Keybinds;
pub use layout::Rect;
pub use menu::{ContextMenu, MenuAction, MenuContext, MenuEntry, MenuItem};
pub use node::{Node, NodeSource};
pub use rows::{FlatRow, RowIndex, RowMap};
pub use selection::{RowSelection, SelectionMode};
pub use services::{
    Clipboard, Collaborators, EventSink, FileOperations, OperationId, OperationOutcome,
    WindowLimit,
};
