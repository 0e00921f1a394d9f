//! Error types for outline configuration.
//!
//! The interaction core itself never fails: actions without a resolvable
//! target are silent no-ops. Only building a controller from user
//! configuration can go wrong.

use thiserror::Error;

use crate::menu::MenuAction;

/// Keybind table errors.
#[derive(Debug, Error)]
pub enum KeybindError {
    #[error("shortcut {combo} is already bound to {existing}")]
    Conflict { combo: String, existing: MenuAction },
    #[error("invalid shortcut '{0}'")]
    InvalidCombo(String),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("row_height must be greater than zero")]
    ZeroRowHeight,
    #[error("keybind error: {0}")]
    Keybind(#[from] KeybindError),
}
