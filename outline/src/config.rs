//! Outline controller configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dispatch::OverlapPolicy;
use crate::error::ConfigError;
use crate::keybinds::Keybinds;
use crate::selection::SelectionMode;

/// How `refresh_preserving_selection` re-applies the selection after the
/// rows are rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStrategy {
    /// Re-apply the captured row indices. Only correct when nothing was
    /// inserted or removed above the selected rows.
    #[default]
    ByIndex,
    /// Re-select the rows now bound to the captured paths.
    ByIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Height of every row in viewport units.
    pub row_height: u16,
    pub selection_mode: SelectionMode,
    pub restore: RestoreStrategy,
    pub overlap_policy: OverlapPolicy,
    /// Action name -> shortcut string, e.g. `"rename": "F2"`.
    pub shortcuts: BTreeMap<String, String>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            row_height: 1,
            selection_mode: SelectionMode::Multi,
            restore: RestoreStrategy::ByIndex,
            overlap_policy: OverlapPolicy::RejectSameTarget,
            shortcuts: BTreeMap::new(),
        }
    }
}

impl OutlineConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        self.keybinds()?;
        Ok(())
    }

    /// Default shortcuts with this config's overrides applied.
    pub fn keybinds(&self) -> Result<Keybinds, ConfigError> {
        let mut binds = Keybinds::defaults();
        binds.apply_overrides(&self.shortcuts)?;
        Ok(binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeybindError;

    #[test]
    fn test_default_is_valid() {
        assert!(OutlineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = OutlineConfig::from_json_str(r#"{ "restore": "by_identity" }"#).unwrap();
        assert_eq!(config.restore, RestoreStrategy::ByIdentity);
        assert_eq!(config.row_height, 1);
        assert_eq!(config.selection_mode, SelectionMode::Multi);
        assert_eq!(config.overlap_policy, OverlapPolicy::RejectSameTarget);
    }

    #[test]
    fn test_full_json() {
        let config = OutlineConfig::from_json_str(
            r#"{
                "row_height": 2,
                "selection_mode": "single",
                "restore": "by_index",
                "overlap_policy": "allow",
                "shortcuts": { "rename": "F2", "refresh": "cmd+shift+r" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.row_height, 2);
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.overlap_policy, OverlapPolicy::Allow);
        assert_eq!(config.shortcuts.len(), 2);
    }

    #[test]
    fn test_zero_row_height_rejected() {
        let err = OutlineConfig::from_json_str(r#"{ "row_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRowHeight));
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = OutlineConfig::from_json_str("{ row_height: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_shortcut_rejected() {
        let err =
            OutlineConfig::from_json_str(r#"{ "shortcuts": { "copy": "cmd+" } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Keybind(KeybindError::InvalidCombo(_))
        ));
    }

    #[test]
    fn test_conflicting_shortcut_rejected() {
        let err =
            OutlineConfig::from_json_str(r#"{ "shortcuts": { "rename": "cmd+c" } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Keybind(KeybindError::Conflict { .. })
        ));
    }
}
