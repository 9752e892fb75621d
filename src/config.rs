//! Configuration types — per-action records and the global config file.
//!
//! Field names mirror the keys used in the rules file (`dest-mailbox`,
//! `trash-mailbox`, …), so the serde renames are kebab-case.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// One action record from a rule.
///
/// Which fields are required depends on the action named by `name`;
/// actions copy out the fields they need at construction time and
/// ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Action name: "move", "sort-mailing-list", "delete" or "trash".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Destination mailbox for `move` (and override for `trash`).
    #[serde(
        rename = "dest-mailbox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dest_mailbox: Option<String>,
    /// Base mailbox name for `sort-mailing-list` destinations.
    #[serde(
        rename = "dest-mailbox-base",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dest_mailbox_base: Option<String>,
    /// Pattern applied to the list-id header to extract the mailbox suffix.
    #[serde(
        rename = "dest-mailbox-regex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dest_mailbox_regex: Option<String>,
    /// 0-based index of the capture group to use when the pattern has
    /// more than one.
    #[serde(
        rename = "dest-mailbox-regex-group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dest_mailbox_regex_group: Option<usize>,
}

/// Settings shared across all rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fallback destination for the `trash` action.
    #[serde(
        rename = "trash-mailbox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trash_mailbox: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Convert a config option value to a boolean.
///
/// Accepts the usual truthy spellings (`y`, `yes`, `t`, `true`, `on`,
/// `enabled`, `1`, case-insensitive); everything else is false.
pub fn parse_bool(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => matches!(
            s.to_lowercase().as_str(),
            "y" | "yes" | "t" | "true" | "on" | "enabled" | "1"
        ),
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn action_config_kebab_case_keys() {
        let json = r#"{
            "name": "sort-mailing-list",
            "dest-mailbox-base": "lists",
            "dest-mailbox-regex": "<(.*)>",
            "dest-mailbox-regex-group": 0
        }"#;
        let config: ActionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name.as_deref(), Some("sort-mailing-list"));
        assert_eq!(config.dest_mailbox_base.as_deref(), Some("lists"));
        assert_eq!(config.dest_mailbox_regex.as_deref(), Some("<(.*)>"));
        assert_eq!(config.dest_mailbox_regex_group, Some(0));
        assert!(config.dest_mailbox.is_none());
    }

    #[test]
    fn action_config_all_fields_optional() {
        let config: ActionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ActionConfig::default());
    }

    #[test]
    fn action_config_serialization_omits_none_fields() {
        let config = ActionConfig {
            name: Some("move".into()),
            dest_mailbox: Some("Archive".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("dest-mailbox"));
        assert!(!json.contains("dest-mailbox-base"));
        assert!(!json.contains("dest-mailbox-regex"));
    }

    #[test]
    fn global_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"trash-mailbox": "Trash"}}"#).unwrap();

        let config = GlobalConfig::load(file.path()).unwrap();
        assert_eq!(config.trash_mailbox.as_deref(), Some("Trash"));
    }

    #[test]
    fn global_config_load_missing_file() {
        let result = GlobalConfig::load("/nonexistent/mailfiler.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn global_config_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = GlobalConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn parse_bool_truthy_spellings() {
        for s in ["y", "yes", "t", "true", "ON", "Enabled", "1"] {
            assert!(parse_bool(&serde_json::json!(s)), "expected {s:?} to be true");
        }
        assert!(parse_bool(&serde_json::json!(true)));
        assert!(parse_bool(&serde_json::json!(1)));
    }

    #[test]
    fn parse_bool_falsy_values() {
        for v in [
            serde_json::json!("no"),
            serde_json::json!("off"),
            serde_json::json!(""),
            serde_json::json!(false),
            serde_json::json!(0),
            serde_json::Value::Null,
        ] {
            assert!(!parse_bool(&v), "expected {v:?} to be false");
        }
    }
}
