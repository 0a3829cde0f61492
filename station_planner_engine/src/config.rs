// Planner configuration.
//
// Tunables for a `BuildPlan` session live in `PlannerConfig`, loadable from
// JSON. Every field has a default, so a partial JSON document (or `{}`) is a
// valid config; missing fields take the defaults below.
//
// See also: `plan.rs` which owns the config as part of `BuildPlan`,
// `command.rs` for the history depth it feeds.

use crate::command::DEFAULT_MAX_HISTORY;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Undo history depth. Older entries are discarded.
    pub max_history: usize,
    /// Include "no structural support" warnings in `BuildPlan::validate`.
    pub structural_support_warnings: bool,
    /// Snap incoming objects to their grid (main or small) before placing.
    pub snap_on_place: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            structural_support_warnings: true,
            snap_on_place: true,
        }
    }
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = PlannerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = PlannerConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
        assert_eq!(restored.max_history, 100);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "max_history": 25,
            "structural_support_warnings": false,
            "snap_on_place": false
        }"#;
        let config = PlannerConfig::from_json(json).unwrap();
        assert_eq!(config.max_history, 25);
        assert!(!config.structural_support_warnings);
        assert!(!config.snap_on_place);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = PlannerConfig::from_json(r#"{"max_history": 10}"#).unwrap();
        assert_eq!(config.max_history, 10);
        assert!(config.structural_support_warnings);
        assert_eq!(PlannerConfig::from_json("{}").unwrap(), PlannerConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(PlannerConfig::from_json("{"), Err(PlanError::Json(_))));
        assert!(PlannerConfig::from_json(r#"{"max_history": -1}"#).is_err());
    }
}
