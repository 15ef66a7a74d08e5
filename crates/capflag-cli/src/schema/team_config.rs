use std::path::PathBuf;

use capflag_evaluator::side::SideConfig;
use serde::{Deserialize, Serialize};

/// Both teams of a match, as read from a `--team-config` file.
///
/// ```json
/// {
///   "red": { "agents": ["careful-offense", "defensive"] },
///   "blue": { "agents": ["defensive", "defensive"], "weights_file": "weights.json" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub red: TeamConfig,
    pub blue: TeamConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Archetype names of the team's first and second agent
    pub agents: [String; 2],
    /// Landmarks replacing the built-in ones for this team
    pub side: Option<SideConfig>,
    /// Weight tables replacing the defaults, relative to the working directory
    pub weights_file: Option<PathBuf>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            agents: ["careful-offense".to_owned(), "defensive".to_owned()],
            side: None,
            weights_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "blue": { "agents": ["defensive", "defensive"] } }"#)
                .unwrap();
        assert_eq!(config.red, TeamConfig::default());
        assert_eq!(config.blue.agents, ["defensive", "defensive"]);
        assert!(config.blue.weights_file.is_none());
    }
}
