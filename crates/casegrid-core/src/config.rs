//! casegrid.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capacity used for agents that do not declare one.
pub const DEFAULT_AGENT_CAPACITY: u32 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasegridConfig {
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default = "default_capacity")]
    pub default_capacity: u32,
    /// Pairs scoring below this are never committed.
    pub score_threshold: Option<f64>,
    /// Inclusive `[min, max]` a scorer must stay within. Out-of-range
    /// scores drop the pair.
    #[serde(default = "default_score_bounds")]
    pub score_bounds: [f64; 2],
    /// When false only non-finite scores are rejected.
    #[serde(default = "default_enforce_bounds")]
    pub enforce_score_bounds: bool,
}

impl AllocationConfig {
    /// Bounds to enforce on scorer output, if any.
    pub fn effective_bounds(&self) -> Option<(f64, f64)> {
        self.enforce_score_bounds
            .then_some((self.score_bounds[0], self.score_bounds[1]))
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_AGENT_CAPACITY,
            score_threshold: None,
            score_bounds: default_score_bounds(),
            enforce_score_bounds: default_enforce_bounds(),
        }
    }
}

/// Weights for the built-in heuristic scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_skill_weight")]
    pub skill_weight: f64,
    #[serde(default = "default_risk_weight")]
    pub risk_weight: f64,
    #[serde(default = "default_base")]
    pub base: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: default_skill_weight(),
            risk_weight: default_risk_weight(),
            base: default_base(),
        }
    }
}

fn default_capacity() -> u32 {
    DEFAULT_AGENT_CAPACITY
}

fn default_score_bounds() -> [f64; 2] {
    [0.0, 1.0]
}

fn default_enforce_bounds() -> bool {
    true
}

fn default_skill_weight() -> f64 {
    0.4
}

fn default_risk_weight() -> f64 {
    0.4
}

fn default_base() -> f64 {
    0.1
}

impl CasegridConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CasegridConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a casegrid.toml with every knob spelled out.
    pub fn scaffold() -> Self {
        CasegridConfig {
            allocation: AllocationConfig {
                score_threshold: Some(0.0),
                ..AllocationConfig::default()
            },
            scoring: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold() {
        let config = CasegridConfig::scaffold();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("default_capacity = 50"));
        assert!(toml_str.contains("skill_weight"));
    }

    #[test]
    fn test_scaffold_round_trips() {
        let toml_str = CasegridConfig::scaffold().to_toml_string().unwrap();
        let config: CasegridConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.allocation.score_threshold, Some(0.0));
        assert_eq!(config.allocation.effective_bounds(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_parse_empty() {
        let config: CasegridConfig = toml::from_str("").unwrap();
        assert_eq!(config.allocation.default_capacity, DEFAULT_AGENT_CAPACITY);
        assert_eq!(config.allocation.score_threshold, None);
        assert_eq!(config.allocation.score_bounds, [0.0, 1.0]);
        assert!(config.allocation.enforce_score_bounds);
        assert_eq!(config.scoring.risk_weight, 0.4);
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[allocation]
default_capacity = 5
score_threshold = 0.35

[scoring]
skill_weight = 0.6
"#;
        let config: CasegridConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.allocation.default_capacity, 5);
        assert_eq!(config.allocation.score_threshold, Some(0.35));
        assert_eq!(config.scoring.skill_weight, 0.6);
        assert_eq!(config.scoring.base, 0.1);
    }

    #[test]
    fn test_bounds_can_be_disabled() {
        let toml_str = r#"
[allocation]
enforce_score_bounds = false
"#;
        let config: CasegridConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.allocation.effective_bounds(), None);
    }
}
