//! Shared types used across casegrid crates.

use serde::{Deserialize, Serialize};

/// A unit of work that must be assigned to exactly one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Attributes consumed by scorers only. The allocator never reads them.
    #[serde(default)]
    pub features: TaskFeatures,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            features: TaskFeatures::default(),
        }
    }

    pub fn with_features(mut self, features: TaskFeatures) -> Self {
        self.features = features;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFeatures {
    /// Outstanding amount.
    #[serde(default)]
    pub amount_due: f64,
    #[serde(default)]
    pub days_overdue: u32,
    /// Bureau-style risk score (300 = low risk, 850 = high risk).
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub customer_segment: Option<CustomerSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerSegment {
    Retail,
    #[serde(alias = "SME")]
    Sme,
    Corporate,
}

/// A servicing entity with a bounded number of slots per round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    /// Maximum tasks this agent may hold. `None` falls back to the
    /// configured default capacity.
    ///
    /// Signed so that malformed upstream records survive deserialization
    /// and are rejected by validation instead.
    #[serde(default)]
    pub capacity: Option<i64>,
    /// Tasks already held at round start.
    #[serde(default)]
    pub current_load: i64,
    #[serde(default)]
    pub profile: AgentProfile,
}

impl Agent {
    pub fn new(id: impl Into<String>, capacity: i64) -> Self {
        Self {
            id: id.into(),
            capacity: Some(capacity),
            current_load: 0,
            profile: AgentProfile::default(),
        }
    }

    pub fn with_load(mut self, current_load: i64) -> Self {
        self.current_load = current_load;
        self
    }

    pub fn with_profile(mut self, profile: AgentProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Capacity limit for this round, resolving the default.
    pub fn capacity_or(&self, default_capacity: u32) -> i64 {
        self.capacity.unwrap_or(i64::from(default_capacity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    #[serde(default)]
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Junior,
    Mid,
    Senior,
    Specialist,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Junior => "Junior",
            SkillLevel::Mid => "Mid",
            SkillLevel::Senior => "Senior",
            SkillLevel::Specialist => "Specialist",
        }
    }
}

/// A committed task → agent decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: String,
    pub agent_id: String,
    /// Score of the pair at the time it was committed.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_defaults_from_minimal_json() {
        let agent: Agent = serde_json::from_str(r#"{"id": "A01"}"#).unwrap();
        assert_eq!(agent.capacity, None);
        assert_eq!(agent.current_load, 0);
        assert_eq!(agent.capacity_or(50), 50);
    }

    #[test]
    fn negative_capacity_survives_deserialization() {
        let agent: Agent = serde_json::from_str(r#"{"id": "A01", "capacity": -1}"#).unwrap();
        assert_eq!(agent.capacity_or(50), -1);
    }

    #[test]
    fn task_features_parse() {
        let task: Task = serde_json::from_str(
            r#"{"id": "T0001", "features": {"amount_due": 250.5, "days_overdue": 12,
                "risk_score": 610, "customer_segment": "SME"}}"#,
        )
        .unwrap();
        assert_eq!(task.features.customer_segment, Some(CustomerSegment::Sme));
        assert_eq!(task.features.risk_score, Some(610.0));
    }

    #[test]
    fn skill_level_labels() {
        let agent: Agent = serde_json::from_str(
            r#"{"id": "A02", "profile": {"skill_level": "Specialist", "tenure_months": 30}}"#,
        )
        .unwrap();
        assert_eq!(agent.profile.skill_level.map(|s| s.label()), Some("Specialist"));
    }
}
