//! Pair scoring.
//!
//! The allocator only needs "given a task and an agent, how desirable is
//! this pairing" (higher = better). Anything implementing [`PairScorer`]
//! can drive a round: a trained model behind an FFI call, a closure, or
//! the built-in [`HeuristicScorer`].

use casegrid_core::{Agent, ScoringConfig, SkillLevel, Task};
use tracing::warn;

use crate::error::ScoreError;
use crate::pairs::{Pair, ScoredPair};

/// Produces a desirability score for a task–agent pairing.
pub trait PairScorer: Send + Sync {
    fn score(&self, task: &Task, agent: &Agent) -> Result<f64, ScoreError>;
}

/// Adapts an infallible closure into a [`PairScorer`].
pub struct FnScorer<F>(pub F);

impl<F> PairScorer for FnScorer<F>
where
    F: Fn(&Task, &Agent) -> f64 + Send + Sync,
{
    fn score(&self, task: &Task, agent: &Agent) -> Result<f64, ScoreError> {
        Ok((self.0)(task, agent))
    }
}

/// Adapts a fallible closure into a [`PairScorer`].
pub struct FallibleFnScorer<F>(pub F);

impl<F> PairScorer for FallibleFnScorer<F>
where
    F: Fn(&Task, &Agent) -> Result<f64, ScoreError> + Send + Sync,
{
    fn score(&self, task: &Task, agent: &Agent) -> Result<f64, ScoreError> {
        (self.0)(task, agent)
    }
}

/// A pair the scorer could not score. The pair is excluded from ranking.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreFailure {
    pub task_id: String,
    pub agent_id: String,
    pub reason: String,
}

/// Score every pair, dropping the ones that fail.
///
/// A pair fails when the scorer errors, returns a non-finite value, or
/// (with `bounds` set) returns a value outside the inclusive bounds.
pub fn score_pairs<S: PairScorer + ?Sized>(
    pairs: &[Pair],
    tasks: &[Task],
    agents: &[Agent],
    scorer: &S,
    bounds: Option<(f64, f64)>,
) -> (Vec<ScoredPair>, Vec<ScoreFailure>) {
    let mut scored = Vec::with_capacity(pairs.len());
    let mut failures = Vec::new();

    for pair in pairs {
        let task = &tasks[pair.task];
        let agent = &agents[pair.agent];

        let result = scorer
            .score(task, agent)
            .and_then(|score| check_score(score, bounds));

        match result {
            Ok(score) => scored.push(pair.with_score(score)),
            Err(e) => {
                warn!(
                    task = %task.id,
                    agent = %agent.id,
                    error = %e,
                    "dropping unscoreable pair"
                );
                failures.push(ScoreFailure {
                    task_id: task.id.clone(),
                    agent_id: agent.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (scored, failures)
}

fn check_score(score: f64, bounds: Option<(f64, f64)>) -> Result<f64, ScoreError> {
    if !score.is_finite() {
        return Err(ScoreError::NonFinite(score));
    }
    match bounds {
        Some((min, max)) if !(min..=max).contains(&score) => {
            Err(ScoreError::OutOfRange { score, min, max })
        }
        _ => Ok(score),
    }
}

/// Rule-based risk estimate (0..=100, higher = riskier) from amount and age.
///
/// Used when a task carries no bureau risk score.
pub fn estimate_risk_score(amount_due: f64, days_overdue: u32) -> u32 {
    let mut score = 10.0;

    if days_overdue > 30 {
        score += f64::from(days_overdue - 30) * 0.5;
    }
    if amount_due > 5_000.0 {
        score += 10.0;
    }
    if amount_due > 20_000.0 {
        score += 15.0;
    }

    (score.floor() as u32).min(100)
}

const RISK_FLOOR: f64 = 300.0;
const RISK_CEILING: f64 = 850.0;

/// Weighted heuristic: agent skill plus inverse task risk.
///
/// ```text
/// score = base + skill_weight * skill + risk_weight * (1 - risk_norm)
/// ```
///
/// clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    weights: ScoringConfig,
}

impl HeuristicScorer {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    fn skill_value(skill: Option<SkillLevel>) -> f64 {
        match skill {
            Some(SkillLevel::Junior) => 0.3,
            Some(SkillLevel::Mid) | None => 0.5,
            Some(SkillLevel::Senior) => 0.7,
            Some(SkillLevel::Specialist) => 0.9,
        }
    }

    fn risk_value(task: &Task) -> f64 {
        let bureau = task.features.risk_score.unwrap_or_else(|| {
            let estimate = estimate_risk_score(task.features.amount_due, task.features.days_overdue);
            RISK_FLOOR + f64::from(estimate) / 100.0 * (RISK_CEILING - RISK_FLOOR)
        });
        // 300 (low risk) -> 1.0, 900 -> 0.0; kept inside [0.1, 0.9].
        (1.0 - (bureau - RISK_FLOOR) / 600.0).clamp(0.1, 0.9)
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl PairScorer for HeuristicScorer {
    fn score(&self, task: &Task, agent: &Agent) -> Result<f64, ScoreError> {
        let skill = Self::skill_value(agent.profile.skill_level);
        let risk = Self::risk_value(task);
        let raw = self.weights.base + self.weights.skill_weight * skill + self.weights.risk_weight * risk;
        if !raw.is_finite() {
            return Err(ScoreError::NonFinite(raw));
        }
        Ok(raw.clamp(0.0, 1.0))
    }
}
