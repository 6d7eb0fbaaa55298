//! Greedy assignment engine.
//!
//! One round runs a strict pipeline:
//! 1. Validate tasks and agents (fatal on malformed input)
//! 2. Generate the task × agent cross product and score it
//! 3. Rank pairs (score desc, task id asc, agent id asc)
//! 4. Walk the ranking once, committing a pair when its task is still
//!    open, its agent has a free slot, and it clears the score threshold
//!
//! This is deliberately greedy, not an optimal weighted matching: the
//! highest-scoring feasible pair always wins, with no backtracking.

use std::collections::{BTreeMap, HashSet};

use casegrid_core::{AllocationConfig, Agent, Assignment, DEFAULT_AGENT_CAPACITY, Task};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::{AllocError, AllocResult};
use crate::ledger::CapacityLedger;
use crate::pairs::generate_pairs;
use crate::ranking::rank_pairs;
use crate::scorer::{PairScorer, ScoreFailure, score_pairs};

/// Tunables for a round.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatorOptions {
    /// Capacity for agents that do not declare one.
    pub default_capacity: u32,
    /// Pairs scoring strictly below this are never committed.
    pub score_threshold: Option<f64>,
    /// Inclusive bounds scorer output must respect; `None` only rejects
    /// non-finite scores.
    pub score_bounds: Option<(f64, f64)>,
}

impl Default for AllocatorOptions {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_AGENT_CAPACITY,
            score_threshold: None,
            score_bounds: Some((0.0, 1.0)),
        }
    }
}

impl From<&AllocationConfig> for AllocatorOptions {
    fn from(config: &AllocationConfig) -> Self {
        Self {
            default_capacity: config.default_capacity,
            score_threshold: config.score_threshold,
            score_bounds: config.effective_bounds(),
        }
    }
}

/// Outcome of one allocation round.
///
/// Unassigned tasks are a normal result, not an error.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Allocation {
    /// Commits in the order they were made (best score first).
    pub assignments: Vec<Assignment>,
    /// Task ids left without an agent, in input order.
    pub unassigned: Vec<String>,
    /// Pairs dropped because the scorer could not score them.
    pub score_failures: Vec<ScoreFailure>,
    /// Agent id → load at the end of the round (starting load included).
    pub agent_loads: BTreeMap<String, u32>,
    /// Ranked pairs looked at before the scan stopped.
    pub pairs_examined: usize,
    /// The scan was stopped by a [`CancelToken`]; the result is partial.
    pub cancelled: bool,
}

impl Allocation {
    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    /// Every task got an agent and the round ran to the end.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty() && !self.cancelled
    }

    /// Agent id → tasks committed to it this round.
    pub fn assigned_by_agent(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for a in &self.assignments {
            *counts.entry(a.agent_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The agent a task went to, if any.
    pub fn agent_for(&self, task_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.task_id == task_id)
            .map(|a| a.agent_id.as_str())
    }
}

/// Runs allocation rounds with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    options: AllocatorOptions,
}

impl Allocator {
    pub fn new(options: AllocatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AllocatorOptions {
        &self.options
    }

    /// Run one round to completion.
    pub fn allocate<S: PairScorer + ?Sized>(
        &self,
        tasks: &[Task],
        agents: &[Agent],
        scorer: &S,
    ) -> AllocResult<Allocation> {
        self.allocate_with_cancel(tasks, agents, scorer, &CancelToken::new())
    }

    /// Run one round, stopping early if `cancel` fires.
    ///
    /// A cancelled round still returns `Ok` with whatever was committed
    /// before the flag was seen.
    pub fn allocate_with_cancel<S: PairScorer + ?Sized>(
        &self,
        tasks: &[Task],
        agents: &[Agent],
        scorer: &S,
        cancel: &CancelToken,
    ) -> AllocResult<Allocation> {
        validate_round(tasks, agents, &self.options)?;
        let mut ledger = CapacityLedger::from_agents(agents, self.options.default_capacity)?;

        info!(
            tasks = tasks.len(),
            agents = agents.len(),
            "allocating tasks"
        );

        let pairs = generate_pairs(tasks, agents);
        let (scored, score_failures) = score_pairs(&pairs, tasks, agents, scorer, self.options.score_bounds);
        let ranked = rank_pairs(&scored, tasks, agents);

        let mut assigned = vec![false; tasks.len()];
        let mut assignments = Vec::new();
        let mut open_slots = ledger.total_remaining();
        let mut pairs_examined = 0;
        let mut cancelled = false;

        for pair in ranked {
            if assignments.len() == tasks.len() || open_slots == 0 {
                break;
            }
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            pairs_examined += 1;

            if let Some(threshold) = self.options.score_threshold {
                if pair.score < threshold {
                    // Ranked descending: nothing later can clear it either.
                    debug!(score = pair.score, threshold, "remaining pairs below threshold");
                    break;
                }
            }
            if assigned[pair.task] {
                continue;
            }
            let task = &tasks[pair.task];
            let agent = &agents[pair.agent];
            if ledger.remaining_capacity(&agent.id) == 0 {
                continue;
            }

            let load = ledger.commit(&agent.id)?;
            assigned[pair.task] = true;
            open_slots -= 1;
            assignments.push(Assignment {
                task_id: task.id.clone(),
                agent_id: agent.id.clone(),
                score: pair.score,
            });
            debug!(
                task = %task.id,
                agent = %agent.id,
                score = pair.score,
                load,
                "committed assignment"
            );
        }

        let unassigned: Vec<String> = tasks
            .iter()
            .zip(&assigned)
            .filter(|(_, done)| !**done)
            .map(|(t, _)| t.id.clone())
            .collect();

        if cancelled {
            warn!(
                assigned = assignments.len(),
                pairs_examined,
                "allocation cancelled, returning partial result"
            );
        } else if !unassigned.is_empty() {
            warn!(
                unassigned = unassigned.len(),
                "some tasks left unassigned: no capacity or no eligible pair"
            );
        }
        info!(
            assigned = assignments.len(),
            score_failures = score_failures.len(),
            "allocated tasks"
        );

        Ok(Allocation {
            assignments,
            unassigned,
            score_failures,
            agent_loads: ledger.snapshot(),
            pairs_examined,
            cancelled,
        })
    }
}

/// Structural checks on a round's input.
///
/// Capacity and load numbers are checked when the ledger is built.
pub fn validate_round(tasks: &[Task], agents: &[Agent], options: &AllocatorOptions) -> AllocResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(AllocError::InvalidInput(format!("task at position {i} has an empty id")));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(AllocError::InvalidInput(format!("duplicate task id {}", task.id)));
        }
    }

    let mut seen = HashSet::with_capacity(agents.len());
    for (i, agent) in agents.iter().enumerate() {
        if agent.id.trim().is_empty() {
            return Err(AllocError::InvalidInput(format!("agent at position {i} has an empty id")));
        }
        if !seen.insert(agent.id.as_str()) {
            return Err(AllocError::InvalidInput(format!("duplicate agent id {}", agent.id)));
        }
    }

    if let Some(threshold) = options.score_threshold {
        if !threshold.is_finite() {
            return Err(AllocError::InvalidInput(format!("score threshold {threshold} is not finite")));
        }
    }
    if let Some((min, max)) = options.score_bounds {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(AllocError::InvalidInput(format!("invalid score bounds [{min}, {max}]")));
        }
    }

    Ok(())
}
