//! Pair generation: the full task × agent cross product.

use casegrid_core::{Agent, Task};

/// A candidate pairing, by index into the round's task and agent slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    pub task: usize,
    pub agent: usize,
}

impl Pair {
    pub fn with_score(self, score: f64) -> ScoredPair {
        ScoredPair {
            task: self.task,
            agent: self.agent,
            score,
        }
    }
}

/// A pair annotated with its desirability score (higher = better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair {
    pub task: usize,
    pub agent: usize,
    pub score: f64,
}

/// Produce every (task, agent) pair in task-major order.
///
/// Either side being empty yields no pairs. The whole product is
/// materialized; callers batch if `tasks.len() * agents.len()` is too big.
pub fn generate_pairs(tasks: &[Task], agents: &[Agent]) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(tasks.len() * agents.len());
    for task in 0..tasks.len() {
        for agent in 0..agents.len() {
            pairs.push(Pair { task, agent });
        }
    }
    pairs
}
