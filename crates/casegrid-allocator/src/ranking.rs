//! Ranking stage: a total, reproducible order over scored pairs.
//!
//! Order is score descending, then task id ascending, then agent id
//! ascending. With unique ids this is a total order, so repeated runs
//! over identical input rank identically regardless of sort stability.

use std::cmp::Ordering;

use casegrid_core::{Agent, Task};

use crate::pairs::ScoredPair;

/// Compare two pairs in rank order (best first).
pub fn compare_pairs(a: &ScoredPair, b: &ScoredPair, tasks: &[Task], agents: &[Agent]) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| tasks[a.task].id.cmp(&tasks[b.task].id))
        .then_with(|| agents[a.agent].id.cmp(&agents[b.agent].id))
}

/// Return a ranked view of `pairs` without touching the input.
pub fn rank_pairs<'a>(pairs: &'a [ScoredPair], tasks: &[Task], agents: &[Agent]) -> Vec<&'a ScoredPair> {
    let mut ranked: Vec<&ScoredPair> = pairs.iter().collect();
    ranked.sort_by(|a, b| compare_pairs(a, b, tasks, agents));
    ranked
}
