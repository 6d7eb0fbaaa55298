//! Round summaries and human-readable report formatting.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::Allocation;

/// Aggregate figures for one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub total_tasks: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub score_failures: usize,
    /// Mean committed score, `None` when nothing was assigned.
    pub mean_score: Option<f64>,
    /// Agent id → tasks committed this round.
    pub per_agent: BTreeMap<String, u32>,
    pub cancelled: bool,
}

impl Allocation {
    pub fn summary(&self) -> AllocationSummary {
        let assigned = self.assignments.len();
        let mean_score = (assigned > 0)
            .then(|| self.assignments.iter().map(|a| a.score).sum::<f64>() / assigned as f64);

        AllocationSummary {
            total_tasks: assigned + self.unassigned.len(),
            assigned,
            unassigned: self.unassigned.len(),
            score_failures: self.score_failures.len(),
            mean_score,
            per_agent: self.assigned_by_agent(),
            cancelled: self.cancelled,
        }
    }
}

pub fn format_report(allocation: &Allocation, top: usize) -> String {
    let summary = allocation.summary();
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  casegrid Allocation Report              ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Tasks:      {:<28}║\n", summary.total_tasks));
    out.push_str(&format!("║  Assigned:   {:<28}║\n", summary.assigned));
    out.push_str(&format!("║  Unassigned: {:<28}║\n", summary.unassigned));
    match summary.mean_score {
        Some(mean) => out.push_str(&format!("║  Mean score: {:<28}║\n", format!("{mean:.4}"))),
        None => out.push_str(&format!("║  Mean score: {:<28}║\n", "-")),
    }
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    if summary.cancelled {
        out.push_str("⚠️  Round was cancelled; assignments are partial.\n\n");
    }

    if !allocation.assignments.is_empty() {
        let shown = top.min(allocation.assignments.len());
        out.push_str(&format!("Top {shown} assignments:\n"));
        for (i, a) in allocation.assignments.iter().take(shown).enumerate() {
            out.push_str(&format!("  {:>3}. {} → {}  ({:.4})\n", i + 1, a.task_id, a.agent_id, a.score));
        }
        out.push('\n');
    }

    if !summary.per_agent.is_empty() {
        out.push_str("Per-agent commits:\n");
        for (agent, count) in &summary.per_agent {
            let load = allocation.agent_loads.get(agent).copied().unwrap_or(0);
            out.push_str(&format!("  • {agent}: +{count} (load {load})\n"));
        }
        out.push('\n');
    }

    if !allocation.unassigned.is_empty() {
        out.push_str(&format!("Unassigned ({}):\n", allocation.unassigned.len()));
        for id in &allocation.unassigned {
            out.push_str(&format!("  • {id}\n"));
        }
        out.push('\n');
    }

    if !allocation.score_failures.is_empty() {
        out.push_str(&format!("❌ Unscoreable pairs ({}):\n", allocation.score_failures.len()));
        for f in &allocation.score_failures {
            out.push_str(&format!("  • {} / {}: {}\n", f.task_id, f.agent_id, f.reason));
        }
    }

    out
}
