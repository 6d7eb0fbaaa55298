//! Independent rounds run side by side.
//!
//! Each batch is a self-contained round with its own task set, agent set
//! and capacity ledger. Batches must not share identifiers; nothing
//! coordinates capacity across them.

use std::sync::Arc;

use casegrid_core::{Agent, Task};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{Allocation, Allocator};
use crate::error::{AllocError, AllocResult};
use crate::scorer::PairScorer;

/// Input for one round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundInput {
    pub tasks: Vec<Task>,
    pub agents: Vec<Agent>,
}

/// Run every batch as its own round on the blocking pool.
///
/// Results come back in the same order as `batches`. A failing batch
/// does not affect the others.
pub async fn allocate_batches<S>(
    allocator: &Allocator,
    batches: Vec<RoundInput>,
    scorer: Arc<S>,
) -> Vec<AllocResult<Allocation>>
where
    S: PairScorer + 'static,
{
    let handles: Vec<_> = batches
        .into_iter()
        .enumerate()
        .map(|(idx, batch)| {
            let allocator = allocator.clone();
            let scorer = Arc::clone(&scorer);
            tokio::task::spawn_blocking(move || {
                debug!(batch = idx, tasks = batch.tasks.len(), "starting batch round");
                allocator.allocate(&batch.tasks, &batch.agents, scorer.as_ref())
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (idx, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap_or_else(|e| {
            warn!(batch = idx, error = %e, "batch round panicked");
            Err(AllocError::RoundAborted(format!("batch {idx}: {e}")))
        });
        results.push(result);
    }
    results
}
