//! casegrid allocator: score-ranked greedy assignment.
//!
//! Assigns every task to at most one agent, never exceeding an agent's
//! capacity, by committing the highest-scoring feasible pairs first.
//! Scoring is pluggable; the allocator only orders by score.
//!
//! # Pipeline
//!
//! ```text
//! tasks × agents ──► pairs ──► PairScorer ──► ranking ──► greedy engine ──► Allocation
//!                                  │                            │
//!                                  └─ ScoreFailure (dropped)    └─ CapacityLedger (per round)
//! ```
//!
//! # Components
//!
//! - **`pairs`**: Cross-product pair generation
//! - **`scorer`**: `PairScorer` contract, closure adapters, heuristic scorer
//! - **`ranking`**: Deterministic total order over scored pairs
//! - **`ledger`**: Per-round capacity bookkeeping
//! - **`engine`**: Validation and the greedy assignment pass
//! - **`batch`**: Independent rounds on the blocking pool
//! - **`report`**: Summaries and text reports

pub mod batch;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod pairs;
pub mod ranking;
pub mod report;
pub mod scorer;

pub use batch::{RoundInput, allocate_batches};
pub use cancel::CancelToken;
pub use engine::{Allocation, Allocator, AllocatorOptions, validate_round};
pub use error::{AllocError, AllocResult, LedgerError, ScoreError};
pub use ledger::CapacityLedger;
pub use pairs::{Pair, ScoredPair, generate_pairs};
pub use ranking::{compare_pairs, rank_pairs};
pub use report::{AllocationSummary, format_report};
pub use scorer::{
    FallibleFnScorer, FnScorer, HeuristicScorer, PairScorer, ScoreFailure, estimate_risk_score,
    score_pairs,
};
