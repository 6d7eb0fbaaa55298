pub mod config;
pub mod types;

pub use config::{AllocationConfig, CasegridConfig, DEFAULT_AGENT_CAPACITY, ScoringConfig};
pub use types::*;
