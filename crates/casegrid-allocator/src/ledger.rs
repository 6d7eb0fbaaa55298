//! Per-round capacity bookkeeping.
//!
//! One ledger per allocation round. It is owned by the engine for the
//! duration of the round and never shared.

use std::collections::{BTreeMap, HashMap};

use casegrid_core::Agent;

use crate::error::{AllocError, AllocResult, LedgerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    limit: u32,
    load: u32,
}

/// Load and limit for every agent in a round.
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    slots: HashMap<String, Slot>,
}

impl CapacityLedger {
    /// Build a ledger from the round's agents.
    ///
    /// Rejects negative capacities, negative loads, loads above capacity,
    /// and values that do not fit in `u32`. Agents without a capacity get
    /// `default_capacity`.
    pub fn from_agents(agents: &[Agent], default_capacity: u32) -> AllocResult<Self> {
        let mut slots = HashMap::with_capacity(agents.len());

        for agent in agents {
            let capacity = agent.capacity_or(default_capacity);
            if capacity < 0 {
                return Err(AllocError::InvalidInput(format!(
                    "agent {} has negative capacity limit {capacity}",
                    agent.id
                )));
            }
            if agent.current_load < 0 {
                return Err(AllocError::InvalidInput(format!(
                    "agent {} has negative current load {}",
                    agent.id, agent.current_load
                )));
            }
            if agent.current_load > capacity {
                return Err(AllocError::InvalidInput(format!(
                    "agent {} starts with load {} above capacity limit {capacity}",
                    agent.id, agent.current_load
                )));
            }
            let limit = u32::try_from(capacity).map_err(|_| {
                AllocError::InvalidInput(format!("agent {} capacity limit {capacity} too large", agent.id))
            })?;
            // load <= limit, so this cannot overflow.
            let load = agent.current_load as u32;

            slots.insert(agent.id.clone(), Slot { limit, load });
        }

        Ok(Self { slots })
    }

    /// Slots left for `agent_id`. Unknown agents have none.
    pub fn remaining_capacity(&self, agent_id: &str) -> u32 {
        self.slots
            .get(agent_id)
            .map(|s| s.limit - s.load)
            .unwrap_or(0)
    }

    /// Current load of `agent_id`, if tracked.
    pub fn load(&self, agent_id: &str) -> Option<u32> {
        self.slots.get(agent_id).map(|s| s.load)
    }

    /// Take one slot. Returns the new load.
    pub fn commit(&mut self, agent_id: &str) -> Result<u32, LedgerError> {
        let slot = self
            .slots
            .get_mut(agent_id)
            .ok_or_else(|| LedgerError::UnknownAgent(agent_id.to_string()))?;
        if slot.load >= slot.limit {
            return Err(LedgerError::AtCapacity {
                agent_id: agent_id.to_string(),
                limit: slot.limit,
            });
        }
        slot.load += 1;
        Ok(slot.load)
    }

    /// Total slots left across all agents.
    pub fn total_remaining(&self) -> u64 {
        self.slots.values().map(|s| u64::from(s.limit - s.load)).sum()
    }

    /// Agent id → current load, sorted by id.
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.slots
            .iter()
            .map(|(id, s)| (id.clone(), s.load))
            .collect()
    }
}
