use std::collections::{HashMap, HashSet};

use casegrid_allocator::{Allocation, Allocator, FnScorer, PairScorer};
use casegrid_core::{Agent, Task};
use proptest::prelude::*;

/// A generated round: tasks, agents as (capacity, load), and one score per pair.
#[derive(Debug, Clone)]
struct Round {
    tasks: Vec<Task>,
    agents: Vec<Agent>,
    scores: HashMap<(String, String), f64>,
}

impl Round {
    fn scorer(&self) -> impl PairScorer {
        let scores = self.scores.clone();
        FnScorer(move |task: &Task, agent: &Agent| {
            scores
                .get(&(task.id.clone(), agent.id.clone()))
                .copied()
                .unwrap_or(0.0)
        })
    }

    fn run(&self) -> Allocation {
        Allocator::default()
            .allocate(&self.tasks, &self.agents, &self.scorer())
            .expect("generated rounds are valid")
    }
}

fn round_strategy() -> impl Strategy<Value = Round> {
    let agents = prop::collection::vec((0i64..4).prop_flat_map(|cap| (Just(cap), 0..=cap)), 0..5);
    (0usize..8, agents)
        .prop_flat_map(|(n_tasks, agents)| {
            let n_pairs = n_tasks * agents.len();
            // Coarse score grid so ties are common.
            let scores = prop::collection::vec(0u8..=10, n_pairs);
            (Just(n_tasks), Just(agents), scores)
        })
        .prop_map(|(n_tasks, agent_specs, raw_scores)| {
            let tasks: Vec<Task> = (0..n_tasks).map(|i| Task::new(format!("T{i}"))).collect();
            let agents: Vec<Agent> = agent_specs
                .iter()
                .enumerate()
                .map(|(i, (cap, load))| Agent::new(format!("A{i}"), *cap).with_load(*load))
                .collect();
            let mut scores = HashMap::new();
            let mut raw = raw_scores.into_iter();
            for task in &tasks {
                for agent in &agents {
                    let s = f64::from(raw.next().unwrap_or(0)) / 10.0;
                    scores.insert((task.id.clone(), agent.id.clone()), s);
                }
            }
            Round { tasks, agents, scores }
        })
}

proptest! {
    #[test]
    fn no_task_assigned_twice(round in round_strategy()) {
        let result = round.run();
        let mut seen = HashSet::new();
        for a in &result.assignments {
            prop_assert!(seen.insert(a.task_id.clone()), "task {} assigned twice", a.task_id);
        }
    }

    #[test]
    fn agents_stay_within_capacity(round in round_strategy()) {
        let result = round.run();
        let per_agent = result.assigned_by_agent();
        for agent in &round.agents {
            let free = agent.capacity.unwrap_or(0) - agent.current_load;
            let used = i64::from(per_agent.get(&agent.id).copied().unwrap_or(0));
            prop_assert!(used <= free, "agent {} got {} with {} free", agent.id, used, free);
        }
    }

    #[test]
    fn assignments_come_from_generated_pairs(round in round_strategy()) {
        let result = round.run();
        for a in &result.assignments {
            let expected = round.scores.get(&(a.task_id.clone(), a.agent_id.clone()));
            prop_assert_eq!(expected.copied(), Some(a.score));
        }
    }

    #[test]
    fn assigned_and_unassigned_partition_tasks(round in round_strategy()) {
        let result = round.run();
        prop_assert_eq!(result.assigned_count() + result.unassigned.len(), round.tasks.len());
    }

    #[test]
    fn first_commit_is_best_feasible_pair(round in round_strategy()) {
        let result = round.run();
        let best = round
            .scores
            .iter()
            .filter(|((_, agent_id), _)| {
                round
                    .agents
                    .iter()
                    .any(|a| &a.id == agent_id && a.capacity.unwrap_or(0) > a.current_load)
            })
            .map(|(_, s)| *s)
            .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))));

        match (result.assignments.first(), best) {
            (Some(first), Some(best)) => prop_assert_eq!(first.score, best),
            (None, None) => {}
            (first, best) => prop_assert!(false, "first commit {:?} vs best feasible {:?}", first, best),
        }
    }

    #[test]
    fn scores_never_increase_along_commits(round in round_strategy()) {
        let result = round.run();
        for w in result.assignments.windows(2) {
            prop_assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn repeated_runs_are_identical(round in round_strategy()) {
        let first = round.run();
        let second = round.run();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_change_result(round in round_strategy()) {
        let forward = round.run();
        let mut reversed = round.clone();
        reversed.tasks.reverse();
        reversed.agents.reverse();
        let backward = reversed.run();
        prop_assert_eq!(forward.assignments, backward.assignments);
    }

    #[test]
    fn raising_capacity_never_reduces_assigned(round in round_strategy(), pick in 0usize..5, extra in 1i64..3) {
        prop_assume!(!round.agents.is_empty());
        let before = round.run().assigned_count();

        let mut bigger = round.clone();
        let idx = pick % bigger.agents.len();
        let cap = bigger.agents[idx].capacity.unwrap_or(0);
        bigger.agents[idx].capacity = Some(cap + extra);
        let after = bigger.run().assigned_count();

        prop_assert!(after >= before, "assigned dropped from {} to {}", before, after);
    }

    #[test]
    fn assigned_count_is_min_of_tasks_and_free_slots(round in round_strategy()) {
        let result = round.run();
        let free: i64 = round
            .agents
            .iter()
            .map(|a| a.capacity.unwrap_or(0) - a.current_load)
            .sum();
        let expected = (round.tasks.len() as i64).min(free);
        prop_assert_eq!(result.assigned_count() as i64, expected);
    }
}
