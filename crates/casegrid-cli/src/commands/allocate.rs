//! `casegrid allocate`: run one allocation round from JSON inputs.

use std::path::Path;

use anyhow::{Context, Result, bail};
use casegrid_allocator::{
    Allocation, AllocationSummary, Allocator, AllocatorOptions, HeuristicScorer, format_report,
};
use casegrid_core::{Agent, CasegridConfig, Task};
use serde::Serialize;
use tracing::info;

pub struct AllocateArgs {
    pub tasks_path: String,
    pub agents_path: String,
    pub config_path: Option<String>,
    pub threshold: Option<f64>,
    pub format: String,
    pub top: usize,
    pub output: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: AllocationSummary,
    allocation: &'a Allocation,
}

pub fn allocate(args: &AllocateArgs) -> Result<()> {
    let config = load_config(args.config_path.as_deref())?;
    let tasks: Vec<Task> = read_json(Path::new(&args.tasks_path))?;
    let agents: Vec<Agent> = read_json(Path::new(&args.agents_path))?;

    let allocation = run_round(&config, args.threshold, &tasks, &agents)?;
    let rendered = render(&allocation, &args.format, args.top)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).with_context(|| format!("writing {path}"))?;
            println!("✓ Wrote {path}");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Resolve config: explicit path, else `./casegrid.toml`, else defaults.
fn load_config(explicit: Option<&str>) -> Result<CasegridConfig> {
    if let Some(path) = explicit {
        return CasegridConfig::from_file(Path::new(path)).with_context(|| format!("loading config {path}"));
    }

    let local = Path::new("casegrid.toml");
    if local.is_file() {
        info!("using ./casegrid.toml");
        return CasegridConfig::from_file(local).context("loading ./casegrid.toml");
    }

    Ok(CasegridConfig::default())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn run_round(
    config: &CasegridConfig,
    threshold: Option<f64>,
    tasks: &[Task],
    agents: &[Agent],
) -> Result<Allocation> {
    let mut options = AllocatorOptions::from(&config.allocation);
    if threshold.is_some() {
        options.score_threshold = threshold;
    }

    let scorer = HeuristicScorer::new(config.scoring.clone());
    let allocation = Allocator::new(options).allocate(tasks, agents, &scorer)?;
    Ok(allocation)
}

fn render(allocation: &Allocation, format: &str, top: usize) -> Result<String> {
    match format {
        "json" => {
            let report = JsonReport {
                summary: allocation.summary(),
                allocation,
            };
            Ok(serde_json::to_string_pretty(&report)? + "\n")
        }
        "text" => Ok(format_report(allocation, top)),
        other => bail!("unknown output format: {other} (expected text or json)"),
    }
}
