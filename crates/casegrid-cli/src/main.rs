use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "casegrid",
    about = "casegrid: score-ranked greedy case allocation",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign tasks to agents for one round.
    ///
    /// Tasks and agents are JSON arrays. Pairs are scored with the
    /// built-in heuristic (agent skill + task risk), weighted by the
    /// [scoring] section of casegrid.toml.
    Allocate {
        /// JSON array of tasks
        #[arg(short, long)]
        tasks: String,
        /// JSON array of agents
        #[arg(short, long)]
        agents: String,
        /// Config file (default: ./casegrid.toml if present)
        #[arg(short, long)]
        config: Option<String>,
        /// Override [allocation].score_threshold
        #[arg(long)]
        threshold: Option<f64>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Assignments listed in the text report
        #[arg(long, default_value = "5")]
        top: usize,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Write a casegrid.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("casegrid=info".parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Allocate {
            tasks,
            agents,
            config,
            threshold,
            format,
            top,
            output,
        } => commands::allocate::allocate(&commands::allocate::AllocateArgs {
            tasks_path: tasks,
            agents_path: agents,
            config_path: config,
            threshold,
            format,
            top,
            output,
        }),
        Commands::Init { path } => commands::init::init(&path),
    }
}
