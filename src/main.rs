//! CLI entry point and command dispatch for sharpgraph.

mod cmd;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use sharpgraph::toolchain::Stage;
use sharpgraph::PipelineError;

#[derive(Parser)]
#[command(name = "sharpgraph")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
))]
#[command(about = "Project graph extraction and policy checks for .NET solutions", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory containing the solution or project
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub working_dir: PathBuf,
    /// Explicit solution/project file, relative to the working directory
    #[arg(long, global = true)]
    pub target: Option<PathBuf>,
    /// Build configuration (e.g. Debug, Release)
    #[arg(long, global = true)]
    pub configuration: Option<String>,
    /// Target platform (e.g. x64, AnyCPU)
    #[arg(long, global = true)]
    pub platform: Option<String>,
    /// Fail on pre-release package references
    #[arg(long, global = true)]
    pub strict: bool,
    /// Suppress progress output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the solution or project file that would be used
    Target,
    /// Extract and print the project graph
    Graph {
        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check package references for pre-release versions
    Check {
        /// Print violations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract the graph, enforce policy, then run toolchain stages
    Run {
        /// Stages to run; prerequisites are added automatically
        #[arg(value_enum, required = true)]
        stages: Vec<Stage>,
        /// Print the planned commands without executing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the effective configuration
    Config,
}

/// Exit code for a failed command.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::TargetNotFound { .. }) => 2,
        Some(PipelineError::AnalyzerFailed { .. }) => 3,
        Some(PipelineError::DecodeError(_)) => 4,
        Some(PipelineError::PolicyViolation(_)) => 5,
        Some(PipelineError::Io { .. }) | None => 1,
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.global.quiet {
        std::env::set_var(sharpgraph::ui::QUIET_ENV, "1");
    }

    match cli.command {
        Commands::Target => cmd::target::cmd_target(&cli.global),
        Commands::Graph { json } => cmd::graph::cmd_graph(&cli.global, json),
        Commands::Check { json } => cmd::check::cmd_check(&cli.global, json),
        Commands::Run { stages, dry_run } => cmd::run::cmd_run(&cli.global, &stages, dry_run),
        Commands::Config => cmd::config::cmd_config(&cli.global),
    }
}
