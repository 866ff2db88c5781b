//! Command module structure for the sharpgraph CLI

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

use sharpgraph::config::{Config, Overrides};
use sharpgraph::orchestrate::{OrchestrationRun, Orchestrator};
use sharpgraph::settings::RunSettings;
use sharpgraph::ui;
use sharpgraph::PipelineResult;

use crate::GlobalArgs;

pub mod check;
pub mod config;
pub mod graph;
pub mod run;
pub mod target;

/// Loaded configuration plus the settings for this invocation.
pub struct Session {
    pub config: Config,
    pub settings: RunSettings,
}

impl Session {
    /// Load config for the working directory and apply command-line flags.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let working_dir = absolute(&global.working_dir)?;
        let config = Config::load(&working_dir)?;
        let overrides = Overrides {
            target: global.target.clone(),
            configuration: global.configuration.clone(),
            platform: global.platform.clone(),
            strict: global.strict,
        };
        let settings = config.run_settings(&working_dir, &overrides)?;
        Ok(Self { config, settings })
    }

    /// Run the extraction pipeline, reporting progress on stderr.
    pub fn orchestrate(&self) -> PipelineResult<OrchestrationRun> {
        let analyzer = self.config.analyzer(&self.settings);
        let started = Instant::now();

        if !ui::is_quiet() {
            eprintln!(
                "{} Analyzing {} ({})",
                "→".cyan(),
                self.settings.working_dir.display(),
                self.settings.build.configuration
            );
        }

        let run = Orchestrator::new(self.settings.clone(), &analyzer).run()?;

        if !ui::is_quiet() {
            eprintln!(
                "{} {} {} in {}",
                "✓".green(),
                ui::format::count(run.graph.len(), "project"),
                "decoded".dimmed(),
                ui::format::elapsed(started.elapsed())
            );
        }
        Ok(run)
    }
}

fn absolute(path: &std::path::Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}
