//! Delegation of lifecycle stages to the `dotnet` CLI.
//!
//! The toolchain only ever runs after an orchestration run succeeded, so a
//! strict policy failure stops everything before the first `dotnet` process.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::orchestrate::OrchestrationRun;
use crate::settings::BuildSettings;

/// Lifecycle stage, declared in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Clean,
    Restore,
    Build,
    Test,
    Publish,
}

impl Stage {
    /// Stages that must run before this one.
    pub fn prerequisites(self) -> &'static [Stage] {
        match self {
            Stage::Clean | Stage::Restore => &[],
            Stage::Build => &[Stage::Restore],
            Stage::Test | Stage::Publish => &[Stage::Build],
        }
    }

    /// The `dotnet` subcommand.
    pub fn command(self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::Restore => "restore",
            Stage::Build => "build",
            Stage::Test => "test",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Expand requested stages with their prerequisites, in lifecycle order.
pub fn plan(requested: &[Stage]) -> Vec<Stage> {
    let mut stages = BTreeSet::new();
    let mut pending: Vec<Stage> = requested.to_vec();
    while let Some(stage) = pending.pop() {
        if stages.insert(stage) {
            pending.extend_from_slice(stage.prerequisites());
        }
    }
    stages.into_iter().collect()
}

/// Arguments for `dotnet <stage>` against `target`.
pub fn stage_args(stage: Stage, target: &std::path::Path, build: &BuildSettings) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![stage.command().into(), target.into()];

    if stage != Stage::Restore {
        args.push("--configuration".into());
        args.push(build.configuration.clone().into());
        if let Some(platform) = &build.platform {
            args.push(format!("-p:Platform={}", platform).into());
        }
    }

    match stage {
        Stage::Build => args.push("--no-restore".into()),
        Stage::Test | Stage::Publish => args.push("--no-build".into()),
        Stage::Clean | Stage::Restore => {}
    }
    args
}

/// Runs stages through the `dotnet` CLI for one successful run.
pub struct Toolchain<'a> {
    program: String,
    run: &'a OrchestrationRun,
}

impl<'a> Toolchain<'a> {
    pub fn new(program: impl Into<String>, run: &'a OrchestrationRun) -> Self {
        Self {
            program: program.into(),
            run,
        }
    }

    fn working_dir(&self) -> PathBuf {
        self.run.settings().working_dir.clone()
    }

    /// Render each stage as a printable command line.
    pub fn describe(&self, stages: &[Stage]) -> Vec<String> {
        stages
            .iter()
            .map(|stage| {
                let args = stage_args(*stage, self.run.target.path(), &self.run.settings().build);
                let rendered: Vec<String> = args
                    .iter()
                    .map(|a| a.to_string_lossy().to_string())
                    .collect();
                format!("{} {}", self.program, rendered.join(" "))
            })
            .collect()
    }

    /// Execute stages in order, stopping at the first failure.
    ///
    /// `on_stage` is called before each stage starts.
    pub fn execute(&self, stages: &[Stage], mut on_stage: impl FnMut(Stage)) -> Result<()> {
        for stage in stages {
            on_stage(*stage);
            let status = Command::new(&self.program)
                .args(stage_args(
                    *stage,
                    self.run.target.path(),
                    &self.run.settings().build,
                ))
                .current_dir(self.working_dir())
                .status()
                .with_context(|| format!("Failed to invoke {}. Is it installed and in PATH?", self.program))?;

            if !status.success() {
                anyhow::bail!("dotnet {} failed with status: {}", stage, status);
            }
        }
        Ok(())
    }
}
