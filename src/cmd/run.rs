//! Run command: delegate lifecycle stages to the toolchain

use anyhow::Result;
use colored::Colorize;

use sharpgraph::toolchain::{self, Stage, Toolchain};
use sharpgraph::ui;

use super::Session;
use crate::GlobalArgs;

pub fn cmd_run(global: &GlobalArgs, stages: &[Stage], dry_run: bool) -> Result<()> {
    let session = Session::load(global)?;
    let run = session.orchestrate()?;

    let plan = toolchain::plan(stages);
    let toolchain = Toolchain::new(&session.config.toolchain.program, &run);

    if dry_run {
        for line in toolchain.describe(&plan) {
            println!("{}", line);
        }
        return Ok(());
    }

    toolchain.execute(&plan, |stage| {
        if !ui::is_quiet() {
            eprintln!("{} {} {}", "→".cyan(), "dotnet".dimmed(), stage);
        }
    })?;

    if !ui::is_quiet() {
        let names: Vec<String> = plan.iter().map(Stage::to_string).collect();
        eprintln!("{} {}", "✓".green(), names.join(" → "));
    }
    Ok(())
}
