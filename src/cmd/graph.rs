//! Graph command: extract and print the project graph

use anyhow::Result;
use colored::Colorize;

use sharpgraph::orchestrate::OrchestrationRun;
use sharpgraph::ui::{self, colors};

use super::Session;
use crate::GlobalArgs;

pub fn cmd_graph(global: &GlobalArgs, json: bool) -> Result<()> {
    let session = Session::load(global)?;
    let run = session.orchestrate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        print_graph(&run);
    }
    Ok(())
}

fn print_graph(run: &OrchestrationRun) {
    println!(
        "{} {}",
        ui::target_icon(run.target.kind()),
        colors::heading(&run.target.path().display().to_string())
    );

    if run.graph.is_empty() {
        println!("  {}", colors::secondary("(no projects)"));
        return;
    }

    for project in run.graph.projects() {
        println!();
        println!(
            "{} {}",
            colors::identifier(project.name()),
            colors::secondary(project.identifier())
        );
        if project.package_references().is_empty() {
            println!("  {}", "no package references".dimmed());
        }
        for reference in project.package_references() {
            println!("  {}", ui::reference(reference));
        }
    }
}
