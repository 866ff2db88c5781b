//! Check command: pre-release reference policy

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use sharpgraph::model::ValidationViolation;
use sharpgraph::ui;
use sharpgraph::PipelineError;

use super::Session;
use crate::GlobalArgs;

#[derive(Serialize)]
struct CheckReport<'a> {
    ok: bool,
    violations: &'a [ValidationViolation],
}

/// Run the pipeline with strict mode forced on.
pub fn cmd_check(global: &GlobalArgs, json: bool) -> Result<()> {
    let mut session = Session::load(global)?;
    session.settings.policy.strict = true;

    match session.orchestrate() {
        Ok(run) => {
            if json {
                let report = CheckReport {
                    ok: true,
                    violations: &[],
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} No pre-release references in {}",
                    "✓".green(),
                    ui::format::count(run.graph.len(), "project")
                );
            }
            Ok(())
        }
        Err(PipelineError::PolicyViolation(violations)) => {
            if json {
                let report = CheckReport {
                    ok: false,
                    violations: &violations,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(PipelineError::PolicyViolation(violations).into())
        }
        Err(err) => Err(err.into()),
    }
}
