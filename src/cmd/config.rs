//! Config command: print the effective configuration

use anyhow::Result;

use sharpgraph::ui::colors;

use super::Session;
use crate::GlobalArgs;

pub fn cmd_config(global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;

    println!("{}", colors::heading("# Effective configuration"));
    print!("{}", serde_yaml::to_string(&session.config)?);
    println!();
    println!("{}", colors::heading("# Run settings"));
    print!("{}", serde_yaml::to_string(&session.settings)?);
    Ok(())
}
