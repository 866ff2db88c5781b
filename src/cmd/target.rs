//! Target command: show which solution/project would be used

use anyhow::Result;

use sharpgraph::target;
use sharpgraph::ui;

use super::Session;
use crate::GlobalArgs;

pub fn cmd_target(global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let resolved = target::resolve(
        &session.settings.working_dir,
        session.settings.target.as_deref(),
    )?;

    println!(
        "{} {} {}",
        ui::target_icon(resolved.kind()),
        resolved.kind(),
        resolved.path().display()
    );
    Ok(())
}
