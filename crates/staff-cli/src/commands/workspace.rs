use anyhow::Context;
use staff_dashboard::EmployeeWorkspace;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    let view = EmployeeWorkspace::new(ctx.client.clone(), &ctx.config.dashboard)
        .load()
        .await
        .context("failed to load workspace")?;
    if view.showing_all_projects && !flags.quiet {
        eprintln!("note: no project lists you as a member; showing all projects");
    }
    output(&view, flags.format)
}
