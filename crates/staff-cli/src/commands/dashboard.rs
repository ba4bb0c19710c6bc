use anyhow::Context;
use staff_dashboard::AggregationEngine;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    let engine = AggregationEngine::new(ctx.client.clone(), &ctx.config.dashboard);
    let view = engine
        .load_dashboard()
        .await
        .context("failed to load dashboard")?;
    if !flags.quiet {
        for warning in &view.warnings {
            eprintln!("warning: {warning}");
        }
    }
    output(&view, flags.format)
}
