mod auth;
mod dashboard;
mod employees;
mod leave;
mod workspace;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, ctx, flags).await,
        Commands::Dashboard => dashboard::handle(ctx, flags).await,
        Commands::Workspace => workspace::handle(ctx, flags).await,
        Commands::Employees(args) => employees::handle(&args, ctx, flags).await,
        Commands::Leave { action } => leave::handle(action, ctx, flags).await,
    }
}
