use staff_api::{LeaveRequestDraft, SubmitError, submit_leave_request};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LeaveCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: LeaveCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        LeaveCommands::Request(args) => {
            ctx.require_session()?;
            let draft = LeaveRequestDraft {
                leave_type: args.leave_type,
                start_date: args.start,
                end_date: args.end,
                reason: args.reason,
            };
            match submit_leave_request(&ctx.client, &draft).await {
                Ok(created) => output(&created, flags.format),
                Err(SubmitError::Rejected(errors)) => {
                    for field in errors.fields() {
                        eprintln!("  {field}: {}", errors.first(field).unwrap_or("invalid"));
                    }
                    Err(SubmitError::Rejected(errors).into())
                }
                Err(other) => Err(other.into()),
            }
        }
    }
}
