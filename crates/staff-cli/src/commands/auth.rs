use anyhow::Context;
use serde::Serialize;
use staff_auth::{DashboardRoute, SignupRequest, claims, login};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuthCommands, AuthLoginArgs, AuthSignupArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    role: Option<String>,
    route: Option<&'static str>,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
}

#[derive(Serialize)]
struct AuthLoginResponse {
    role: String,
    route: &'static str,
    user_id: Option<String>,
}

#[derive(Serialize)]
struct AuthSignupResponse {
    registered: bool,
    email: String,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// Handle `staffdesk auth <subcommand>`.
pub async fn handle(action: AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => handle_login(&args, ctx, flags).await,
        AuthCommands::Signup(args) => handle_signup(args, ctx, flags).await,
        AuthCommands::Logout => {
            staff_auth::logout(ctx.tokens(), &ctx.session_path)?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => handle_status(ctx, flags),
    }
}

async fn handle_login(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = login::login(
        ctx.client.http(),
        ctx.config.api.base_url(),
        &args.email,
        &args.password,
    )
    .await
    .context("login failed")?;

    let response = AuthLoginResponse {
        role: outcome.session.role.to_string(),
        route: outcome.route.path(),
        user_id: outcome.session.user_id.as_ref().map(ToString::to_string),
    };
    ctx.tokens().set(outcome.session);
    output(&response, flags.format)
}

async fn handle_signup(args: AuthSignupArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = SignupRequest {
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        password: args.password,
    };
    login::signup(ctx.client.http(), ctx.config.api.base_url(), &request)
        .await
        .context("signup failed")?;
    output(
        &AuthSignupResponse {
            registered: true,
            email: request.email,
        },
        flags.format,
    )
}

fn handle_status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match ctx.tokens().get() {
        Some(session) => AuthStatusResponse {
            authenticated: true,
            role: Some(session.role.to_string()),
            route: Some(DashboardRoute::for_role(session.role).path()),
            user_id: session.user_id.as_ref().map(ToString::to_string),
            email: session.email(),
            expires_at: claims::expires_at(&session.access_token).map(|t| t.to_rfc3339()),
        },
        None => AuthStatusResponse {
            authenticated: false,
            role: None,
            route: None,
            user_id: None,
            email: None,
            expires_at: None,
        },
    };
    output(&status, flags.format)
}
