//! GitHub OAuth2 commands

use anyhow::Result;
use clap::Subcommand;
use gatepass_core::{OAuthRedirect, OAuthState, Session, SessionStore};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum OauthAction {
    /// Start the GitHub authorization flow and print where to navigate
    Github,

    /// Complete the flow with the code/state pair from the callback URL
    Callback { code: String, state: String },
}

pub async fn execute(ctx: &Context, action: OauthAction) -> Result<()> {
    match action {
        OauthAction::Github => initiate(ctx).await,
        OauthAction::Callback { code, state } => callback(ctx, code, state).await,
    }
}

async fn initiate(ctx: &Context) -> Result<()> {
    match ctx.client.initiate_github_oauth().await? {
        OAuthRedirect::ProviderRedirect(url) => {
            output::print_info("Service-provided GitHub authorization URL:", ctx.quiet);
            println!("{}", url);
        }
        OAuthRedirect::DirectFallback(url) => {
            output::print_info(
                "No usable redirect from the service; navigate directly to:",
                ctx.quiet,
            );
            println!("{}", url);
        }
    }
    Ok(())
}

async fn callback(ctx: &Context, code: String, state: String) -> Result<()> {
    let oauth = ctx
        .client
        .handle_github_callback(&OAuthState::new(code, state))
        .await?;

    ctx.store
        .set(Session::new(oauth.token.clone(), oauth.user.clone()));

    let display = oauth.user.username.as_deref().unwrap_or("GitHub user");
    output::print_success(&format!("Signed in via GitHub as {}", display), ctx.quiet);
    output::print_fields(&output::profile_rows(&oauth.user), ctx.format)
}
