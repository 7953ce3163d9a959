//! Credential commands: login, register, logout, whoami

use anyhow::Result;
use gatepass_core::{Session, SessionStore};

use super::{resolve_password, Context};
use crate::output::{self, OutputFormat};

pub async fn login(
    ctx: &Context,
    username: String,
    password: Option<String>,
    captcha_token: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;

    let result = ctx
        .client
        .login(&username, &password, captcha_token.as_deref())
        .await?;

    match &result.token {
        Some(token) => {
            // the caller-updates-storage step of the auth flow
            ctx.store
                .set(Session::new(token.clone(), result.user.clone()));
            let display = result.user.username.as_deref().unwrap_or(&username);
            output::print_success(&format!("Signed in as {}", display), ctx.quiet);
        }
        None => {
            output::print_error("Service reported success but issued no token; session not saved");
        }
    }

    output::print_fields(&output::profile_rows(&result.user), ctx.format)
}

pub async fn register(
    ctx: &Context,
    username: String,
    email: String,
    password: Option<String>,
    code: String,
) -> Result<()> {
    let password = resolve_password(password)?;

    let result = ctx
        .client
        .register(&username, &password, &email, &code)
        .await?;

    output::print_success(&result.message, ctx.quiet);
    match &result.token {
        // some deployments sign the new account in right away
        Some(token) => {
            ctx.store
                .set(Session::new(token.clone(), result.user.clone()));
        }
        None => {
            output::print_info("Sign in with `gatepass login` to start a session", ctx.quiet);
        }
    }
    output::print_fields(&output::profile_rows(&result.user), ctx.format)
}

pub async fn logout(ctx: &Context) -> Result<()> {
    match ctx.client.logout().await {
        Ok(()) => {
            output::print_success("Signed out", ctx.quiet);
            Ok(())
        }
        Err(e) => {
            // the client has already dropped local state at this point
            output::print_info("Local session cleared", ctx.quiet);
            Err(e.into())
        }
    }
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let body = ctx.client.get_user_info().await?;

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        OutputFormat::Table => output::print_fields(&output::value_rows(&body), ctx.format),
    }
}
