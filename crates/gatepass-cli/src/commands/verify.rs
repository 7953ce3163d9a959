//! Email verification-code commands

use anyhow::Result;
use clap::Subcommand;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum VerifyAction {
    /// Mail a verification code to an address
    Send { email: String },

    /// Check a code received by email
    Check { email: String, code: String },
}

pub async fn execute(ctx: &Context, action: VerifyAction) -> Result<()> {
    match action {
        VerifyAction::Send { email } => {
            let outcome = ctx.client.send_verification_code(&email).await?;
            output::print_success(&outcome.message, ctx.quiet);
        }
        VerifyAction::Check { email, code } => {
            let outcome = ctx.client.verify_code(&email, &code).await?;
            output::print_success(&outcome.message, ctx.quiet);
        }
    }
    Ok(())
}
