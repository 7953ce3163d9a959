//! Gatepass CLI - authentication client front end
//!
//! A command-line interface for the remote authentication service: sign in,
//! register, manage the locally stored session, and drive the GitHub OAuth
//! flow.

mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gatepass_core::{AuthClient, AuthConfig, FileSessionStore};

#[derive(Parser)]
#[command(name = "gatepass")]
#[command(author, version, about = "Authentication client CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Remote service base URL
    #[arg(long, env = "GATEPASS_API_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Pre-hash salt for passwords
    #[arg(long, env = "GATEPASS_CRYPTO_SALT", global = true, hide_env_values = true)]
    salt: Option<String>,

    /// Override the session file path (default: ~/.gatepass/session.json)
    #[arg(long, global = true)]
    session_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session locally
    Login {
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Human-verification token to attach to the request
        #[arg(long)]
        captcha_token: Option<String>,
    },

    /// Create an account (requires an emailed verification code)
    Register {
        username: String,
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Verification code received by email
        #[arg(long)]
        code: String,
    },

    /// Invalidate the remote session and clear local state
    Logout,

    /// Fetch the current profile from the service
    Whoami,

    /// Email verification codes
    Verify {
        #[command(subcommand)]
        action: commands::verify::VerifyAction,
    },

    /// GitHub OAuth2 flows
    Oauth {
        #[command(subcommand)]
        action: commands::oauth::OauthAction,
    },

    /// Inspect or clear the locally stored session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // session inspection works offline; everything else talks to the service
    let needs_remote = !matches!(cli.command, Commands::Session { .. });
    let base_url = match cli.base_url.clone() {
        Some(url) => url,
        None if needs_remote => anyhow::bail!(
            "no base URL configured; pass --base-url or set GATEPASS_API_BASE_URL"
        ),
        None => String::new(),
    };

    let store = Arc::new(match &cli.session_file {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::at_default_location(),
    });

    let config = AuthConfig::new(base_url, cli.salt.clone().unwrap_or_default());
    let client = AuthClient::new(config, store.clone())?;

    let ctx = commands::Context {
        client,
        store,
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Login {
            username,
            password,
            captcha_token,
        } => commands::auth::login(&ctx, username, password, captcha_token).await,
        Commands::Register {
            username,
            email,
            password,
            code,
        } => commands::auth::register(&ctx, username, email, password, code).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Verify { action } => commands::verify::execute(&ctx, action).await,
        Commands::Oauth { action } => commands::oauth::execute(&ctx, action).await,
        Commands::Session { action } => commands::session::execute(&ctx, action),
    }
}
