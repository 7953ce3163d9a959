//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod auth;
pub mod oauth;
pub mod session;
pub mod verify;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use gatepass_core::{AuthClient, FileSessionStore};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub client: AuthClient,
    pub store: Arc<FileSessionStore>,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Use the `--password` flag when given, otherwise prompt on stderr
pub(crate) fn resolve_password(flag: Option<String>) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "Password: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
