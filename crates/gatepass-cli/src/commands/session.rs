//! Local session inspection commands
//!
//! These never talk to the service; they show what the route guard sees.

use anyhow::Result;
use clap::Subcommand;
use gatepass_core::{GuardDecision, NavigationTarget, RouteGuard, SessionStore};

use super::Context;
use crate::output::{self, FieldRow};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show the locally stored session
    Show,

    /// Clear local session state without calling the service
    Clear,
}

pub fn execute(ctx: &Context, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::Show => show(ctx),
        SessionAction::Clear => clear(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let guard = RouteGuard::new(ctx.store.clone());
    let decision = guard.evaluate(&NavigationTarget::protected());

    match ctx.store.get() {
        Some(session) => {
            let mut rows = vec![
                FieldRow::new("token", mask(&session.token)),
                FieldRow::new("saved_at", session.saved_at.to_rfc3339()),
            ];
            rows.extend(output::profile_rows(&session.user));
            rows.push(FieldRow::new("protected views", decision_label(decision)));
            output::print_fields(&rows, ctx.format)
        }
        None => {
            output::print_info("No session stored", ctx.quiet);
            output::print_info(
                &format!("Protected views: {}", decision_label(decision)),
                ctx.quiet,
            );
            Ok(())
        }
    }
}

fn clear(ctx: &Context) -> Result<()> {
    ctx.store.clear();
    output::print_success("Local session cleared", ctx.quiet);
    Ok(())
}

fn decision_label(decision: GuardDecision) -> &'static str {
    match decision {
        GuardDecision::Allow => "allow",
        GuardDecision::RedirectToLogin => "redirect-to-login",
    }
}

/// Keep a short prefix so a session is recognizable without leaking the token
fn mask(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}…", prefix)
}
