//! # gatepass-core
//!
//! Client-side authentication core for Gatepass - shared between the CLI
//! and embedders.
//!
//! This crate provides:
//! - The auth client for the remote authentication service (`client` module)
//! - Credential pre-hashing (`crypto` module)
//! - Injected session storage (`session` module)
//! - Navigation route guarding (`guard` module)
//! - Data model and response normalization (`models` module)
//! - Unified error handling (`error` module)

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;

// Re-exports for convenience
pub use client::{AuthClient, OAuthRedirect};
pub use config::AuthConfig;
pub use error::{Error, Result};
pub use guard::{GuardDecision, NavigationTarget, RouteGuard};
pub use models::{
    AuthResult, OAuthSession, OAuthState, Session, UserProfile, VerificationOutcome,
};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
