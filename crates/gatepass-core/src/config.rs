//! Client configuration
//!
//! Base URL, pre-hash salt and request settings, plus the remote endpoint
//! table. Values come from the environment by default and can be overridden
//! with the builder methods.

use std::env;
use std::time::Duration;

/// Remote endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    /// Declared by the service; no core flow calls it yet
    pub const REFRESH: &str = "/auth/refresh";
    pub const USER_INFO: &str = "/auth/user/me";
    pub const REGISTER: &str = "/auth/register";
    pub const SEND_CODE: &str = "/auth/send-verification-code";
    pub const VERIFY_CODE: &str = "/auth/verify-code";
    pub const GITHUB_OAUTH: &str = "/auth/oauth2/github/login";
    pub const GITHUB_CALLBACK: &str = "/auth/oauth2/github/callback";
}

/// Environment variable holding the remote service base URL
pub const BASE_URL_ENV: &str = "GATEPASS_API_BASE_URL";

/// Environment variable holding the pre-hash salt
pub const SALT_ENV: &str = "GATEPASS_CRYPTO_SALT";

/// Per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`crate::client::AuthClient`]
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the remote authentication service, no trailing slash
    pub base_url: String,

    /// Salt appended to passwords before pre-hashing. An empty salt makes
    /// every credential operation fail with `CryptoFailure` rather than
    /// ever sending a plaintext password.
    pub salt: String,

    /// Fixed per-request timeout
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl AuthConfig {
    pub fn new(base_url: impl Into<String>, salt: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            salt: salt.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Read `GATEPASS_API_BASE_URL` and `GATEPASS_CRYPTO_SALT`.
    ///
    /// Missing variables produce empty values: the client then fails at the
    /// first operation that needs them instead of at startup.
    pub fn from_env() -> Self {
        Self::new(
            env::var(BASE_URL_ENV).unwrap_or_default(),
            env::var(SALT_ENV).unwrap_or_default(),
        )
    }

    /// Override the per-request timeout (default: 10 seconds)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
