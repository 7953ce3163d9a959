//! Auth client
//!
//! Wraps every HTTP exchange with the remote authentication service:
//! request construction (base URL, default headers, bearer token from the
//! injected session store, fixed timeout), response normalization
//! (status-keyed error taxonomy, message extraction), and the auth
//! operations themselves. No operation retries and none spawns concurrent
//! sub-requests; the two-phase OAuth initiation is sequential alternatives.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::config::{endpoints, AuthConfig};
use crate::crypto::prehash_password;
use crate::error::{Error, Result};
use crate::models::{
    pick_str, AuthResult, OAuthSession, OAuthState, UserProfile, VerificationOutcome,
    DEFAULT_DISPLAY_NAME, ERROR_MESSAGE_FIELDS, MESSAGE_FIELDS, REDIRECT_URL_FIELDS,
    REFRESH_TOKEN_FIELDS, TOKEN_FIELDS,
};
use crate::session::SessionStore;

/// The only host the service may redirect to during OAuth initiation
const GITHUB_HOST: &str = "github.com";

/// Outcome of the two-phase GitHub OAuth initiation.
///
/// Prefer the redirect URL the service hands back; when that is missing,
/// malformed, or points at a host other than the provider's, fall through to
/// direct navigation against the service's own well-known endpoint so the
/// flow cannot dead-end on a bad API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthRedirect {
    /// Service-provided redirect URL on the provider's domain
    ProviderRedirect(Url),
    /// Navigate to the service endpoint and let it drive the redirect
    DirectFallback(Url),
}

impl OAuthRedirect {
    /// The URL to navigate to, whichever branch was taken
    pub fn url(&self) -> &Url {
        match self {
            OAuthRedirect::ProviderRedirect(url) | OAuthRedirect::DirectFallback(url) => url,
        }
    }
}

fn is_github_host(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == GITHUB_HOST || host.ends_with(".github.com")
        }
        None => false,
    }
}

/// Client for the remote authentication service
pub struct AuthClient {
    config: AuthConfig,
    client: Client,
    store: Arc<dyn SessionStore>,
}

impl AuthClient {
    pub fn new(config: AuthConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::UnknownError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// The injected session store
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    // ============ Exchange layer ============

    /// Build a request against `endpoint`: base URL prefix, default JSON
    /// headers, bearer token when a session is stored.
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(session) = self.store.get() {
            request = request.bearer_auth(session.token);
        }

        request
    }

    async fn exchange(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(Error::network)?;
        self.normalize(response).await
    }

    /// Parse the body on success; map a non-success status to the error
    /// taxonomy, pulling `message`/`error` from the body when it is JSON.
    async fn normalize(&self, response: Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| Error::UnknownError(format!("invalid response body: {}", e)));
        }

        // non-JSON error bodies keep the status-derived message
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| pick_str(&body, ERROR_MESSAGE_FIELDS));

        if status == StatusCode::UNAUTHORIZED {
            log::info!("[client] service rejected the session token, clearing local session");
            self.store.clear();
        }

        Err(Error::from_status(status, message))
    }

    // ============ Credential operations ============

    /// Exchange credentials for a session.
    ///
    /// The password is pre-hashed before it is put on the wire; a captcha
    /// token is attached when the caller has one. The caller persists the
    /// returned token/profile to the session store.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        captcha_token: Option<&str>,
    ) -> Result<AuthResult> {
        let digest = prehash_password(password, &self.config.salt)?;

        let mut payload = json!({
            "username": username,
            "password": digest,
        });
        if let Some(captcha) = captcha_token {
            payload["hcaptcha_token"] = json!(captcha);
        }

        log::debug!("[client] login attempt for {}", username);
        let body = self
            .exchange(self.request(Method::POST, endpoints::LOGIN).json(&payload))
            .await?;

        Ok(AuthResult {
            success: true,
            message: pick_str(&body, MESSAGE_FIELDS)
                .unwrap_or_else(|| "login successful".to_string()),
            token: pick_str(&body, TOKEN_FIELDS),
            user: UserProfile::from_auth_response(&body, username, DEFAULT_DISPLAY_NAME, None),
        })
    }

    /// Create an account. Requires a verification code previously mailed via
    /// [`Self::send_verification_code`].
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        verification_code: &str,
    ) -> Result<AuthResult> {
        let digest = prehash_password(password, &self.config.salt)?;

        let payload = json!({
            "username": username,
            "password": digest,
            "email": email,
            "verification_code": verification_code,
        });

        log::debug!("[client] registration attempt for {}", username);
        let body = self
            .exchange(
                self.request(Method::POST, endpoints::REGISTER)
                    .json(&payload),
            )
            .await?;

        Ok(AuthResult {
            success: true,
            message: pick_str(&body, MESSAGE_FIELDS)
                .unwrap_or_else(|| "registration successful".to_string()),
            // registration does not issue a token
            token: None,
            user: UserProfile::from_auth_response(&body, username, username, Some(email)),
        })
    }

    /// Ask the service to mail a verification code
    pub async fn send_verification_code(&self, email: &str) -> Result<VerificationOutcome> {
        let payload = json!({ "email": email });
        let body = self
            .exchange(
                self.request(Method::POST, endpoints::SEND_CODE)
                    .json(&payload),
            )
            .await?;

        Ok(VerificationOutcome {
            success: true,
            message: pick_str(&body, MESSAGE_FIELDS)
                .unwrap_or_else(|| "verification code sent".to_string()),
            data: body,
        })
    }

    /// Check a verification code the user received by email
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<VerificationOutcome> {
        let payload = json!({ "email": email, "code": code });
        let body = self
            .exchange(
                self.request(Method::POST, endpoints::VERIFY_CODE)
                    .json(&payload),
            )
            .await?;

        Ok(VerificationOutcome {
            success: true,
            message: pick_str(&body, MESSAGE_FIELDS)
                .unwrap_or_else(|| "verification code accepted".to_string()),
            data: body,
        })
    }

    // ============ Session operations ============

    /// Invalidate the remote session.
    ///
    /// Local session state is cleared unconditionally before the outcome is
    /// delivered, so the caller can never observe a logout failure while the
    /// client still looks authenticated.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .exchange(self.request(Method::POST, endpoints::LOGOUT))
            .await;

        self.store.clear();

        result.map(|_| ())
    }

    /// Fetch the current profile, raw normalized body
    pub async fn get_user_info(&self) -> Result<Value> {
        self.exchange(self.request(Method::GET, endpoints::USER_INFO))
            .await
    }

    // ============ OAuth2 (GitHub) ============

    /// Start the GitHub authorization flow.
    ///
    /// Asks the service for a redirect URL first; a URL on any host other
    /// than GitHub's is discarded as a potential open redirect. Whenever the
    /// first phase yields nothing usable, the deterministic fallback is
    /// direct navigation to the service's own OAuth endpoint.
    pub async fn initiate_github_oauth(&self) -> Result<OAuthRedirect> {
        match self
            .exchange(self.request(Method::GET, endpoints::GITHUB_OAUTH))
            .await
        {
            Ok(body) => {
                if let Some(candidate) = pick_str(&body, REDIRECT_URL_FIELDS) {
                    match Url::parse(&candidate) {
                        Ok(url) if is_github_host(&url) => {
                            log::info!("[client] using service-provided provider redirect");
                            return Ok(OAuthRedirect::ProviderRedirect(url));
                        }
                        Ok(url) => {
                            log::warn!(
                                "[client] discarding redirect to untrusted host {:?}",
                                url.host_str()
                            );
                        }
                        Err(e) => {
                            log::warn!("[client] service returned an unparseable redirect URL: {}", e);
                        }
                    }
                } else {
                    log::warn!("[client] OAuth response carried no redirect URL");
                }
            }
            Err(e) => {
                log::warn!(
                    "[client] OAuth redirect lookup failed, using direct navigation: {}",
                    e
                );
            }
        }

        let fallback = Url::parse(&format!(
            "{}{}",
            self.config.base_url,
            endpoints::GITHUB_OAUTH
        ))
        .map_err(|e| Error::oauth(format!("invalid base URL for direct navigation: {}", e)))?;

        Ok(OAuthRedirect::DirectFallback(fallback))
    }

    /// Trade the authorization code/state pair for a session
    pub async fn handle_github_callback(&self, state: &OAuthState) -> Result<OAuthSession> {
        let payload = json!({
            "code": state.code,
            "state": state.state,
        });

        let body = self
            .exchange(
                self.request(Method::POST, endpoints::GITHUB_CALLBACK)
                    .json(&payload),
            )
            .await?;

        let token = pick_str(&body, TOKEN_FIELDS)
            .ok_or_else(|| Error::oauth("callback response carried no access token"))?;

        Ok(OAuthSession {
            token,
            refresh_token: pick_str(&body, REFRESH_TOKEN_FIELDS),
            user: UserProfile::from_oauth_response(&body),
        })
    }
}
