//! Data model and response normalization
//!
//! The remote service is inconsistent about field names (`id` vs `userId`,
//! `name` vs `nickname`, `avatar` vs `avatar_url`, camel- vs snake-case
//! tokens). Normalization walks an explicit, priority-ordered candidate list
//! per canonical field and takes the first non-empty hit, so precedence is
//! auditable and a later candidate can never shadow an earlier one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display name used when the service sends none
pub const DEFAULT_DISPLAY_NAME: &str = "用户";

// ============ Field precedence tables ============

/// Ordered candidate paths for one canonical field; earlier entries win
type FieldPaths = &'static [&'static [&'static str]];

pub(crate) const TOKEN_FIELDS: FieldPaths = &[&["token"], &["access_token"], &["accessToken"]];
pub(crate) const REFRESH_TOKEN_FIELDS: FieldPaths = &[&["refreshToken"], &["refresh_token"]];
pub(crate) const REDIRECT_URL_FIELDS: FieldPaths = &[&["redirectUrl"], &["url"], &["authUrl"]];
pub(crate) const MESSAGE_FIELDS: FieldPaths = &[&["message"]];
pub(crate) const ERROR_MESSAGE_FIELDS: FieldPaths = &[&["message"], &["error"]];

const ID_FIELDS: FieldPaths = &[&["user", "id"], &["userId"], &["id"]];
const USERNAME_FIELDS: FieldPaths = &[&["user", "username"], &["username"]];
const NAME_FIELDS: FieldPaths = &[
    &["user", "name"],
    &["user", "nickname"],
    &["name"],
    &["nickname"],
];
const EMAIL_FIELDS: FieldPaths = &[&["user", "email"], &["email"]];
const AVATAR_FIELDS: FieldPaths = &[&["user", "avatar"], &["avatar"]];

// OAuth callbacks pass GitHub's own field names through
const OAUTH_USERNAME_FIELDS: FieldPaths = &[&["user", "username"], &["username"], &["login"]];
const OAUTH_AVATAR_FIELDS: FieldPaths = &[
    &["user", "avatar"],
    &["user", "avatar_url"],
    &["avatar"],
    &["avatar_url"],
];
const GITHUB_ID_FIELDS: FieldPaths = &[&["user", "githubId"], &["github_id"], &["user", "id"]];

fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |value, key| value.get(key))
}

/// First non-empty string candidate in priority order
pub(crate) fn pick_str(body: &Value, fields: FieldPaths) -> Option<String> {
    fields.iter().find_map(|path| {
        lookup(body, path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Like [`pick_str`], but numeric candidates are accepted and rendered in decimal
pub(crate) fn pick_id(body: &Value, fields: FieldPaths) -> Option<String> {
    fields.iter().find_map(|path| match lookup(body, path) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============ Profile ============

/// Best-effort normalization of the service's heterogeneous user payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,

    /// Provider-specific identifier, populated by the OAuth callback only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
}

impl UserProfile {
    /// Normalize a login/register response body.
    ///
    /// `fallback_username` is the name the caller authenticated with;
    /// `default_name` fills the display name when the service sends none
    /// (the caller's username on registration, "用户" on login).
    pub fn from_auth_response(
        body: &Value,
        fallback_username: &str,
        default_name: &str,
        fallback_email: Option<&str>,
    ) -> Self {
        Self {
            id: pick_id(body, ID_FIELDS),
            username: pick_str(body, USERNAME_FIELDS)
                .or_else(|| Some(fallback_username.to_string())),
            name: pick_str(body, NAME_FIELDS).or_else(|| Some(default_name.to_string())),
            email: pick_str(body, EMAIL_FIELDS).or_else(|| fallback_email.map(str::to_string)),
            avatar: pick_str(body, AVATAR_FIELDS),
            github_id: None,
        }
    }

    /// Normalize an OAuth callback response body
    pub fn from_oauth_response(body: &Value) -> Self {
        Self {
            id: pick_id(body, ID_FIELDS),
            username: pick_str(body, OAUTH_USERNAME_FIELDS),
            name: pick_str(body, NAME_FIELDS),
            email: pick_str(body, EMAIL_FIELDS),
            avatar: pick_str(body, OAUTH_AVATAR_FIELDS),
            github_id: pick_id(body, GITHUB_ID_FIELDS),
        }
    }
}

// ============ Session ============

/// Client-held proof that a user has authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,

    /// When the session was persisted locally
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
            saved_at: Utc::now(),
        }
    }
}

// ============ Operation envelopes ============

/// Uniform envelope returned by login and register
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
    /// Absent on registration; the service only issues tokens on login
    pub token: Option<String>,
    pub user: UserProfile,
}

/// Session-plus-profile shape produced by the authorization-code exchange
#[derive(Debug, Clone, Serialize)]
pub struct OAuthSession {
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

/// Ephemeral code/state pair carried through the OAuth callback URL.
/// Lives for the single exchange call, never persisted.
#[derive(Debug, Clone)]
pub struct OAuthState {
    pub code: String,
    pub state: String,
}

impl OAuthState {
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: state.into(),
        }
    }
}

/// Outcome of the email verification-code endpoints
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_user_field_wins_over_legacy_and_alias() {
        let body = json!({
            "nickname": "alias",
            "name": "legacy",
            "user": { "name": "nested" }
        });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.name.as_deref(), Some("nested"));
    }

    #[test]
    fn test_legacy_field_wins_over_alias() {
        let body = json!({ "nickname": "alias", "name": "legacy" });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.name.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_empty_candidate_never_shadows_a_later_one() {
        let body = json!({ "user": { "name": "" }, "nickname": "alias" });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.name.as_deref(), Some("alias"));
    }

    #[test]
    fn test_login_fallbacks() {
        let body = json!({ "token": "t1" });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(profile.name.as_deref(), Some(DEFAULT_DISPLAY_NAME));
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_register_fallbacks() {
        let body = json!({ "message": "created" });
        let profile =
            UserProfile::from_auth_response(&body, "bob", "bob", Some("bob@example.com"));
        assert_eq!(profile.name.as_deref(), Some("bob"));
        assert_eq!(profile.email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_numeric_id_coerced_to_decimal_string() {
        let body = json!({ "user": { "id": 42 } });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_id_precedence() {
        let body = json!({ "id": 3, "userId": 2, "user": { "id": 1 } });
        let profile = UserProfile::from_auth_response(&body, "alice", DEFAULT_DISPLAY_NAME, None);
        assert_eq!(profile.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_token_precedence() {
        let body = json!({ "accessToken": "camel", "access_token": "snake", "token": "plain" });
        assert_eq!(pick_str(&body, TOKEN_FIELDS).as_deref(), Some("plain"));
    }

    #[test]
    fn test_oauth_profile_uses_github_fields() {
        let body = json!({
            "login": "octocat",
            "avatar_url": "https://avatars.example/octocat.png",
            "github_id": 583231
        });
        let profile = UserProfile::from_oauth_response(&body);
        assert_eq!(profile.username.as_deref(), Some("octocat"));
        assert_eq!(
            profile.avatar.as_deref(),
            Some("https://avatars.example/octocat.png")
        );
        assert_eq!(profile.github_id.as_deref(), Some("583231"));
        // no fallback display name for OAuth profiles
        assert_eq!(profile.name, None);
    }

    #[test]
    fn test_oauth_github_id_falls_back_to_user_id() {
        let body = json!({ "user": { "id": 7, "username": "octocat" } });
        let profile = UserProfile::from_oauth_response(&body);
        assert_eq!(profile.github_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_session_roundtrip() {
        let session = Session::new("t1", UserProfile::default());
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
