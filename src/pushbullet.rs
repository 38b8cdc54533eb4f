//! Pushbullet wire types: endpoints, the access token and the note payload.

use crate::errors::PushError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Base URL every endpoint path is resolved against
pub const API_BASE_URL: &str = "https://api.pushbullet.com/";

/// Upper bound on a single request, connect through body
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the access token
pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";

/// Known Pushbullet API operations
///
/// Each variant is one row of the path table in [`Endpoint::path`]. Only
/// `AccountInfo` and `Push` are called today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Devices,
    Chats,
    Channels,
    AccountInfo,
    Push,
    UploadRequest,
    Ephemerals,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Devices,
        Endpoint::Chats,
        Endpoint::Channels,
        Endpoint::AccountInfo,
        Endpoint::Push,
        Endpoint::UploadRequest,
        Endpoint::Ephemerals,
    ];

    /// Path relative to the API base URL
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Devices => "v2/devices",
            Endpoint::Chats => "v2/chats",
            Endpoint::Channels => "v2/channels",
            Endpoint::AccountInfo => "v2/users/me",
            Endpoint::Push => "v2/pushes",
            Endpoint::UploadRequest => "v2/upload-request",
            Endpoint::Ephemerals => "v2/ephemerals",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Pushbullet access token
///
/// Cheap to clone and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    /// Wrap a token, rejecting empty or whitespace-only input
    pub fn new(token: impl Into<String>) -> Result<Self, PushError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PushError::runtime("Pushbullet API key is empty"));
        }
        Ok(Self(Arc::from(token)))
    }

    /// The token exactly as supplied
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// A note push. Serializes as `{"type":"note","title":...,"body":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
}

impl NoteMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: "note".to_string(),
            title: title.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_in_field_order() {
        let note = NoteMessage::new("Hi", "there");
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"type":"note","title":"Hi","body":"there"}"#);
    }

    #[test]
    fn test_note_escapes_unicode_and_quotes() {
        let note = NoteMessage::new("Build \"main\"", "done ✓\nnext");
        let value: serde_json::Value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["title"], "Build \"main\"");
        assert_eq!(value["body"], "done ✓\nnext");
    }

    #[test]
    fn test_endpoint_paths_are_unique() {
        let mut paths: Vec<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Endpoint::ALL.len());
        assert!(paths.iter().all(|p| p.starts_with("v2/")));
    }

    #[test]
    fn test_active_endpoint_paths() {
        assert_eq!(Endpoint::Push.path(), "v2/pushes");
        assert_eq!(Endpoint::AccountInfo.path(), "v2/users/me");
    }

    #[test]
    fn test_access_token_rejects_empty() {
        assert!(AccessToken::new("").is_err());
        assert!(AccessToken::new("   ").is_err());
        assert_eq!(AccessToken::new("abc123").unwrap().expose(), "abc123");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("o.secret").unwrap();
        assert!(!format!("{token:?}").contains("secret"));
    }
}
