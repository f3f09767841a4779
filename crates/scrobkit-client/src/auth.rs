// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-session authentication.
//!
//! The session exchange is a signed POST of the account credentials.
//! Credentials are validated before any request leaves the process, so
//! a client missing its API key, secret, username or password fails
//! locally. Sessions are not cached: every authenticated operation
//! performs a fresh exchange, which keeps the client free of shared
//! mutable state at the cost of one extra round trip per call.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::client::LastfmClient;
use crate::endpoints::AuthEndpoint;
use crate::error::{LastfmError, Result};

/// An authenticated session granted by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Canonical account name, as the service spells it.
    pub name: String,
    /// Session key carried as `sk` on authenticated requests. Does not
    /// expire; the service revokes it server-side if at all.
    pub key: String,
    #[serde(default, deserialize_with = "scrobkit_model::decode::flag")]
    pub subscriber: bool,
}

/// The session response carries either a `session` object or an
/// `error`/`message` pair, never both.
#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    error: Option<i32>,
    #[serde(default)]
    message: Option<String>,
}

impl LastfmClient {
    /// Establish a session with the configured credentials.
    pub async fn authenticate(&self) -> Result<Session> {
        if self.api_key.is_empty() {
            return Err(LastfmError::MissingApiKey);
        }
        if self.secret.is_empty() {
            return Err(LastfmError::MissingSecret);
        }
        let username = match self.username.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => return Err(LastfmError::MissingUsername),
        };
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(LastfmError::MissingPassword),
        };

        self.mobile_session(username, password).await
    }

    /// Verify a specific username/password pair by performing the
    /// session exchange with it. Succeeds exactly when the credentials
    /// are valid.
    pub async fn check_login(&self, username: &str, password: &str) -> Result<Session> {
        if self.api_key.is_empty() {
            return Err(LastfmError::MissingApiKey);
        }
        if self.secret.is_empty() {
            return Err(LastfmError::MissingSecret);
        }
        if username.is_empty() {
            return Err(LastfmError::MissingUsername);
        }
        if password.is_empty() {
            return Err(LastfmError::MissingPassword);
        }

        self.mobile_session(username, password).await
    }

    async fn mobile_session(&self, username: &str, password: &str) -> Result<Session> {
        let mut params = BTreeMap::new();
        params.insert(
            "method".to_string(),
            AuthEndpoint::GetMobileSession.path().to_string(),
        );
        params.insert("username".to_string(), username.to_string());
        params.insert("password".to_string(), password.to_string());

        let body = self.signed_post(params).await?;
        let envelope: SessionEnvelope = serde_json::from_str(&body)?;

        if let (Some(code), Some(message)) = (envelope.error, envelope.message.clone()) {
            return Err(LastfmError::AuthenticationFailed { code, message });
        }

        // A structurally present session with an empty key is still a
        // refusal; treat it like one.
        match envelope.session.filter(|s| !s.key.is_empty()) {
            Some(session) => {
                debug!(target: "lastfm", "session established for {}", session.name);
                Ok(session)
            }
            None => Err(LastfmError::AuthenticationFailed {
                code: envelope.error.unwrap_or(-1),
                message: envelope
                    .message
                    .unwrap_or_else(|| "session key is missing".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_decodes_with_string_subscriber_flag() {
        let session: Session = serde_json::from_str(
            r#"{"name": "alice", "key": "d580d57f32848f5dcf574d1ce18d78b2", "subscriber": "1"}"#,
        )
        .unwrap();
        assert_eq!(session.name, "alice");
        assert!(session.subscriber);
    }

    #[test]
    fn missing_subscriber_flag_defaults_to_false() {
        let session: Session =
            serde_json::from_str(r#"{"name": "alice", "key": "abc"}"#).unwrap();
        assert!(!session.subscriber);
    }

    #[test]
    fn envelope_separates_session_from_error() {
        let failure: SessionEnvelope = serde_json::from_str(
            r#"{"error": 4, "message": "Invalid authentication token supplied"}"#,
        )
        .unwrap();
        assert!(failure.session.is_none());
        assert_eq!(failure.error, Some(4));

        let success: SessionEnvelope = serde_json::from_str(
            r#"{"session": {"name": "alice", "key": "abc", "subscriber": "0"}}"#,
        )
        .unwrap();
        assert!(success.error.is_none());
        assert_eq!(success.session.unwrap().key, "abc");
    }
}
