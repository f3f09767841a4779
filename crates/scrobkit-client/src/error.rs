// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LastfmError>;

#[derive(Debug, Error)]
pub enum LastfmError {
    /// No API key was configured; detected before any network call.
    #[error("API key is not configured")]
    MissingApiKey,

    /// No shared secret was configured; detected before any network call.
    #[error("shared secret is not configured")]
    MissingSecret,

    /// No username was configured for an authenticated operation.
    #[error("username is not configured")]
    MissingUsername,

    /// No password was configured for an authenticated operation.
    #[error("password is not configured")]
    MissingPassword,

    /// The service rejected the credential exchange, or reported
    /// success without a usable session key.
    #[error("authentication failed (code {code}): {message}")]
    AuthenticationFailed { code: i32, message: String },

    /// The service reported a domain error in its envelope. Preserved
    /// verbatim: the remote codes distinguish conditions (bad method,
    /// suspended key, rate limit) that the caller may branch on.
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("failed to construct request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
