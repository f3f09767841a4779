// SPDX-License-Identifier: GPL-3.0-or-later

//! Listening-history writes.
//!
//! Every write is a signed POST carrying the session key. The
//! convenience methods establish a fresh session per call; the
//! `*_with_session` variants skip that exchange for callers who manage
//! a [`Session`] themselves, e.g. when draining a scrobble queue.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use crate::auth::Session;
use crate::client::LastfmClient;
use crate::endpoints::ScrobbleEndpoint;
use crate::error::Result;

impl LastfmClient {
    /// Record a completed listen, stamped with the current time.
    pub async fn scrobble(&self, track: &str, artist: &str) -> Result<()> {
        let session = self.authenticate().await?;
        self.scrobble_with_session(&session, track, artist).await
    }

    /// Record a completed listen against an existing session.
    pub async fn scrobble_with_session(
        &self,
        session: &Session,
        track: &str,
        artist: &str,
    ) -> Result<()> {
        let timestamp = Utc::now().timestamp();
        self.signed_write(ScrobbleEndpoint::Scrobble, session, track, artist, Some(timestamp))
            .await
    }

    /// Announce the track the listener is hearing right now. The
    /// service expires the announcement on its own; there is no
    /// corresponding clear call.
    pub async fn update_now_playing(&self, track: &str, artist: &str) -> Result<()> {
        let session = self.authenticate().await?;
        self.update_now_playing_with_session(&session, track, artist)
            .await
    }

    /// Announce the currently playing track against an existing session.
    pub async fn update_now_playing_with_session(
        &self,
        session: &Session,
        track: &str,
        artist: &str,
    ) -> Result<()> {
        self.signed_write(ScrobbleEndpoint::UpdateNowPlaying, session, track, artist, None)
            .await
    }

    /// Mark a track as loved on the listener's profile.
    pub async fn love(&self, track: &str, artist: &str) -> Result<()> {
        let session = self.authenticate().await?;
        self.love_with_session(&session, track, artist).await
    }

    /// Mark a track as loved against an existing session.
    pub async fn love_with_session(
        &self,
        session: &Session,
        track: &str,
        artist: &str,
    ) -> Result<()> {
        self.signed_write(ScrobbleEndpoint::Love, session, track, artist, None)
            .await
    }

    async fn signed_write(
        &self,
        endpoint: ScrobbleEndpoint,
        session: &Session,
        track: &str,
        artist: &str,
        timestamp: Option<i64>,
    ) -> Result<()> {
        let mut params = BTreeMap::new();
        params.insert("method".to_string(), endpoint.path().to_string());
        params.insert("track".to_string(), track.to_string());
        params.insert("artist".to_string(), artist.to_string());
        params.insert("sk".to_string(), session.key.clone());
        if let Some(timestamp) = timestamp {
            params.insert("timestamp".to_string(), timestamp.to_string());
        }

        let body = self.signed_post(params).await?;

        // Writes succeed with an acknowledgement body the caller has no
        // use for; only the error envelope matters. An invalidated
        // session key surfaces here as a service error.
        crate::client::parse_envelope::<serde_json::Value>(&body)?;
        debug!(target: "lastfm", "{} accepted for {} - {}", endpoint.path(), artist, track);
        Ok(())
    }
}
