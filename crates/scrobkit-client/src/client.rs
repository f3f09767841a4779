// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::endpoints::{
    AlbumEndpoint, ArtistEndpoint, ChartEndpoint, GeoEndpoint, TagEndpoint, TrackEndpoint,
    UserEndpoint,
};
use crate::error::{LastfmError, Result};
use crate::signature;
use scrobkit_model::{
    AlbumResponse, AlbumSearch, ArtistResponse, ArtistSearch, ArtistTopAlbums, ArtistTopTracks,
    ChartArtists, ChartTags, ChartTracks, Friends, GeoArtists, GeoTracks, LovedTracks,
    RecentTracks, SimilarArtists, SimilarTags, SimilarTracks, TagAlbums, TagResponse, TopTags,
    TrackResponse, TrackSearch, UserInfo, UserTopAlbums, UserTopArtists, UserTopTracks,
    WeeklyAlbumChart, WeeklyArtistChart, WeeklyChartList, WeeklyTrackChart,
};

const LASTFM_API_BASE: &str = "https://ws.audioscrobbler.com/2.0/";
const USER_AGENT: &str = concat!(
    "Scrobkit/",
    env!("CARGO_PKG_VERSION"),
    " ( https://github.com/scrobkit/scrobkit )"
);

/// Last.fm web service client.
///
/// Catalogue reads need only an API key. User reads and listening
/// writes additionally need the account credentials configured so the
/// client can establish a session; see [`crate::auth`].
#[derive(Debug, Clone)]
pub struct LastfmClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) secret: String,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
}

impl LastfmClient {
    /// Create a read-only client from an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> LastfmClientBuilder {
        LastfmClientBuilder::default()
    }

    // --- artist ---

    /// Fetch artist metadata by name.
    pub async fn artist_info(&self, artist: &str) -> Result<ArtistResponse> {
        self.get_json(ArtistEndpoint::GetInfo.path(), &[("artist", artist.to_string())])
            .await
    }

    /// Fetch artists similar to the named one.
    pub async fn similar_artists(&self, artist: &str, limit: u32) -> Result<SimilarArtists> {
        self.get_json(
            ArtistEndpoint::GetSimilar.path(),
            &[("artist", artist.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Fetch an artist's most popular albums.
    pub async fn artist_top_albums(&self, artist: &str, limit: u32) -> Result<ArtistTopAlbums> {
        self.get_json(
            ArtistEndpoint::GetTopAlbums.path(),
            &[("artist", artist.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Fetch an artist's most popular tracks.
    pub async fn artist_top_tracks(&self, artist: &str, limit: u32) -> Result<ArtistTopTracks> {
        self.get_json(
            ArtistEndpoint::GetTopTracks.path(),
            &[("artist", artist.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Search the artist catalogue.
    pub async fn search_artists(&self, query: &str, limit: u32, page: u32) -> Result<ArtistSearch> {
        self.get_json(
            ArtistEndpoint::Search.path(),
            &[
                ("artist", query.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    // --- album ---

    /// Fetch album metadata by artist and title.
    pub async fn album_info(&self, artist: &str, album: &str) -> Result<AlbumResponse> {
        self.get_json(
            AlbumEndpoint::GetInfo.path(),
            &[("artist", artist.to_string()), ("album", album.to_string())],
        )
        .await
    }

    /// Fetch the tags most applied to an album.
    pub async fn album_top_tags(&self, artist: &str, album: &str) -> Result<TopTags> {
        self.get_json(
            AlbumEndpoint::GetTopTags.path(),
            &[("artist", artist.to_string()), ("album", album.to_string())],
        )
        .await
    }

    /// Search the album catalogue.
    pub async fn search_albums(&self, query: &str, limit: u32, page: u32) -> Result<AlbumSearch> {
        self.get_json(
            AlbumEndpoint::Search.path(),
            &[
                ("album", query.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    // --- track ---

    /// Fetch track metadata by artist and title.
    pub async fn track_info(&self, artist: &str, track: &str) -> Result<TrackResponse> {
        self.get_json(
            TrackEndpoint::GetInfo.path(),
            &[("artist", artist.to_string()), ("track", track.to_string())],
        )
        .await
    }

    /// Fetch tracks similar to the named one.
    pub async fn similar_tracks(
        &self,
        artist: &str,
        track: &str,
        limit: u32,
    ) -> Result<SimilarTracks> {
        self.get_json(
            TrackEndpoint::GetSimilar.path(),
            &[
                ("artist", artist.to_string()),
                ("track", track.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Fetch the tags most applied to a track.
    pub async fn track_top_tags(&self, artist: &str, track: &str) -> Result<TopTags> {
        self.get_json(
            TrackEndpoint::GetTopTags.path(),
            &[("artist", artist.to_string()), ("track", track.to_string())],
        )
        .await
    }

    /// Search the track catalogue.
    pub async fn search_tracks(&self, query: &str, limit: u32, page: u32) -> Result<TrackSearch> {
        self.get_json(
            TrackEndpoint::Search.path(),
            &[
                ("track", query.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    // --- tag ---

    /// Fetch metadata and the wiki entry for a tag.
    pub async fn tag_info(&self, tag: &str) -> Result<TagResponse> {
        self.get_json(TagEndpoint::GetInfo.path(), &[("tag", tag.to_string())])
            .await
    }

    /// Fetch tags similar to the named one.
    pub async fn similar_tags(&self, tag: &str) -> Result<SimilarTags> {
        self.get_json(TagEndpoint::GetSimilar.path(), &[("tag", tag.to_string())])
            .await
    }

    /// Fetch the artists most tagged with a tag.
    pub async fn tag_top_artists(&self, tag: &str, limit: u32, page: u32) -> Result<GeoArtists> {
        self.get_json(
            TagEndpoint::GetTopArtists.path(),
            &[
                ("tag", tag.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch the albums most tagged with a tag.
    pub async fn tag_top_albums(&self, tag: &str, limit: u32, page: u32) -> Result<TagAlbums> {
        self.get_json(
            TagEndpoint::GetTopAlbums.path(),
            &[
                ("tag", tag.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch the tracks most tagged with a tag.
    pub async fn tag_top_tracks(&self, tag: &str, limit: u32, page: u32) -> Result<ChartTracks> {
        self.get_json(
            TagEndpoint::GetTopTracks.path(),
            &[
                ("tag", tag.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch the globally most used tags.
    pub async fn top_tags(&self) -> Result<TopTags> {
        self.get_json(TagEndpoint::GetTopTags.path(), &[]).await
    }

    /// Fetch the weekly chart windows available for a tag.
    pub async fn tag_weekly_chart_list(&self, tag: &str) -> Result<WeeklyChartList> {
        self.get_json(
            TagEndpoint::GetWeeklyChartList.path(),
            &[("tag", tag.to_string())],
        )
        .await
    }

    // --- chart ---

    /// Fetch the global artist chart.
    pub async fn chart_top_artists(&self, limit: u32, page: u32) -> Result<ChartArtists> {
        self.get_json(
            ChartEndpoint::GetTopArtists.path(),
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Fetch the global tag chart.
    pub async fn chart_top_tags(&self, limit: u32, page: u32) -> Result<ChartTags> {
        self.get_json(
            ChartEndpoint::GetTopTags.path(),
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Fetch the global track chart.
    pub async fn chart_top_tracks(&self, limit: u32, page: u32) -> Result<ChartTracks> {
        self.get_json(
            ChartEndpoint::GetTopTracks.path(),
            &[("limit", limit.to_string()), ("page", page.to_string())],
        )
        .await
    }

    // --- geo ---

    /// Fetch the most listened artists for an ISO 3166-1 country name.
    pub async fn geo_top_artists(&self, country: &str, limit: u32, page: u32) -> Result<GeoArtists> {
        self.get_json(
            GeoEndpoint::GetTopArtists.path(),
            &[
                ("country", country.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch the most listened tracks for an ISO 3166-1 country name.
    pub async fn geo_top_tracks(&self, country: &str, limit: u32, page: u32) -> Result<GeoTracks> {
        self.get_json(
            GeoEndpoint::GetTopTracks.path(),
            &[
                ("country", country.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    // --- user ---
    // Profile reads establish a session first and carry its key, so
    // they need the full credential set configured.

    /// Fetch a listener's profile.
    pub async fn user_info(&self, user: &str) -> Result<UserInfo> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetInfo.path(),
            &[("user", user.to_string()), ("sk", session.key)],
        )
        .await
    }

    /// Fetch a listener's friends list.
    pub async fn user_friends(&self, user: &str, limit: u32, page: u32) -> Result<Friends> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetFriends.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the tracks a listener has loved.
    pub async fn user_loved_tracks(&self, user: &str, limit: u32, page: u32) -> Result<LovedTracks> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetLovedTracks.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch a listener's recent listening history, newest first.
    pub async fn user_recent_tracks(
        &self,
        user: &str,
        limit: u32,
        page: u32,
    ) -> Result<RecentTracks> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetRecentTracks.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the artists a listener has played most.
    pub async fn user_top_artists(
        &self,
        user: &str,
        limit: u32,
        page: u32,
    ) -> Result<UserTopArtists> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetTopArtists.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the albums a listener has played most.
    pub async fn user_top_albums(
        &self,
        user: &str,
        limit: u32,
        page: u32,
    ) -> Result<UserTopAlbums> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetTopAlbums.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the tracks a listener has played most.
    pub async fn user_top_tracks(
        &self,
        user: &str,
        limit: u32,
        page: u32,
    ) -> Result<UserTopTracks> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetTopTracks.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the tags a listener applies most.
    pub async fn user_top_tags(&self, user: &str, limit: u32) -> Result<TopTags> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetTopTags.path(),
            &[
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch the weekly chart windows available for a listener.
    pub async fn user_weekly_chart_list(&self, user: &str) -> Result<WeeklyChartList> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetWeeklyChartList.path(),
            &[("user", user.to_string()), ("sk", session.key)],
        )
        .await
    }

    /// Fetch a listener's weekly album chart for a window. Bounds are
    /// Unix timestamps from [`Self::user_weekly_chart_list`].
    pub async fn user_weekly_album_chart(
        &self,
        user: &str,
        from: i64,
        to: i64,
    ) -> Result<WeeklyAlbumChart> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetWeeklyAlbumChart.path(),
            &[
                ("user", user.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch a listener's weekly artist chart for a window.
    pub async fn user_weekly_artist_chart(
        &self,
        user: &str,
        from: i64,
        to: i64,
    ) -> Result<WeeklyArtistChart> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetWeeklyArtistChart.path(),
            &[
                ("user", user.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    /// Fetch a listener's weekly track chart for a window.
    pub async fn user_weekly_track_chart(
        &self,
        user: &str,
        from: i64,
        to: i64,
    ) -> Result<WeeklyTrackChart> {
        let session = self.authenticate().await?;
        self.get_json(
            UserEndpoint::GetWeeklyTrackChart.path(),
            &[
                ("user", user.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("sk", session.key),
            ],
        )
        .await
    }

    // --- transport ---

    /// GET a read endpoint and decode its JSON envelope.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("method", method)
            .append_pair("api_key", &self.api_key)
            .append_pair("format", "json");
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        debug!(target: "lastfm", "GET {}", method);
        let response = self
            .http
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let body = response.text().await?;
        trace!(target: "lastfm", "response body: {}", body);
        parse_envelope(&body)
    }

    /// POST a signed form. Inserts `api_key`, computes `api_sig` over
    /// the full parameter set, then appends `format=json` outside the
    /// signature. Returns the raw body for the caller to decode.
    pub(crate) async fn signed_post(&self, mut params: BTreeMap<String, String>) -> Result<String> {
        params.insert("api_key".to_string(), self.api_key.clone());
        let api_sig = signature::sign(&params, &self.secret);
        params.insert("api_sig".to_string(), api_sig);
        params.insert("format".to_string(), "json".to_string());

        debug!(
            target: "lastfm",
            "POST {}",
            params.get("method").map(String::as_str).unwrap_or("?")
        );
        let response = self
            .http
            .post(&self.base_url)
            .header("User-Agent", USER_AGENT)
            .form(&params)
            .send()
            .await?;

        let body = response.text().await?;
        trace!(target: "lastfm", "response body: {}", body);
        Ok(body)
    }
}

/// Service errors come back as a JSON envelope, often with HTTP 200,
/// so the error check runs on the body before any model decoding.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: i32,
    message: String,
}

pub(crate) fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(LastfmError::Api {
            code: envelope.error,
            message: envelope.message,
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Builder for configuring a Last.fm client.
#[derive(Debug)]
pub struct LastfmClientBuilder {
    base_url: String,
    api_key: String,
    secret: String,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
}

impl Default for LastfmClientBuilder {
    fn default() -> Self {
        Self {
            base_url: LASTFM_API_BASE.to_string(),
            api_key: String::new(),
            secret: String::new(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LastfmClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key identifying the application.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the shared secret used to sign write requests.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Set the account credentials used to establish sessions.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the Last.fm client.
    pub fn build(self) -> Result<LastfmClient> {
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(LastfmClient {
            http,
            base_url: self.base_url,
            api_key: self.api_key,
            secret: self.secret,
            username: self.username,
            password: self.password,
        })
    }
}
