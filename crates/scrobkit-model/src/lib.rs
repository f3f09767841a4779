// SPDX-License-Identifier: GPL-3.0-or-later

//! Entity models for the Last.fm web service.
//!
//! The wire format is loosely typed: numbers arrive as strings, flags
//! arrive as `"0"`/`"1"`, single results replace one-element arrays,
//! and optional containers are sometimes omitted entirely. The types in
//! this crate absorb those quirks with one uniform policy (see the
//! [`decode`] module) instead of per-field improvisation: informational
//! counters soft-default when absent or empty, while identity fields
//! and genuinely corrupt values abort the decode with a message naming
//! the offending field and entity.

pub mod album;
pub mod artist;
pub mod chart;
pub mod common;
pub mod decode;
pub mod tag;
pub mod track;
pub mod user;
pub mod weekly;

pub use album::{Album, AlbumMatch, AlbumResponse, AlbumSearch, AlbumSummary, TagAlbums};
pub use artist::{
    Artist, ArtistRef, ArtistResponse, ArtistSearch, ArtistTopAlbums, ArtistTopTracks,
    SimilarArtists,
};
pub use chart::{ChartArtists, ChartTags, ChartTracks, GeoArtists, GeoTracks};
pub use common::{ChartAttributes, Image, SearchAttributes, UserAttributes, Wiki};
pub use tag::{SimilarTags, Tag, TagList, TagResponse, TopTags};
pub use track::{SimilarTracks, Track, TrackMatch, TrackResponse, TrackSearch, TrackSummary};
pub use user::{
    Friend, Friends, LovedTrack, LovedTracks, NameRef, RecentTrack, RecentTracks, UserInfo,
    UserTopAlbums, UserTopArtists, UserTopTracks,
};
pub use weekly::{
    ChartArtistRef, ChartSpan, WeeklyAlbum, WeeklyAlbumChart, WeeklyArtist, WeeklyArtistChart,
    WeeklyChartAttributes, WeeklyChartList, WeeklyTrack, WeeklyTrackChart,
};
