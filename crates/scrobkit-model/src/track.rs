// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Deserializer;
use serde::Deserialize;
use url::Url;

use crate::artist::{Artist, ArtistRef};
use crate::common::{ChartAttributes, Image, SearchAttributes, SearchMeta};
use crate::decode::{self, Scalar};

/// A track as returned by `track.getinfo`.
///
/// Duration and the play counters are routinely empty strings on
/// obscure tracks; they soften to zero. A non-empty counter that fails
/// to parse is corrupt and aborts the decode.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub url: Url,
    pub artist: Artist,
    pub mbid: Option<String>,
    /// Track length in milliseconds; zero when the service has none.
    pub duration: u32,
    pub playcount: f64,
    pub listeners: f64,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for Track {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            url: Url,
            artist: Artist,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            duration: Option<Scalar>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(default)]
            listeners: Option<Scalar>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("track '{}'", raw.name);

        Ok(Track {
            duration: decode::u32_or_zero(raw.duration, "duration", &entity)?,
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            listeners: decode::f64_or_zero(raw.listeners, "listeners", &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            url: raw.url,
            artist: raw.artist,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// A track entry in top-track and similar-track listings.
#[derive(Debug, Clone)]
pub struct TrackSummary {
    pub name: String,
    pub url: Url,
    pub artist: ArtistRef,
    pub mbid: Option<String>,
    pub playcount: f64,
    pub listeners: f64,
    /// Similarity score on `track.getsimilar` results.
    pub match_score: Option<f64>,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for TrackSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            url: Url,
            artist: ArtistRef,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(default)]
            listeners: Option<Scalar>,
            #[serde(rename = "match", default)]
            match_score: Option<Scalar>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("track '{}'", raw.name);

        Ok(TrackSummary {
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            listeners: decode::f64_or_zero(raw.listeners, "listeners", &entity)?,
            match_score: decode::opt_f64(raw.match_score, "match", &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            url: raw.url,
            artist: raw.artist,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// A track match from `track.search`; the artist credit is a bare name.
#[derive(Debug, Clone)]
pub struct TrackMatch {
    pub name: String,
    pub artist: String,
    pub url: Url,
    pub mbid: Option<String>,
    pub listeners: u64,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for TrackMatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            artist: String,
            url: Url,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            listeners: Option<Scalar>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("track '{}'", raw.name);

        Ok(TrackMatch {
            listeners: decode::u64_or_zero(raw.listeners, "listeners", &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// Envelope for `track.getinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub track: Track,
}

/// Envelope for `track.getsimilar`.
#[derive(Debug, Clone)]
pub struct SimilarTracks {
    pub tracks: Vec<TrackSummary>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for SimilarTracks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            similartracks: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<TrackSummary>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(SimilarTracks {
            tracks: envelope.similartracks.track,
            attributes: envelope.similartracks.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `track.search`.
#[derive(Debug, Clone)]
pub struct TrackSearch {
    pub tracks: Vec<TrackMatch>,
    pub attributes: Option<SearchAttributes>,
}

impl<'de> Deserialize<'de> for TrackSearch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            results: Results,
        }
        #[derive(Deserialize)]
        struct Results {
            trackmatches: Matches,
            #[serde(flatten)]
            meta: SearchMeta,
        }
        #[derive(Deserialize)]
        struct Matches {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<TrackMatch>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(TrackSearch {
            tracks: envelope.results.trackmatches.track,
            attributes: envelope.results.meta.into_attributes::<D::Error>()?,
        })
    }
}
