// SPDX-License-Identifier: GPL-3.0-or-later

//! Weekly chart models.
//!
//! The weekly endpoints slice a listener's (or a tag's) history into
//! fixed windows: `getweeklychartlist` enumerates the windows the
//! service has data for, and the album/artist/track charts rank plays
//! inside one window. Chart ranks and window bounds are identity for
//! these payloads and decode strictly; play counters soften like
//! everywhere else.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use url::Url;

use crate::common::Image;
use crate::decode::{self, Scalar};

fn epoch<E: de::Error>(value: Scalar, field: &str, entity: &str) -> Result<DateTime<Utc>, E> {
    let bad = || E::custom(format!("{field} is not a valid number for {entity}"));
    let seconds = match value {
        Scalar::Text(s) => s.parse::<i64>().map_err(|_| bad())?,
        Scalar::Int(n) => n,
        Scalar::Float(_) => return Err(bad()),
    };
    Utc.timestamp_opt(seconds, 0).single().ok_or_else(bad)
}

fn rank<E: de::Error>(attr: Option<RankAttr>, entity: &str) -> Result<u32, E> {
    let bad = || E::custom(format!("rank is not a valid number for {entity}"));
    let value = attr
        .and_then(|a| a.rank)
        .ok_or_else(|| E::custom(format!("rank is missing for {entity}")))?;
    match value {
        Scalar::Text(s) => s.parse().map_err(|_| bad()),
        Scalar::Int(n) => u32::try_from(n).map_err(|_| bad()),
        Scalar::Float(_) => Err(bad()),
    }
}

#[derive(Deserialize)]
struct RankAttr {
    #[serde(default)]
    rank: Option<Scalar>,
}

/// One chart window from `user.getweeklychartlist` or
/// `tag.getweeklychartlist`.
#[derive(Debug, Clone)]
pub struct ChartSpan {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for ChartSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            from: Scalar,
            to: Scalar,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(ChartSpan {
            from: epoch(raw.from, "from", "weekly chart list")?,
            to: epoch(raw.to, "to", "weekly chart list")?,
        })
    }
}

/// Envelope for the weekly chart lists. The user and tag variants
/// differ only in their `@attr` block, which carries no chart data.
#[derive(Debug, Clone)]
pub struct WeeklyChartList {
    pub spans: Vec<ChartSpan>,
}

impl<'de> Deserialize<'de> for WeeklyChartList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            weeklychartlist: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            chart: Vec<ChartSpan>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(WeeklyChartList {
            spans: envelope.weeklychartlist.chart,
        })
    }
}

/// `@attr` on weekly charts: whose window, and its bounds.
#[derive(Debug, Clone)]
pub struct WeeklyChartAttributes {
    pub user: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for WeeklyChartAttributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            user: String,
            from: Scalar,
            to: Scalar,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("user '{}'", raw.user);
        Ok(WeeklyChartAttributes {
            from: epoch(raw.from, "from", &entity)?,
            to: epoch(raw.to, "to", &entity)?,
            user: raw.user,
        })
    }
}

/// Artist credit on weekly chart entries. The service keys the name
/// under `#text`; some payloads spell it `name` instead.
#[derive(Debug, Clone)]
pub struct ChartArtistRef {
    pub name: String,
    pub mbid: Option<String>,
    pub url: Option<Url>,
}

impl<'de> Deserialize<'de> for ChartArtistRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            name: Option<String>,
            #[serde(rename = "#text", default)]
            text: Option<String>,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            url: Option<Url>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let name = raw
            .name
            .or(raw.text)
            .ok_or_else(|| de::Error::custom("artist credit is missing a name"))?;
        Ok(ChartArtistRef {
            name,
            mbid: decode::non_empty(raw.mbid),
            url: raw.url,
        })
    }
}

/// An album entry from `user.getweeklyalbumchart`.
#[derive(Debug, Clone)]
pub struct WeeklyAlbum {
    pub name: String,
    pub artist: ChartArtistRef,
    pub mbid: Option<String>,
    pub url: Url,
    pub playcount: f64,
    pub rank: u32,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for WeeklyAlbum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            artist: ChartArtistRef,
            url: Url,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(rename = "@attr", default)]
            attr: Option<RankAttr>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("album '{}'", raw.name);

        Ok(WeeklyAlbum {
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            rank: rank(raw.attr, &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// An artist entry from `user.getweeklyartistchart`.
#[derive(Debug, Clone)]
pub struct WeeklyArtist {
    pub name: String,
    pub mbid: Option<String>,
    pub url: Url,
    pub playcount: f64,
    pub rank: u32,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for WeeklyArtist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            url: Url,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(rename = "@attr", default)]
            attr: Option<RankAttr>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("artist '{}'", raw.name);

        Ok(WeeklyArtist {
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            rank: rank(raw.attr, &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// A track entry from `user.getweeklytrackchart`.
#[derive(Debug, Clone)]
pub struct WeeklyTrack {
    pub name: String,
    pub artist: ChartArtistRef,
    pub mbid: Option<String>,
    pub url: Url,
    pub playcount: f64,
    pub rank: u32,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for WeeklyTrack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            artist: ChartArtistRef,
            url: Url,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(rename = "@attr", default)]
            attr: Option<RankAttr>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("track '{}'", raw.name);

        Ok(WeeklyTrack {
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            rank: rank(raw.attr, &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// Envelope for `user.getweeklyalbumchart`.
#[derive(Debug, Clone)]
pub struct WeeklyAlbumChart {
    pub albums: Vec<WeeklyAlbum>,
    pub attributes: WeeklyChartAttributes,
}

impl<'de> Deserialize<'de> for WeeklyAlbumChart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            weeklyalbumchart: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            album: Vec<WeeklyAlbum>,
            #[serde(rename = "@attr")]
            attr: WeeklyChartAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(WeeklyAlbumChart {
            albums: envelope.weeklyalbumchart.album,
            attributes: envelope.weeklyalbumchart.attr,
        })
    }
}

/// Envelope for `user.getweeklyartistchart`.
#[derive(Debug, Clone)]
pub struct WeeklyArtistChart {
    pub artists: Vec<WeeklyArtist>,
    pub attributes: WeeklyChartAttributes,
}

impl<'de> Deserialize<'de> for WeeklyArtistChart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            weeklyartistchart: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            artist: Vec<WeeklyArtist>,
            #[serde(rename = "@attr")]
            attr: WeeklyChartAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(WeeklyArtistChart {
            artists: envelope.weeklyartistchart.artist,
            attributes: envelope.weeklyartistchart.attr,
        })
    }
}

/// Envelope for `user.getweeklytrackchart`.
#[derive(Debug, Clone)]
pub struct WeeklyTrackChart {
    pub tracks: Vec<WeeklyTrack>,
    pub attributes: WeeklyChartAttributes,
}

impl<'de> Deserialize<'de> for WeeklyTrackChart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            weeklytrackchart: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<WeeklyTrack>,
            #[serde(rename = "@attr")]
            attr: WeeklyChartAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(WeeklyTrackChart {
            tracks: envelope.weeklytrackchart.track,
            attributes: envelope.weeklytrackchart.attr,
        })
    }
}
