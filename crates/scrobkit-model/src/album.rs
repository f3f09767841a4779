// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Deserializer;
use serde::Deserialize;
use url::Url;

use crate::artist::ArtistRef;
use crate::common::{Image, SearchAttributes, SearchMeta, Wiki};
use crate::decode::{self, Scalar};
use crate::tag::TagList;

/// An album as returned by `album.getinfo`.
///
/// The info page's play counters are load-bearing (callers chart and
/// rank on them), so unlike the embedded summaries they do not soften:
/// a missing or unparseable counter fails the decode.
#[derive(Debug, Clone)]
pub struct Album {
    pub name: String,
    /// Artist credit; the info payload carries it as a plain name.
    pub artist: String,
    pub mbid: Option<String>,
    pub url: Url,
    pub playcount: f64,
    pub listeners: f64,
    pub image: Vec<Image>,
    pub tags: Vec<crate::tag::Tag>,
    pub wiki: Option<Wiki>,
}

impl<'de> Deserialize<'de> for Album {
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
            playcount: Scalar,
            listeners: Scalar,
            #[serde(default)]
            image: Option<Vec<Image>>,
            #[serde(default)]
            tags: Option<TagList>,
            #[serde(default)]
            wiki: Option<Wiki>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("album '{}'", raw.name);

        Ok(Album {
            playcount: decode::strict_f64(raw.playcount, "playcount", &entity)?,
            listeners: decode::strict_f64(raw.listeners, "listeners", &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
            tags: raw.tags.map(|t| t.tag).unwrap_or_default(),
            wiki: raw.wiki,
        })
    }
}

/// An album entry in `artist.gettopalbums` listings. Counters here are
/// informational and soften to zero when absent or empty.
#[derive(Debug, Clone)]
pub struct AlbumSummary {
    pub name: String,
    pub artist: ArtistRef,
    pub mbid: Option<String>,
    pub url: Url,
    pub playcount: f64,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for AlbumSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            artist: ArtistRef,
            url: Url,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("album '{}'", raw.name);

        Ok(AlbumSummary {
            playcount: decode::f64_or_zero(raw.playcount, "playcount", &entity)?,
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// An album match from `album.search`; the artist credit is a bare
/// name on search results.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumMatch {
    pub name: String,
    pub artist: String,
    pub url: Url,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub image: Vec<Image>,
}

/// Envelope for `album.getinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumResponse {
    pub album: Album,
}

/// Envelope for `album.search`.
#[derive(Debug, Clone)]
pub struct AlbumSearch {
    pub albums: Vec<AlbumMatch>,
    pub attributes: Option<SearchAttributes>,
}

impl<'de> Deserialize<'de> for AlbumSearch {
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
            albummatches: Matches,
            #[serde(flatten)]
            meta: SearchMeta,
        }
        #[derive(Deserialize)]
        struct Matches {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            album: Vec<AlbumMatch>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(AlbumSearch {
            albums: envelope.results.albummatches.album,
            attributes: envelope.results.meta.into_attributes::<D::Error>()?,
        })
    }
}

/// Envelope for `tag.gettopalbums`, which nests under `albums` rather
/// than the `topalbums` root the artist listing uses.
#[derive(Debug, Clone)]
pub struct TagAlbums {
    pub albums: Vec<AlbumSummary>,
    pub attributes: crate::common::ChartAttributes,
}

impl<'de> Deserialize<'de> for TagAlbums {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            albums: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            album: Vec<AlbumSummary>,
            #[serde(rename = "@attr", default)]
            attr: Option<crate::common::ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(TagAlbums {
            albums: envelope.albums.album,
            attributes: envelope.albums.attr.unwrap_or_default(),
        })
    }
}
