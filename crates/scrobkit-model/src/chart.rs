// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Deserializer;
use serde::Deserialize;

use crate::artist::Artist;
use crate::common::ChartAttributes;
use crate::tag::Tag;
use crate::track::TrackSummary;

/// Envelope for `chart.gettopartists` and `geo.gettopartists` (the geo
/// variant nests under `topartists` instead of `artists`).
#[derive(Debug, Clone)]
pub struct ChartArtists {
    pub artists: Vec<Artist>,
    pub attributes: ChartAttributes,
}

#[derive(Deserialize)]
struct ArtistBlock {
    #[serde(default, deserialize_with = "crate::decode::one_or_many")]
    artist: Vec<Artist>,
    #[serde(rename = "@attr", default)]
    attr: Option<ChartAttributes>,
}

impl<'de> Deserialize<'de> for ChartArtists {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            artists: ArtistBlock,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ChartArtists {
            artists: envelope.artists.artist,
            attributes: envelope.artists.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `geo.gettopartists`.
#[derive(Debug, Clone)]
pub struct GeoArtists {
    pub artists: Vec<Artist>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for GeoArtists {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            topartists: ArtistBlock,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(GeoArtists {
            artists: envelope.topartists.artist,
            attributes: envelope.topartists.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `chart.gettoptags`.
#[derive(Debug, Clone)]
pub struct ChartTags {
    pub tags: Vec<Tag>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for ChartTags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            tags: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            tag: Vec<Tag>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ChartTags {
            tags: envelope.tags.tag,
            attributes: envelope.tags.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `chart.gettoptracks` and `geo.gettoptracks` (both nest
/// under `tracks`).
#[derive(Debug, Clone)]
pub struct ChartTracks {
    pub tracks: Vec<TrackSummary>,
    pub attributes: ChartAttributes,
}

/// `geo.gettoptracks` shares the chart envelope shape.
pub type GeoTracks = ChartTracks;

impl<'de> Deserialize<'de> for ChartTracks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            tracks: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<TrackSummary>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ChartTracks {
            tracks: envelope.tracks.track,
            attributes: envelope.tracks.attr.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_artists_decode_with_attributes() {
        let chart: ChartArtists = serde_json::from_str(
            r#"{"artists": {
                "artist": [{"name": "Muse", "url": "https://www.last.fm/music/Muse"}],
                "@attr": {"page": "1", "perPage": "50", "totalPages": "200", "total": "10000"}
            }}"#,
        )
        .unwrap();
        assert_eq!(chart.artists.len(), 1);
        assert_eq!(chart.attributes.total_pages, 200);
    }

    #[test]
    fn geo_artists_use_the_topartists_root() {
        let geo: GeoArtists = serde_json::from_str(
            r#"{"topartists": {"artist": [{"name": "Muse", "url": "https://www.last.fm/music/Muse"}]}}"#,
        )
        .unwrap();
        assert_eq!(geo.artists.len(), 1);
        assert_eq!(geo.attributes.page, 0);
    }
}
