// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Deserializer;
use serde::Deserialize;
use url::Url;

use crate::album::AlbumSummary;
use crate::common::{ChartAttributes, Image, SearchAttributes, SearchMeta};
use crate::decode::{self, Scalar};
use crate::track::TrackSummary;

/// An artist as returned by `artist.getinfo` and embedded in track and
/// chart payloads.
///
/// Name and page URL are identity and decode strictly. The play
/// counters are frequently absent or empty on embedded artists, so
/// they stay optional; a counter that is *present but unparseable* is
/// corrupt and fails the decode.
#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub url: Url,
    /// MusicBrainz ID, when the service knows one.
    pub mbid: Option<String>,
    pub playcount: Option<f64>,
    pub listeners: Option<f64>,
    pub streamable: Option<bool>,
    pub image: Option<Vec<Image>>,
}

impl<'de> Deserialize<'de> for Artist {
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
            #[serde(default)]
            listeners: Option<Scalar>,
            #[serde(default)]
            streamable: Option<Scalar>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let entity = format!("artist '{}'", raw.name);

        Ok(Artist {
            playcount: decode::opt_f64(raw.playcount, "playcount", &entity)?,
            listeners: decode::opt_f64(raw.listeners, "listeners", &entity)?,
            streamable: raw.streamable.map(|s| s.truthy()),
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            url: raw.url,
            image: raw.image,
        })
    }
}

/// Minimal artist credit embedded in albums and track listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
    pub url: Url,
    #[serde(default, deserialize_with = "empty_mbid")]
    pub mbid: Option<String>,
}

fn empty_mbid<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(decode::non_empty(Option::<String>::deserialize(deserializer)?))
}

/// Envelope for `artist.getinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistResponse {
    pub artist: Artist,
}

/// Envelope for `artist.getsimilar`.
#[derive(Debug, Clone)]
pub struct SimilarArtists {
    pub artists: Vec<Artist>,
}

impl<'de> Deserialize<'de> for SimilarArtists {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            similarartists: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            artist: Vec<Artist>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(SimilarArtists {
            artists: envelope.similarartists.artist,
        })
    }
}

/// Envelope for `artist.gettopalbums`.
#[derive(Debug, Clone)]
pub struct ArtistTopAlbums {
    pub albums: Vec<AlbumSummary>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for ArtistTopAlbums {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            topalbums: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            album: Vec<AlbumSummary>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ArtistTopAlbums {
            albums: envelope.topalbums.album,
            attributes: envelope.topalbums.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `artist.gettoptracks`.
#[derive(Debug, Clone)]
pub struct ArtistTopTracks {
    pub tracks: Vec<TrackSummary>,
    pub attributes: ChartAttributes,
}

impl<'de> Deserialize<'de> for ArtistTopTracks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            toptracks: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<TrackSummary>,
            #[serde(rename = "@attr", default)]
            attr: Option<ChartAttributes>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ArtistTopTracks {
            tracks: envelope.toptracks.track,
            attributes: envelope.toptracks.attr.unwrap_or_default(),
        })
    }
}

/// Envelope for `artist.search`.
#[derive(Debug, Clone)]
pub struct ArtistSearch {
    pub artists: Vec<Artist>,
    pub attributes: Option<SearchAttributes>,
}

impl<'de> Deserialize<'de> for ArtistSearch {
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
            artistmatches: Matches,
            #[serde(flatten)]
            meta: SearchMeta,
        }
        #[derive(Deserialize)]
        struct Matches {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            artist: Vec<Artist>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(ArtistSearch {
            artists: envelope.results.artistmatches.artist,
            attributes: envelope.results.meta.into_attributes::<D::Error>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_decodes_string_counters() {
        let artist: Artist = serde_json::from_str(
            r##"{
                "name": "Muse",
                "url": "https://www.last.fm/music/Muse",
                "mbid": "9c9f1380-2516-4fc9-a3e6-f9f61941d090",
                "playcount": "458172839",
                "listeners": "4128392",
                "streamable": "0",
                "image": [{"size": "small", "#text": "https://images.example/muse.png"}]
            }"##,
        )
        .unwrap();

        assert_eq!(artist.playcount, Some(458172839.0));
        assert_eq!(artist.listeners, Some(4128392.0));
        assert_eq!(artist.streamable, Some(false));
        assert_eq!(artist.image.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn artist_allows_absent_counters() {
        let artist: Artist = serde_json::from_str(
            r#"{"name": "Muse", "url": "https://www.last.fm/music/Muse"}"#,
        )
        .unwrap();
        assert_eq!(artist.playcount, None);
        assert_eq!(artist.listeners, None);
        assert_eq!(artist.streamable, None);
        assert_eq!(artist.mbid, None);
    }

    #[test]
    fn artist_rejects_garbage_playcount() {
        let result = serde_json::from_str::<Artist>(
            r#"{"name": "Muse", "url": "https://www.last.fm/music/Muse", "playcount": "not-a-number"}"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(
            message.contains("playcount is not a valid number for artist 'Muse'"),
            "{message}"
        );
    }

    #[test]
    fn artist_collapses_empty_mbid() {
        let artist: Artist = serde_json::from_str(
            r#"{"name": "Muse", "url": "https://www.last.fm/music/Muse", "mbid": ""}"#,
        )
        .unwrap();
        assert_eq!(artist.mbid, None);
    }

    #[test]
    fn similar_artists_accept_single_object() {
        let similar: SimilarArtists = serde_json::from_str(
            r#"{"similarartists": {"artist": {"name": "Keane", "url": "https://www.last.fm/music/Keane"}}}"#,
        )
        .unwrap();
        assert_eq!(similar.artists.len(), 1);
        assert_eq!(similar.artists[0].name, "Keane");
    }

    #[test]
    fn search_decodes_the_service_opensearch_layout() {
        let search: ArtistSearch = serde_json::from_str(
            r##"{"results": {
                "opensearch:Query": {"#text": "", "role": "request", "searchTerms": "muse", "startPage": "1"},
                "opensearch:totalResults": "198",
                "opensearch:startIndex": "0",
                "opensearch:itemsPerPage": "30",
                "artistmatches": {
                    "artist": [{"name": "Muse", "url": "https://www.last.fm/music/Muse", "listeners": "4417336"}]
                },
                "@attr": {"for": "muse"}
            }}"##,
        )
        .unwrap();

        assert_eq!(search.artists.len(), 1);
        let attrs = search.attributes.unwrap();
        assert_eq!(attrs.query.as_deref(), Some("muse"));
        assert_eq!(attrs.page, 1);
        assert_eq!(attrs.total_results, 198);
        assert_eq!(attrs.items_per_page, 30);
    }

    #[test]
    fn search_tolerates_missing_attributes() {
        let search: ArtistSearch = serde_json::from_str(
            r#"{"results": {"artistmatches": {"artist": []}}}"#,
        )
        .unwrap();
        assert!(search.artists.is_empty());
        assert!(search.attributes.is_none());
    }
}
