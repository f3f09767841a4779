// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use url::Url;

use crate::album::AlbumSummary;
use crate::artist::{Artist, ArtistRef};
use crate::common::{Image, UserAttributes};
use crate::decode::{self, EpochStamp, Scalar};
use crate::track::TrackSummary;

/// A user profile from `user.getinfo`.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub name: String,
    pub url: Url,
    pub realname: Option<String>,
    pub country: Option<String>,
    pub age: u32,
    pub playcount: u64,
    pub subscriber: bool,
    pub registered: Option<DateTime<Utc>>,
    pub image: Vec<Image>,
}

impl<'de> Deserialize<'de> for UserInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Registered {
            unixtime: Scalar,
        }
        #[derive(Deserialize)]
        struct Inner {
            name: String,
            url: Url,
            #[serde(default)]
            realname: Option<String>,
            #[serde(default)]
            country: Option<String>,
            #[serde(default)]
            age: Option<Scalar>,
            #[serde(default)]
            playcount: Option<Scalar>,
            #[serde(default)]
            subscriber: Option<Scalar>,
            #[serde(default)]
            registered: Option<Registered>,
            #[serde(default)]
            image: Option<Vec<Image>>,
        }
        #[derive(Deserialize)]
        struct Envelope {
            user: Inner,
        }

        let inner = Envelope::deserialize(deserializer)?.user;
        let entity = format!("user '{}'", inner.name);

        let registered = inner.registered.and_then(|r| match r.unixtime {
            Scalar::Text(s) => s.parse::<i64>().ok(),
            Scalar::Int(n) => Some(n),
            Scalar::Float(_) => None,
        });

        Ok(UserInfo {
            age: decode::u32_or_zero(inner.age, "age", &entity)?,
            playcount: decode::u64_or_zero(inner.playcount, "playcount", &entity)?,
            subscriber: inner.subscriber.map(|s| s.truthy()).unwrap_or(false),
            registered: registered.and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            realname: decode::non_empty(inner.realname),
            country: decode::non_empty(inner.country),
            name: inner.name,
            url: inner.url,
            image: inner.image.unwrap_or_default(),
        })
    }
}

/// A friend from `user.getfriends`. The friendship date is identity for
/// history views, so an unparseable timestamp fails the decode; an
/// absent one is simply `None`.
#[derive(Debug, Clone)]
pub struct Friend {
    pub name: String,
    pub url: Url,
    pub image: Option<Vec<Image>>,
    pub subscriber: Option<bool>,
    pub since: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for Friend {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            url: Url,
            #[serde(default)]
            image: Option<Vec<Image>>,
            #[serde(default)]
            subscriber: Option<Scalar>,
            #[serde(default)]
            date: Option<EpochStamp>,
        }

        let raw = Raw::deserialize(deserializer)?;

        let since = match &raw.date {
            None => None,
            Some(stamp) => {
                let seconds = stamp.seconds().ok_or_else(|| {
                    de::Error::custom(format!(
                        "date timestamp is not a valid number for friend '{}'",
                        raw.name
                    ))
                })?;
                Utc.timestamp_opt(seconds, 0).single()
            }
        };

        Ok(Friend {
            subscriber: raw.subscriber.map(|s| s.truthy()),
            since,
            name: raw.name,
            url: raw.url,
            image: raw.image,
        })
    }
}

/// Envelope for `user.getfriends` (root `friends`, entries under
/// `user`, one object when there is exactly one friend).
#[derive(Debug, Clone)]
pub struct Friends {
    pub friends: Vec<Friend>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for Friends {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            friends: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            user: Vec<Friend>,
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(Friends {
            friends: envelope.friends.user,
            attributes: envelope.friends.attr,
        })
    }
}

/// A loved track from `user.getlovedtracks`. Unlike friends, a garbled
/// love date is operationally meaningless and collapses to `None`.
#[derive(Debug, Clone)]
pub struct LovedTrack {
    pub name: String,
    pub artist: ArtistRef,
    pub url: Url,
    pub mbid: Option<String>,
    pub image: Vec<Image>,
    pub loved_at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for LovedTrack {
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
            image: Option<Vec<Image>>,
            #[serde(default)]
            date: Option<EpochStamp>,
        }

        let raw = Raw::deserialize(deserializer)?;

        Ok(LovedTrack {
            loved_at: raw
                .date
                .and_then(|d| d.seconds())
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            mbid: decode::non_empty(raw.mbid),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
            image: raw.image.unwrap_or_default(),
        })
    }
}

/// Envelope for `user.getlovedtracks`.
#[derive(Debug, Clone)]
pub struct LovedTracks {
    pub tracks: Vec<LovedTrack>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for LovedTracks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            lovedtracks: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<LovedTrack>,
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(LovedTracks {
            tracks: envelope.lovedtracks.track,
            attributes: envelope.lovedtracks.attr,
        })
    }
}

/// A credited name on recent-track entries, keyed under `#text`.
#[derive(Debug, Clone, Deserialize)]
pub struct NameRef {
    #[serde(rename = "#text")]
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
}

/// A play from `user.getrecenttracks`. The entry currently playing has
/// no date and is flagged through `@attr.nowplaying`.
#[derive(Debug, Clone)]
pub struct RecentTrack {
    pub name: String,
    pub artist: NameRef,
    pub album: Option<NameRef>,
    pub url: Url,
    pub mbid: Option<String>,
    pub played_at: Option<DateTime<Utc>>,
    pub now_playing: bool,
}

impl<'de> Deserialize<'de> for RecentTrack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct EntryAttr {
            #[serde(default, deserialize_with = "now_playing_flag")]
            nowplaying: bool,
        }
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            artist: NameRef,
            url: Url,
            #[serde(default)]
            album: Option<NameRef>,
            #[serde(default)]
            mbid: Option<String>,
            #[serde(default)]
            date: Option<EpochStamp>,
            #[serde(rename = "@attr", default)]
            attr: Option<EntryAttr>,
        }

        let raw = Raw::deserialize(deserializer)?;

        Ok(RecentTrack {
            played_at: raw
                .date
                .and_then(|d| d.seconds())
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            now_playing: raw.attr.map(|a| a.nowplaying).unwrap_or(false),
            mbid: decode::non_empty(raw.mbid),
            album: raw.album.filter(|a| !a.name.is_empty()),
            name: raw.name,
            artist: raw.artist,
            url: raw.url,
        })
    }
}

/// The now-playing marker is the string `"true"`, not `"1"`.
fn now_playing_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s == "true")
        .unwrap_or(false))
}

/// Envelope for `user.getrecenttracks`.
#[derive(Debug, Clone)]
pub struct RecentTracks {
    pub tracks: Vec<RecentTrack>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for RecentTracks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            recenttracks: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            track: Vec<RecentTrack>,
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(RecentTracks {
            tracks: envelope.recenttracks.track,
            attributes: envelope.recenttracks.attr,
        })
    }
}

/// Envelope for `user.gettopartists`.
#[derive(Debug, Clone)]
pub struct UserTopArtists {
    pub artists: Vec<Artist>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for UserTopArtists {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            topartists: Block,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default, deserialize_with = "crate::decode::one_or_many")]
            artist: Vec<Artist>,
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(UserTopArtists {
            artists: envelope.topartists.artist,
            attributes: envelope.topartists.attr,
        })
    }
}

/// Envelope for `user.gettopalbums`.
#[derive(Debug, Clone)]
pub struct UserTopAlbums {
    pub albums: Vec<AlbumSummary>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for UserTopAlbums {
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
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(UserTopAlbums {
            albums: envelope.topalbums.album,
            attributes: envelope.topalbums.attr,
        })
    }
}

/// Envelope for `user.gettoptracks`.
#[derive(Debug, Clone)]
pub struct UserTopTracks {
    pub tracks: Vec<TrackSummary>,
    pub attributes: UserAttributes,
}

impl<'de> Deserialize<'de> for UserTopTracks {
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
            #[serde(rename = "@attr")]
            attr: UserAttributes,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        Ok(UserTopTracks {
            tracks: envelope.toptracks.track,
            attributes: envelope.toptracks.attr,
        })
    }
}
