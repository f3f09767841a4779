// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire method names for the web service.
//!
//! Every call addresses a single endpoint at the shared base URL and
//! selects its operation through the `method` query parameter. The
//! enums here pin each operation to its exact dotted wire name so the
//! client never carries string literals around.

/// Artist catalogue reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistEndpoint {
    GetInfo,
    GetSimilar,
    GetTopAlbums,
    GetTopTracks,
    Search,
}

impl ArtistEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetInfo => "artist.getinfo",
            Self::GetSimilar => "artist.getsimilar",
            Self::GetTopAlbums => "artist.gettopalbums",
            Self::GetTopTracks => "artist.gettoptracks",
            Self::Search => "artist.search",
        }
    }
}

/// Album catalogue reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumEndpoint {
    GetInfo,
    GetTopTags,
    Search,
}

impl AlbumEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetInfo => "album.getinfo",
            Self::GetTopTags => "album.gettoptags",
            Self::Search => "album.search",
        }
    }
}

/// Track catalogue reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEndpoint {
    GetInfo,
    GetSimilar,
    GetTopTags,
    Search,
}

impl TrackEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetInfo => "track.getinfo",
            Self::GetSimilar => "track.getsimilar",
            Self::GetTopTags => "track.gettoptags",
            Self::Search => "track.search",
        }
    }
}

/// Tag reads, both the tag itself and its ranked listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEndpoint {
    GetInfo,
    GetSimilar,
    GetTopArtists,
    GetTopAlbums,
    GetTopTracks,
    GetTopTags,
    GetWeeklyChartList,
}

impl TagEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetInfo => "tag.getinfo",
            Self::GetSimilar => "tag.getsimilar",
            Self::GetTopArtists => "tag.gettopartists",
            Self::GetTopAlbums => "tag.gettopalbums",
            Self::GetTopTracks => "tag.gettoptracks",
            Self::GetTopTags => "tag.gettoptags",
            Self::GetWeeklyChartList => "tag.getweeklychartlist",
        }
    }
}

/// Global popularity charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEndpoint {
    GetTopArtists,
    GetTopTags,
    GetTopTracks,
}

impl ChartEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetTopArtists => "chart.gettopartists",
            Self::GetTopTags => "chart.gettoptags",
            Self::GetTopTracks => "chart.gettoptracks",
        }
    }
}

/// Per-country charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoEndpoint {
    GetTopArtists,
    GetTopTracks,
}

impl GeoEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetTopArtists => "geo.gettopartists",
            Self::GetTopTracks => "geo.gettoptracks",
        }
    }
}

/// Listener-profile reads. These require an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEndpoint {
    GetInfo,
    GetFriends,
    GetLovedTracks,
    GetRecentTracks,
    GetTopArtists,
    GetTopAlbums,
    GetTopTracks,
    GetTopTags,
    GetWeeklyAlbumChart,
    GetWeeklyArtistChart,
    GetWeeklyTrackChart,
    GetWeeklyChartList,
}

impl UserEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetInfo => "user.getinfo",
            Self::GetFriends => "user.getfriends",
            Self::GetLovedTracks => "user.getlovedtracks",
            Self::GetRecentTracks => "user.getrecenttracks",
            Self::GetTopArtists => "user.gettopartists",
            Self::GetTopAlbums => "user.gettopalbums",
            Self::GetTopTracks => "user.gettoptracks",
            Self::GetTopTags => "user.gettoptags",
            Self::GetWeeklyAlbumChart => "user.getweeklyalbumchart",
            Self::GetWeeklyArtistChart => "user.getweeklyartistchart",
            Self::GetWeeklyTrackChart => "user.getweeklytrackchart",
            Self::GetWeeklyChartList => "user.getweeklychartlist",
        }
    }
}

/// Session establishment. The mobile-session method name keeps its
/// camel case on the wire; the verifier matches it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEndpoint {
    GetMobileSession,
}

impl AuthEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetMobileSession => "auth.getMobileSession",
        }
    }
}

/// Signed listening-history writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrobbleEndpoint {
    UpdateNowPlaying,
    Scrobble,
    Love,
}

impl ScrobbleEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::UpdateNowPlaying => "track.updateNowPlaying",
            Self::Scrobble => "track.scrobble",
            Self::Love => "track.love",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_dotted_method_strings() {
        assert_eq!(ArtistEndpoint::GetInfo.path(), "artist.getinfo");
        assert_eq!(TagEndpoint::GetTopAlbums.path(), "tag.gettopalbums");
        assert_eq!(UserEndpoint::GetRecentTracks.path(), "user.getrecenttracks");
        assert_eq!(UserEndpoint::GetWeeklyAlbumChart.path(), "user.getweeklyalbumchart");
        assert_eq!(TagEndpoint::GetWeeklyChartList.path(), "tag.getweeklychartlist");
        assert_eq!(AuthEndpoint::GetMobileSession.path(), "auth.getMobileSession");
        assert_eq!(ScrobbleEndpoint::UpdateNowPlaying.path(), "track.updateNowPlaying");
    }
}
