// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the read pipeline.

use scrobkit_client::{LastfmClient, LastfmError};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LastfmClient {
    LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .secret("secret123")
        .credentials("alice", "wonderland")
        .build()
        .unwrap()
}

#[tokio::test]
async fn artist_info_requests_json_and_decodes_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "artist.getinfo"))
        .and(query_param("api_key", "key123"))
        .and(query_param("artist", "Muse"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "artist": {
                "name": "Muse",
                "url": "https://www.last.fm/music/Muse",
                "mbid": "9c9f1380-2516-4fc9-a3e6-f9f61941d090",
                "stats": {},
                "playcount": "471972810",
                "listeners": "4417336"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).artist_info("Muse").await.unwrap();
    assert_eq!(response.artist.name, "Muse");
    assert_eq!(response.artist.playcount, Some(471972810.0));
    assert_eq!(
        response.artist.mbid.as_deref(),
        Some("9c9f1380-2516-4fc9-a3e6-f9f61941d090")
    );
}

#[tokio::test]
async fn api_errors_on_http_200_become_typed_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": 6,
            "message": "The artist you supplied could not be found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).artist_info("Nonexistent").await.unwrap_err();
    match err {
        LastfmError::Api { code, message } => {
            assert_eq!(code, 6);
            assert_eq!(message, "The artist you supplied could not be found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn search_passes_paging_parameters_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "artist.search"))
        .and(query_param("artist", "muse"))
        .and(query_param("limit", "5"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {
                "opensearch:Query": {
                    "#text": "", "role": "request", "searchTerms": "muse", "startPage": "2"
                },
                "opensearch:totalResults": "198",
                "opensearch:startIndex": "5",
                "opensearch:itemsPerPage": "5",
                "artistmatches": {
                    "artist": [
                        {"name": "Muse", "url": "https://www.last.fm/music/Muse", "listeners": "4417336"}
                    ]
                },
                "@attr": {"for": "muse"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search_artists("muse", 5, 2).await.unwrap();
    assert_eq!(results.artists.len(), 1);
    let attrs = results.attributes.unwrap();
    assert_eq!(attrs.page, 2);
    assert_eq!(attrs.total_results, 198);
    assert_eq!(attrs.items_per_page, 5);
}

#[tokio::test]
async fn tag_top_albums_use_the_albums_root() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "tag.gettopalbums"))
        .and(query_param("tag", "rock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "albums": {
                "album": [{
                    "name": "The Dark Side of the Moon",
                    "artist": {"name": "Pink Floyd", "url": "https://www.last.fm/music/Pink+Floyd"},
                    "url": "https://www.last.fm/music/Pink+Floyd/The+Dark+Side+of+the+Moon"
                }],
                "@attr": {"tag": "rock", "page": "1", "perPage": "50", "totalPages": "100", "total": "5000"}
            }
        })))
        .mount(&server)
        .await;

    let albums = client(&server).tag_top_albums("rock", 50, 1).await.unwrap();
    assert_eq!(albums.albums.len(), 1);
    assert_eq!(albums.albums[0].artist.name, "Pink Floyd");
    assert_eq!(albums.attributes.total_pages, 100);
}

#[tokio::test]
async fn user_reads_establish_a_session_then_carry_its_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("method=auth.getMobileSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": {"name": "alice", "key": "session123", "subscriber": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "user.getlovedtracks"))
        .and(query_param("user", "alice"))
        .and(query_param("sk", "session123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lovedtracks": {
                "track": [{
                    "name": "Aerodynamic",
                    "url": "https://www.last.fm/music/Daft+Punk/_/Aerodynamic",
                    "artist": {"name": "Daft Punk", "url": "https://www.last.fm/music/Daft+Punk"},
                    "date": {"uts": "1726000000", "#text": "10 Sep 2024, 20:26"}
                }],
                "@attr": {"user": "alice", "page": "1", "perPage": "50", "totalPages": "3", "total": "121"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let loved = client(&server)
        .user_loved_tracks("alice", 50, 1)
        .await
        .unwrap();
    assert_eq!(loved.tracks.len(), 1);
    assert_eq!(loved.tracks[0].name, "Aerodynamic");
    assert_eq!(loved.attributes.total, 121);

    // Session exchange first, then the read.
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn weekly_album_chart_sends_window_bounds_with_the_session_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("method=auth.getMobileSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": {"name": "alice", "key": "session123", "subscriber": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "user.getweeklyalbumchart"))
        .and(query_param("user", "alice"))
        .and(query_param("from", "1108296000"))
        .and(query_param("to", "1108900800"))
        .and(query_param("sk", "session123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weeklyalbumchart": {
                "album": [{
                    "artist": {"mbid": "", "#text": "Daft Punk"},
                    "name": "Discovery",
                    "playcount": "14",
                    "url": "https://www.last.fm/music/Daft+Punk/Discovery",
                    "@attr": {"rank": "1"}
                }],
                "@attr": {"user": "alice", "from": "1108296000", "to": "1108900800"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chart = client(&server)
        .user_weekly_album_chart("alice", 1108296000, 1108900800)
        .await
        .unwrap();
    assert_eq!(chart.albums.len(), 1);
    assert_eq!(chart.albums[0].name, "Discovery");
    assert_eq!(chart.albums[0].artist.name, "Daft Punk");
    assert_eq!(chart.albums[0].rank, 1);
    assert_eq!(chart.attributes.to.timestamp(), 1108900800);
}

#[tokio::test]
async fn tag_chart_list_is_a_plain_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "tag.getweeklychartlist"))
        .and(query_param("tag", "rock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weeklychartlist": {
                "chart": [
                    {"#text": "", "from": "1108296000", "to": "1108900800"}
                ],
                "@attr": {"tag": "rock"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // No secret or credentials configured at all.
    let read_only = LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .build()
        .unwrap();

    let list = read_only.tag_weekly_chart_list("rock").await.unwrap();
    assert_eq!(list.spans.len(), 1);
    assert_eq!(list.spans[0].from.timestamp(), 1108296000);

    // No session exchange happened.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn chart_reads_work_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "chart.gettoptracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {
                "track": [{
                    "name": "One More Time",
                    "url": "https://www.last.fm/music/Daft+Punk/_/One+More+Time",
                    "artist": {"name": "Daft Punk", "url": "https://www.last.fm/music/Daft+Punk"},
                    "playcount": "98101233",
                    "listeners": "2400512"
                }],
                "@attr": {"page": "1", "perPage": "50", "totalPages": "200", "total": "10000"}
            }
        })))
        .mount(&server)
        .await;

    // No secret or credentials configured at all.
    let read_only = LastfmClient::builder()
        .base_url(server.uri())
        .api_key("key123")
        .build()
        .unwrap();

    let chart = read_only.chart_top_tracks(50, 1).await.unwrap();
    assert_eq!(chart.tracks.len(), 1);
    assert_eq!(chart.tracks[0].name, "One More Time");
}
