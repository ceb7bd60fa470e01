//! Remote client against a stub of the statistics API
//!
//! Run with: cargo test -p integration-tests --test remote_client_tests

use integration_tests::*;
use ladder_common::RemoteConfig;
use ladder_core::traits::StatsSource;
use ladder_core::value_objects::PlayerId;
use ladder_core::DomainError;
use ladder_remote::{RemoteError, RemoteStatsClient};
use serde_json::json;

fn client_for(stub: &StubRemote) -> RemoteStatsClient {
    RemoteStatsClient::new(&RemoteConfig {
        base_url: stub.base_url(),
        timeout_secs: 5,
        ..RemoteConfig::default()
    })
    .expect("client")
}

fn id(raw: &str) -> PlayerId {
    PlayerId::parse(raw).expect("valid id")
}

#[tokio::test]
async fn test_fetch_normalizes_player_record() {
    let stub = StubRemote::start().await.unwrap();
    stub.add_player("7001", "Stubby", 1250.0, 20);
    let client = client_for(&stub);

    let stats = client.fetch(&id("7001")).await.unwrap();

    assert_eq!(stats.name, "Stubby");
    assert_eq!(stats.solo.rating, 1250);
    assert_eq!(stats.solo.matches, 20);
    assert_eq!(stats.solo.wins, 10);
    assert!(stats.solo.last_match_at.is_some());
    assert_eq!(stats.solo_elo, Some(1330));
    assert_eq!(stats.team.rating, 1010);
    assert_eq!(stats.team.matches, 7);
    assert_eq!(stats.group_tag.as_deref(), Some("STB"));
    assert_eq!(stats.region.as_deref(), Some("eu"));
    assert_eq!(stats.faction.as_deref(), Some("english"));
    assert!(stats.avatar_url.is_some());
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_null_mode_entries_fall_through() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond(
        "7010",
        StubResponse::json(&json!({
            "name": "Unranked",
            "modes": {
                "rm_solo": { "rating": 1180, "wins_count": 6, "games_count": 11 },
                "rm_team": null,
                "rm_2v2": { "rating": 990, "games_count": 4 },
                "rm_1v1_elo": null
            }
        })),
    );
    let client = client_for(&stub);

    let stats = client.fetch(&id("7010")).await.unwrap();

    assert_eq!(stats.solo.rating, 1180);
    assert_eq!(stats.team.rating, 990);
    assert_eq!(stats.team.matches, 4);
    assert_eq!(stats.solo_elo, None);
}

#[tokio::test]
async fn test_sparse_record_zeroes_missing_modes() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond("7002", StubResponse::json(&json!({ "name": "Fresh" })));
    let client = client_for(&stub);

    let stats = client.fetch(&id("7002")).await.unwrap();

    assert_eq!(stats.name, "Fresh");
    assert_eq!(stats.solo.rating, 0);
    assert_eq!(stats.solo.matches, 0);
    assert_eq!(stats.team.matches, 0);
    assert_eq!(stats.solo_elo, None);
    assert_eq!(stats.group_tag, None);
}

#[tokio::test]
async fn test_unknown_player_is_status_error() {
    let stub = StubRemote::start().await.unwrap();
    let client = client_for(&stub);

    let err = client.fetch(&id("404404")).await.unwrap_err();
    assert!(matches!(err, RemoteError::Status { status: 404 }));

    let err = client.fetch_player_stats(&id("404404")).await.unwrap_err();
    assert!(matches!(err, DomainError::RemoteStatus { status: 404 }));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond("7003", StubResponse::status(503));
    let client = client_for(&stub);

    let err = client.fetch_player_stats(&id("7003")).await.unwrap_err();
    assert!(matches!(err, DomainError::RemoteStatus { status: 503 }));
}

#[tokio::test]
async fn test_html_body_is_malformed() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond("7004", StubResponse::html("<html>maintenance</html>"));
    let client = client_for(&stub);

    let err = client.fetch(&id("7004")).await.unwrap_err();
    assert!(matches!(err, RemoteError::ContentType(_)));

    let err = client.fetch_player_stats(&id("7004")).await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedRemoteResponse(_)));
}

#[tokio::test]
async fn test_record_without_name_is_malformed() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond(
        "7005",
        StubResponse::json(&json!({ "modes": { "rm_solo": { "rating": 1100 } } })),
    );
    let client = client_for(&stub);

    let err = client.fetch(&id("7005")).await.unwrap_err();
    assert!(matches!(err, RemoteError::MissingName));
}

#[tokio::test]
async fn test_non_object_body_is_malformed() {
    let stub = StubRemote::start().await.unwrap();
    stub.respond("7006", StubResponse::json(&json!([1, 2, 3])));
    let client = client_for(&stub);

    let err = client.fetch_player_stats(&id("7006")).await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedRemoteResponse(_)));
}
