//! Integration tests for the endpoint operations
//!
//! Each operation gets a wiremock homeserver; clients are bound directly to
//! the mock's URL so discovery stays out of the way.

use matrix_client::types::{Event, PublicRoom, UserProfile};
use matrix_client::{room_details_from_any, Client, ClientConfig, Error};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bound_client(server: &MockServer) -> Client {
    Client::bound(server.uri(), &ClientConfig::default())
}

fn room_fixture(room_id: &str, name: &str) -> serde_json::Value {
    json!({
        "room_id": room_id,
        "name": name,
        "num_joined_members": 37,
        "world_readable": true,
        "guest_can_join": false,
    })
}

async fn mount_public_rooms(server: &MockServer, chunk: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/_matrix/client/r0/publicRooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"chunk": chunk})))
        .mount(server)
        .await;
}

// =============================================================================
// Profiles
// =============================================================================

#[tokio::test]
async fn test_user_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_matrix/client/r0/profile/@alice:example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "avatar_url": "mxc://example.org/abc123",
            "displayname": "Alice",
        })))
        .mount(&server)
        .await;

    let profile = bound_client(&server)
        .user_profile("@alice:example.org")
        .await
        .unwrap();

    assert_eq!(
        profile,
        UserProfile {
            avatar_url: Some("mxc://example.org/abc123".to_string()),
            displayname: Some("Alice".to_string()),
        }
    );
}

#[tokio::test]
async fn test_user_profile_unknown_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_matrix/client/r0/profile/@ghost:example.org"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errcode": "M_NOT_FOUND",
            "error": "Profile was not found",
        })))
        .mount(&server)
        .await;

    let result = bound_client(&server).user_profile("@ghost:example.org").await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("M_NOT_FOUND"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_profile_rejects_wrong_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_matrix/client/r0/profile/@alice:example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"displayname": 42})))
        .mount(&server)
        .await;

    let result = bound_client(&server).user_profile("@alice:example.org").await;
    assert!(matches!(result, Err(Error::Validation("user profile"))));
}

// =============================================================================
// Room Aliases
// =============================================================================

#[tokio::test]
async fn test_room_id_from_alias_percent_encodes() {
    let server = MockServer::start().await;

    // '#' and ':' must be escaped in the request path
    Mock::given(method("GET"))
        .and(path(
            "/_matrix/client/r0/directory/room/%23rust%3Aexample.org",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "room_id": "!rust:example.org",
            "servers": ["example.org"],
        })))
        .mount(&server)
        .await;

    let alias = bound_client(&server)
        .room_id_from_alias("#rust:example.org")
        .await
        .unwrap();

    assert_eq!(alias.room_id, "!rust:example.org");
    assert_eq!(alias.servers, Some(vec!["example.org".to_string()]));
}

#[tokio::test]
async fn test_room_alias_requires_room_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/_matrix/client/r0/directory/room/%23rust%3Aexample.org",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
        .mount(&server)
        .await;

    let result = bound_client(&server)
        .room_id_from_alias("#rust:example.org")
        .await;
    assert!(matches!(result, Err(Error::Validation("room alias"))));
}

// =============================================================================
// Public Rooms
// =============================================================================

#[tokio::test]
async fn test_public_rooms_validated() {
    let server = MockServer::start().await;
    mount_public_rooms(
        &server,
        json!([room_fixture("!rust:example.org", "Rust")]),
    )
    .await;

    let page = bound_client(&server).public_rooms().await.unwrap();
    assert_eq!(page.chunk.len(), 1);
    assert_eq!(page.chunk[0].room_id, "!rust:example.org");
    assert_eq!(page.chunk[0].num_joined_members, 37);
}

#[tokio::test]
async fn test_public_rooms_rejects_broken_entry() {
    let server = MockServer::start().await;
    mount_public_rooms(
        &server,
        json!([
            room_fixture("!ok:example.org", "Fine"),
            {"room_id": "!broken:example.org"},
        ]),
    )
    .await;

    let result = bound_client(&server).public_rooms().await;
    assert!(matches!(result, Err(Error::Validation("public rooms"))));
}

#[tokio::test]
async fn test_search_public_rooms_finds_match() {
    let server = MockServer::start().await;
    mount_public_rooms(
        &server,
        json!([
            room_fixture("!other:example.org", "Other"),
            room_fixture("!rust:example.org", "Rust"),
        ]),
    )
    .await;

    let room = bound_client(&server)
        .search_public_rooms("!rust:example.org")
        .await
        .unwrap();
    assert_eq!(room.name.as_deref(), Some("Rust"));
}

#[tokio::test]
async fn test_search_public_rooms_miss_is_explicit() {
    let server = MockServer::start().await;
    mount_public_rooms(&server, json!([room_fixture("!other:example.org", "Other")])).await;

    let result = bound_client(&server)
        .search_public_rooms("!missing:example.org")
        .await;
    match result {
        Err(err @ Error::RoomNotFound(_)) => assert_eq!(
            err.to_string(),
            "this server knows no public room with id !missing:example.org"
        ),
        other => panic!("expected room-not-found, got {other:?}"),
    }
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn test_event_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/_matrix/client/r0/rooms/!rust:example.org/event/$evt1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "m.room.message",
            "content": {"msgtype": "m.text", "body": "hello"},
        })))
        .mount(&server)
        .await;

    let event: Event = bound_client(&server)
        .event("!rust:example.org", "$evt1")
        .await
        .unwrap();

    assert_eq!(event.event_type, "m.room.message");
    assert_eq!(event.content["body"], "hello");
}

#[tokio::test]
async fn test_event_content_must_be_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/_matrix/client/r0/rooms/!rust:example.org/event/$evt1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "m.room.message",
            "content": "hello",
        })))
        .mount(&server)
        .await;

    let result = bound_client(&server).event("!rust:example.org", "$evt1").await;
    assert!(matches!(result, Err(Error::Validation("event"))));
}

// =============================================================================
// Cross-Server Race
// =============================================================================

#[tokio::test]
async fn test_room_details_from_any_first_success_wins() {
    let without = MockServer::start().await;
    let with = MockServer::start().await;

    mount_public_rooms(&without, json!([])).await;
    mount_public_rooms(&with, json!([room_fixture("!rust:example.org", "Rust")])).await;

    let clients = vec![bound_client(&without), bound_client(&with)];

    let room: PublicRoom = room_details_from_any(&clients, "!rust:example.org")
        .await
        .unwrap();
    assert_eq!(room.room_id, "!rust:example.org");
}

#[tokio::test]
async fn test_room_details_from_any_collects_all_failures() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    mount_public_rooms(&first, json!([])).await;
    mount_public_rooms(&second, json!([])).await;

    let clients = vec![bound_client(&first), bound_client(&second)];

    let result = room_details_from_any(&clients, "!rust:example.org").await;
    match result {
        Err(Error::AllFailed(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors
                .iter()
                .all(|e| matches!(e, Error::RoomNotFound(_))));
        }
        other => panic!("expected all-failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_room_details_from_any_no_servers() {
    let result = room_details_from_any(&[], "!rust:example.org").await;
    match result {
        Err(Error::AllFailed(errors)) => assert!(errors.is_empty()),
        other => panic!("expected all-failed, got {other:?}"),
    }
}
