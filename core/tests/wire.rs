//! Exact wire form checks against a `wiremock` server.

use std::time::Duration;

use petstore_core::models::PetStatus;
use petstore_core::{params, ApiError, AsyncClient, Client, ClientBuilder, RequestOptions};
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn async_client(server: &MockServer) -> AsyncClient {
    ClientBuilder::new()
        .base_url(server.uri())
        .api_key("wire-key")
        .build_async()
        .unwrap()
}

fn blocking_client(server: &MockServer) -> Client {
    ClientBuilder::new()
        .base_url(server.uri())
        .api_key("wire-key")
        .build()
        .unwrap()
}

#[tokio::test]
async fn create_pet_sends_auth_header_and_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(header("api_key", "wire-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "doggie", "photoUrls": ["string"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "name": "doggie",
            "photoUrls": ["string"],
            "status": "available"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let pet = client
        .pet()
        .create(&params::Pet::new("doggie", vec!["string".into()]), None)
        .await
        .unwrap();
    let pet = pet.into_parsed().unwrap();
    assert_eq!(pet.id, Some(10));
    assert_eq!(pet.status, Some(PetStatus::Available));
}

#[tokio::test]
async fn find_by_tags_repeats_query_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/findByTags"))
        .and(query_param("tags", "a"))
        .and(query_param("tags", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let pets = client
        .pet()
        .find_by_tags(vec!["a".to_string(), "b".to_string()], None)
        .await
        .unwrap();
    assert_eq!(pets.into_parsed(), Some(Vec::new()));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("tags=a&tags=b"));
}

#[tokio::test]
async fn upload_image_sends_raw_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet/3/uploadImage"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(b"\x00\x01binary".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "type": "unknown",
            "message": "stored"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let response = client
        .pet()
        .upload_image(
            3,
            petstore_core::Param::NotGiven,
            bytes::Bytes::from_static(b"\x00\x01binary"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(response.kind.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn per_call_options_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/inventory"))
        .and(header("api_key", "wire-key"))
        .and(header("x-trace", "abc"))
        .and(query_param("debug", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": 3, "pending": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let options = RequestOptions::new()
        .header("x-trace", "abc")
        .query_param("debug", "1");
    let inventory = client
        .store()
        .inventory()
        .list(Some(options))
        .await
        .unwrap();
    assert_eq!(inventory.get("available"), Some(3));
    assert_eq!(inventory.get("pending"), Some(1));
}

#[tokio::test]
async fn error_status_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let err = client.user().get("ghost", None).await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body.as_ref(), b"User not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_times_out_async() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let options = RequestOptions::new().timeout(Duration::from_millis(100));
    let err = client.user().logout(Some(options)).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_client_speaks_the_same_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/theUser"))
        .and(header("api_key", "wire-key"))
        .and(body_json(json!({"email": "new@example.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = blocking_client(&mock_server);
    let (updated, timed_out) = tokio::task::spawn_blocking(move || {
        let user = params::User {
            email: "new@example.com".into(),
            ..Default::default()
        };
        let updated = client.user().update("theUser", user, None).map(|r| r.status);
        let options = RequestOptions::new().timeout(Duration::from_millis(100));
        let timed_out = client.user().logout(Some(options));
        (updated, timed_out)
    })
    .await
    .unwrap();

    assert_eq!(updated.unwrap(), 200);
    assert!(matches!(timed_out, Err(ApiError::Timeout)));
}

#[tokio::test(flavor = "multi_thread")]
async fn large_binary_body_reaches_both_clients() {
    const SIZE: usize = 11 * 1024 * 1024;
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8; SIZE], "image/png"))
        .mount(&mock_server)
        .await;

    let client = async_client(&mock_server);
    let asynchronous = client.pet().get(1, None).await.unwrap();
    assert_eq!(asynchronous.binary().map(|b| b.content().len()), Some(SIZE));

    let client = blocking_client(&mock_server);
    let blocking = tokio::task::spawn_blocking(move || client.pet().get(1, None))
        .await
        .unwrap()
        .unwrap();
    let binary = blocking.binary().expect("binary fallback");
    assert_eq!(binary.content().len(), SIZE);
    assert_eq!(binary.content_type(), Some("image/png"));
}
