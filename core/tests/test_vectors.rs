//! Replay the JSON vectors in `test-vectors/` through the real client.
//!
//! Each case names a resource call, its inputs, the request the client must
//! put on the wire, a simulated response and the expected decoded result or
//! error. A recording transport captures the request and answers with the
//! simulated response, so nothing touches the network. Bodies and results
//! are compared as parsed JSON to ignore field order. A case without an
//! expected request must fail before anything is sent.

use std::sync::Mutex;

use bytes::Bytes;
use petstore_core::models::PetStatus;
use petstore_core::{
    params, ApiError, Blocking, BlockingTransport, ClientBuilder, HttpMethod, HttpRequest,
    HttpResponse, OrBinary, Param, PetstoreClient, RequestBody,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

struct Recorder {
    response: HttpResponse,
    sent: Mutex<Vec<HttpRequest>>,
}

impl BlockingTransport for Recorder {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

type TestClient = PetstoreClient<Blocking<Recorder>>;

fn client(simulated: &Value) -> TestClient {
    let mut headers = Vec::new();
    if let Some(content_type) = simulated["content_type"].as_str() {
        headers.push(("content-type".to_string(), content_type.to_string()));
    }
    let response = HttpResponse {
        status: simulated["status"].as_u64().unwrap() as u16,
        headers,
        body: Bytes::from(simulated["body"].as_str().unwrap().to_string()),
    };
    ClientBuilder::new()
        .base_url("http://localhost:3000")
        .api_key("KEY")
        .build_with(Blocking(Recorder {
            response,
            sent: Mutex::new(Vec::new()),
        }))
        .unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Absent key is `NotGiven`, JSON null is `Null`.
fn param<T: DeserializeOwned>(input: &Value, key: &str) -> Param<T> {
    match input.get(key) {
        None => Param::NotGiven,
        Some(Value::Null) => Param::Null,
        Some(value) => Param::Value(serde_json::from_value(value.clone()).unwrap()),
    }
}

fn required<T: DeserializeOwned>(input: &Value, key: &str) -> T {
    serde_json::from_value(input[key].clone()).unwrap()
}

fn or_binary<T: Serialize>(result: OrBinary<T>) -> Value {
    match result {
        OrBinary::Parsed(value) => json!({ "parsed": value }),
        OrBinary::Binary(binary) => json!({ "binary": binary.text() }),
    }
}

fn raw(response: HttpResponse) -> Value {
    json!({ "status": response.status, "text": response.text() })
}

fn to_json<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn invoke(client: &TestClient, call: &str, input: &Value) -> Result<Value, ApiError> {
    match call {
        "pet.create" => client
            .pet()
            .create(&required::<params::Pet>(input, "pet"), None)
            .map(or_binary),
        "pet.update" => client
            .pet()
            .update(&required::<params::Pet>(input, "pet"), None)
            .map(or_binary),
        "pet.get" => client.pet().get(required(input, "pet_id"), None).map(or_binary),
        "pet.delete" => client.pet().delete(required(input, "pet_id"), None).map(raw),
        "pet.find_by_status" => client
            .pet()
            .find_by_status(param::<PetStatus>(input, "status"), None)
            .map(or_binary),
        "pet.find_by_tags" => client
            .pet()
            .find_by_tags(param::<Vec<String>>(input, "tags"), None)
            .map(or_binary),
        "pet.upload_image" => client
            .pet()
            .upload_image(
                required(input, "pet_id"),
                param::<String>(input, "additional_metadata"),
                param::<String>(input, "data").map(Bytes::from),
                None,
            )
            .map(to_json),
        "store.inventory.list" => client.store().inventory().list(None).map(to_json),
        "store.order.create" => client
            .store()
            .order()
            .create(param::<params::Order>(input, "order"), None)
            .map(to_json),
        "store.order.get" => client
            .store()
            .order()
            .get(required(input, "order_id"), None)
            .map(or_binary),
        "store.order.delete" => client
            .store()
            .order()
            .delete(required(input, "order_id"), None)
            .map(raw),
        "user.login" => client
            .user()
            .login(
                param::<String>(input, "password"),
                param::<String>(input, "username"),
                None,
            )
            .map(or_binary),
        "user.logout" => client.user().logout(None).map(raw),
        "user.get" => client
            .user()
            .get(&required::<String>(input, "username"), None)
            .map(or_binary),
        "user.create" => client
            .user()
            .create(param::<params::User>(input, "user"), None)
            .map(or_binary),
        "user.create_with_list" => client
            .user()
            .create_with_list(param::<Vec<params::User>>(input, "users"), None)
            .map(or_binary),
        "user.update" => client
            .user()
            .update(
                &required::<String>(input, "username"),
                param::<params::User>(input, "user"),
                None,
            )
            .map(raw),
        "user.delete" => client
            .user()
            .delete(&required::<String>(input, "username"), None)
            .map(raw),
        other => panic!("unknown call: {other}"),
    }
}

fn check_request(name: &str, sent: &HttpRequest, expected: &Value) {
    assert_eq!(
        sent.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(sent.url.path(), expected["path"].as_str().unwrap(), "{name}: path");
    assert_eq!(sent.url.query(), expected["query"].as_str(), "{name}: query");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(sent.headers, expected_headers, "{name}: headers");

    match &sent.body {
        None => {
            assert!(expected["body"].is_null(), "{name}: expected a JSON body");
            assert!(expected.get("content").is_none(), "{name}: expected raw content");
        }
        Some(RequestBody::Json(body)) => assert_eq!(body, &expected["body"], "{name}: body"),
        Some(RequestBody::Bytes {
            content,
            content_type,
        }) => {
            assert_eq!(
                content.as_ref(),
                expected["content"].as_str().unwrap().as_bytes(),
                "{name}: content"
            );
            assert_eq!(
                content_type,
                expected["content_type"].as_str().unwrap(),
                "{name}: content type"
            );
        }
    }
}

fn check_error(name: &str, err: &ApiError, expected: &Value) {
    match (expected["kind"].as_str().unwrap(), err) {
        ("status", ApiError::Status { status, body }) => {
            assert_eq!(u64::from(*status), expected["status"].as_u64().unwrap(), "{name}: status");
            if let Some(text) = expected["body"].as_str() {
                assert_eq!(body.as_ref(), text.as_bytes(), "{name}: error body");
            }
        }
        ("decode", ApiError::Decode { status, .. }) => {
            assert_eq!(u64::from(*status), expected["status"].as_u64().unwrap(), "{name}: status");
        }
        ("validation", ApiError::Validation(_)) => {}
        (kind, other) => panic!("{name}: expected {kind} error, got {other:?}"),
    }
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = client(&case["simulated_response"]);

        let result = invoke(&client, case["call"].as_str().unwrap(), &case["input"]);

        let sent = client.base().dispatcher().0.sent.lock().unwrap();
        match case.get("expected_request") {
            Some(expected) => {
                assert_eq!(sent.len(), 1, "{name}: exactly one request");
                check_request(name, &sent[0], expected);
            }
            None => assert!(sent.is_empty(), "{name}: nothing may be sent"),
        }

        match (result, case.get("expected_error")) {
            (Ok(value), None) => assert_eq!(value, case["expected_result"], "{name}: result"),
            (Err(err), Some(expected)) => check_error(name, &err, expected),
            (Ok(value), Some(_)) => panic!("{name}: expected an error, got {value}"),
            (Err(err), None) => panic!("{name}: unexpected error {err:?}"),
        }
    }
}

#[test]
fn pet_test_vectors() {
    run_vectors(include_str!("../../test-vectors/pet.json"));
}

#[test]
fn store_test_vectors() {
    run_vectors(include_str!("../../test-vectors/store.json"));
}

#[test]
fn user_test_vectors() {
    run_vectors(include_str!("../../test-vectors/user.json"));
}
