//! Resource façades.
//!
//! Each façade borrows the root client's [`BaseClient`](crate::base::BaseClient)
//! and maps one method to one [`Operation`](crate::operation::Operation). The
//! return type follows the client's [`Dispatch`](crate::transport::Dispatch)
//! strategy: a `Result` for the blocking client, a future for the async one.

mod pet;
mod store;
mod user;

pub use pet::PetClient;
pub use store::{InventoryClient, OrderClient, StoreClient};
pub use user::UserClient;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::encode::to_encodable;
use crate::error::ApiError;
use crate::operation::ApiRequest;
use crate::param::Param;
use crate::query::QueryStyle;

/// Add `value` as a `form`/`explode` query parameter validated against `S`.
/// Not-given values add nothing. No query form carries a null, so an explicit
/// null is a validation error.
fn with_query<S, T, V>(
    request: ApiRequest<T>,
    name: &str,
    value: &Param<V>,
) -> Result<ApiRequest<T>, ApiError>
where
    S: Serialize + DeserializeOwned,
    V: Serialize,
{
    let encoded = match value {
        Param::NotGiven => return Ok(request),
        Param::Null => {
            return Err(ApiError::Validation(format!(
                "query parameter `{name}` cannot be null"
            )))
        }
        Param::Value(v) => to_encodable::<S>(v)?,
    };
    Ok(request.query_param(name, &encoded, QueryStyle::Form, true))
}

/// Attach an optional JSON body validated against `S`. Bodies that are not
/// given, null, or encode to an empty object or array are left off the
/// request entirely.
fn with_optional_json<S, T, V>(
    request: ApiRequest<T>,
    value: &Param<V>,
) -> Result<ApiRequest<T>, ApiError>
where
    S: Serialize + DeserializeOwned,
    V: Serialize,
{
    let Param::Value(v) = value else {
        return Ok(request);
    };
    let body = to_encodable::<S>(v)?;
    if is_empty_body(&body) {
        return Ok(request);
    }
    Ok(request.json(body))
}

fn is_empty_body(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use bytes::Bytes;

    use crate::client::PetstoreClient;
    use crate::config::ClientBuilder;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::transport::{Blocking, BlockingTransport};

    /// Answers every request with one canned response and keeps what was sent.
    pub(crate) struct Recorder {
        response: HttpResponse,
        pub(crate) sent: Mutex<Vec<HttpRequest>>,
    }

    impl BlockingTransport for Recorder {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    pub(crate) fn client(status: u16, body: &'static str) -> PetstoreClient<Blocking<Recorder>> {
        let recorder = Recorder {
            response: HttpResponse {
                status,
                headers: vec![("content-type".into(), "application/json".into())],
                body: Bytes::from_static(body.as_bytes()),
            },
            sent: Mutex::new(Vec::new()),
        };
        ClientBuilder::new()
            .base_url("http://localhost:3000")
            .api_key("KEY")
            .build_with(Blocking(recorder))
            .unwrap()
    }

    pub(crate) fn last_request(client: &PetstoreClient<Blocking<Recorder>>) -> HttpRequest {
        client
            .base()
            .dispatcher()
            .0
            .sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}
