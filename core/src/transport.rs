//! Blocking and suspending ways of performing one HTTP exchange.
//!
//! # Design
//! Preparing a request and decoding its response are the same for both
//! client flavors, so they live in [`BaseClient`](crate::base::BaseClient).
//! What differs is only the send: a [`BlockingTransport`] parks the calling
//! thread, an [`AsyncTransport`] yields to the executor. [`Dispatch`] ties a
//! transport to its return convention (`Result<T, _>` for [`Blocking`], a
//! boxed `Send` future for [`Suspending`]) so resource façades are written
//! once, generic over the strategy.
//!
//! No strategy retries. Timeouts come from `HttpRequest::timeout` and
//! surface as [`ApiError::Timeout`].

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use tracing::debug;

use crate::decode::ResponseShape;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Sends a request and blocks until the response (or an error) arrives.
pub trait BlockingTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Sends a request, suspending the calling task while waiting on I/O.
pub trait AsyncTransport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// A prepared request plus the shape its 2xx body must decode into.
#[derive(Debug)]
pub struct Prepared<T> {
    pub request: HttpRequest,
    pub cast_to: ResponseShape<T>,
}

/// Turn a raw response into the caller's result: non-2xx becomes
/// [`ApiError::Status`], anything else is decoded against `cast_to`.
pub fn finish<T>(response: HttpResponse, cast_to: &ResponseShape<T>) -> Result<T, ApiError> {
    if !response.is_success() {
        debug!(status = response.status, "server rejected request");
        return Err(ApiError::Status {
            status: response.status,
            body: response.body,
        });
    }
    cast_to.decode(response)
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How a base client performs a prepared request and returns its result.
pub trait Dispatch {
    type Output<'a, T: 'a>
    where
        Self: 'a;

    fn dispatch<'a, T: Send + 'static>(
        &'a self,
        prepared: Result<Prepared<T>, ApiError>,
    ) -> Self::Output<'a, T>;
}

/// Blocking strategy: calls return `Result<T, ApiError>` directly.
#[derive(Debug, Clone)]
pub struct Blocking<S>(pub S);

/// Suspending strategy: calls return a future to be awaited.
#[derive(Debug, Clone)]
pub struct Suspending<S>(pub S);

impl<S: BlockingTransport> Dispatch for Blocking<S> {
    type Output<'a, T: 'a>
        = Result<T, ApiError>
    where
        Self: 'a;

    fn dispatch<'a, T: Send + 'static>(
        &'a self,
        prepared: Result<Prepared<T>, ApiError>,
    ) -> Self::Output<'a, T> {
        let Prepared { request, cast_to } = prepared?;
        let response = self.0.send(request)?;
        finish(response, &cast_to)
    }
}

impl<S: AsyncTransport> Dispatch for Suspending<S> {
    type Output<'a, T: 'a>
        = BoxFuture<'a, Result<T, ApiError>>
    where
        Self: 'a;

    fn dispatch<'a, T: Send + 'static>(
        &'a self,
        prepared: Result<Prepared<T>, ApiError>,
    ) -> Self::Output<'a, T> {
        Box::pin(async move {
            let Prepared { request, cast_to } = prepared?;
            let response = self.0.send(request).await?;
            finish(response, &cast_to)
        })
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// An agent that returns 4xx/5xx as data instead of `Err`, so status
    /// interpretation stays with the client.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_timeout<B>(
    builder: ureq::RequestBuilder<B>,
    timeout: Option<std::time::Duration>,
) -> ureq::RequestBuilder<B> {
    match timeout {
        Some(t) => builder.config().timeout_global(Some(t)).build(),
        None => builder,
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn body_bytes(body: &RequestBody) -> Result<Bytes, ApiError> {
    body.to_bytes()
        .map_err(|e| ApiError::Validation(format!("cannot serialize body: {e}")))
}

fn map_ureq_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        other => ApiError::Transport(other.to_string()),
    }
}

impl BlockingTransport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get | HttpMethod::Delete => {
                let builder = match request.method {
                    HttpMethod::Get => self.agent.get(url),
                    _ => self.agent.delete(url),
                };
                let builder = with_timeout(with_headers(builder, &request.headers), request.timeout);
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let builder = match request.method {
                    HttpMethod::Post => self.agent.post(url),
                    _ => self.agent.put(url),
                };
                let builder = with_timeout(with_headers(builder, &request.headers), request.timeout);
                match &request.body {
                    Some(body) => {
                        let content = body_bytes(body)?;
                        builder
                            .content_type(body.content_type())
                            .send(&content[..])
                    }
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(map_ureq_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body),
        })
    }
}

/// Async transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(error.to_string())
    }
}

impl AsyncTransport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        async move {
            let mut builder = self
                .client
                .request(request.method.to_reqwest(), request.url.clone());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(body) = &request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, body.content_type())
                    .body(body_bytes(body)?);
            }

            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
                .collect();
            let body = response.bytes().await.map_err(map_reqwest_error)?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
