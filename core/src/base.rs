//! The shared request pipeline.
//!
//! # Design
//! `BaseClient` is built once per root client and borrowed by every
//! resource façade. It owns the transport strategy, the base URL, the
//! client-level default options and the auth registry. The registry is
//! filled during construction and only read afterwards, so sharing by `&`
//! needs no locking.

use tracing::{debug, instrument, Span};
use url::Url;

use crate::auth::{AuthKey, AuthRegistry};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::operation::ApiRequest;
use crate::options::RequestOptions;
use crate::transport::{Dispatch, Prepared};

#[derive(Debug)]
pub struct BaseClient<D> {
    base_url: Url,
    defaults: RequestOptions,
    auth: AuthRegistry,
    dispatch: D,
}

impl<D: Dispatch> BaseClient<D> {
    pub fn new(base_url: Url, defaults: RequestOptions, dispatch: D) -> Self {
        Self {
            base_url,
            defaults,
            auth: AuthRegistry::default(),
            dispatch,
        }
    }

    /// Register a credential under `scheme`, replacing any previous one.
    pub fn register_auth(&mut self, scheme: impl Into<String>, key: AuthKey) {
        self.auth.register(scheme, key);
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn defaults(&self) -> &RequestOptions {
        &self.defaults
    }

    pub fn auth(&self) -> &AuthRegistry {
        &self.auth
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    /// Send `request` and decode the answer into `T`.
    pub fn request<T: Send + 'static>(&self, request: ApiRequest<T>) -> D::Output<'_, T> {
        self.dispatch.dispatch(self.prepare(request))
    }

    /// Like [`request`](Self::request), for façades whose request building
    /// can fail. An error from `build` is returned through the same channel
    /// as a transport error, without sending anything.
    pub fn request_with<T, F>(&self, build: F) -> D::Output<'_, T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<ApiRequest<T>, ApiError>,
    {
        let prepared = build().and_then(|request| self.prepare(request));
        self.dispatch.dispatch(prepared)
    }

    /// Resolve URL, options, and credentials into a ready-to-send request.
    #[instrument(
        name = "prepare_request",
        skip_all,
        fields(http.method = %request.method, http.path = %request.path, http.url = tracing::field::Empty)
    )]
    pub fn prepare<T>(&self, request: ApiRequest<T>) -> Result<Prepared<T>, ApiError> {
        let ApiRequest {
            method,
            path,
            auth_names,
            mut query,
            body,
            cast_to,
            options,
        } = request;

        let options = self.defaults.merged_with(options.as_ref());
        for (name, value) in &options.additional_query_params {
            query.push(name.as_str(), value.as_str());
        }
        let mut headers = options.additional_headers;
        self.auth.apply(auth_names, &mut headers, &mut query)?;

        let mut url = join_path(&self.base_url, &path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.iter() {
                pairs.append_pair(name, value);
            }
        }
        Span::current().record("http.url", url.as_str());
        debug!(headers = headers.len(), has_body = body.is_some(), "request prepared");

        Ok(Prepared {
            request: HttpRequest {
                method,
                url,
                headers,
                body,
                timeout: options.timeout,
            },
            cast_to,
        })
    }
}

/// Append `path` to the base URL, keeping any path prefix the base carries.
fn join_path(base: &Url, path: &str) -> Result<Url, ApiError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ApiError::Configuration(format!("invalid URL `{joined}`: {e}")))
}
