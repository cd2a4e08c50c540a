//! Client configuration and construction.

use std::time::Duration;

use tracing::debug;

use crate::auth::AuthKey;
use crate::base::BaseClient;
use crate::client::PetstoreClient;
use crate::environment::{resolve_base_url, Environment};
use crate::error::ApiError;
use crate::options::RequestOptions;
use crate::transport::{Blocking, Dispatch, ReqwestTransport, Suspending, UreqTransport};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Name of the single auth scheme the API declares.
pub const API_KEY_SCHEME: &str = "api_key";

/// Environment variables read by [`ClientBuilder::from_env`].
pub const ENV_BASE_URL: &str = "PETSTORE_BASE_URL";
pub const ENV_ENVIRONMENT: &str = "PETSTORE_ENVIRONMENT";
pub const ENV_API_KEY: &str = "PETSTORE_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "PETSTORE_TIMEOUT_SECS";

/// Builder for [`Client`](crate::Client) and [`AsyncClient`](crate::AsyncClient).
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: Option<String>,
    environment: Option<Environment>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    default_headers: Vec<(String, String)>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            environment: Some(Environment::default()),
            api_key: None,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            default_headers: Vec::new(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the process environment.
    ///
    /// Unset variables keep the builder defaults; a set but unparseable
    /// environment name or timeout is a configuration error.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut builder = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(url);
        }
        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            let environment = env.parse::<Environment>().map_err(|_| {
                ApiError::Configuration(format!("{ENV_ENVIRONMENT}: unknown environment `{env}`"))
            })?;
            builder = builder.environment(environment);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.parse::<u64>().map_err(|e| {
                ApiError::Configuration(format!("{ENV_TIMEOUT_SECS}: `{secs}` is not a number: {e}"))
            })?;
            builder = builder.timeout(Some(Duration::from_secs(secs)));
        }
        Ok(builder)
    }

    /// Explicit base URL; takes precedence over the environment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Drop the default environment so only an explicit base URL is used.
    pub fn without_environment(mut self) -> Self {
        self.environment = None;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Client-wide timeout; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Header sent with every request unless a call overrides it.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Blocking client over `ureq`.
    pub fn build(self) -> Result<PetstoreClient<Blocking<UreqTransport>>, ApiError> {
        self.build_with(Blocking(UreqTransport::new()))
    }

    /// Async client over `reqwest`.
    pub fn build_async(self) -> Result<PetstoreClient<Suspending<ReqwestTransport>>, ApiError> {
        self.build_with(Suspending(ReqwestTransport::new()))
    }

    /// Client over a caller-supplied transport strategy.
    pub fn build_with<D: Dispatch>(self, dispatch: D) -> Result<PetstoreClient<D>, ApiError> {
        let base_url = resolve_base_url(self.base_url.as_deref(), self.environment)?;
        debug!(base_url = %base_url, "building petstore client");

        let defaults = RequestOptions {
            timeout: self.timeout,
            additional_headers: self.default_headers,
            additional_query_params: Vec::new(),
        };
        let mut base = BaseClient::new(base_url, defaults, dispatch);
        base.register_auth(API_KEY_SCHEME, AuthKey::header(API_KEY_SCHEME, self.api_key));
        Ok(PetstoreClient::from_base(base))
    }
}
