//! Root client.

use crate::base::BaseClient;
use crate::config::ClientBuilder;
use crate::error::ApiError;
use crate::resources::{PetClient, StoreClient, UserClient};
use crate::transport::{Blocking, Dispatch, ReqwestTransport, Suspending, UreqTransport};

/// Blocking client: every operation returns `Result<T, ApiError>`.
pub type Client = PetstoreClient<Blocking<UreqTransport>>;

/// Async client: every operation returns a `Send` future.
pub type AsyncClient = PetstoreClient<Suspending<ReqwestTransport>>;

/// Entry point to the petstore API.
///
/// Owns the [`BaseClient`]; the resource façades returned by [`pet`](Self::pet),
/// [`store`](Self::store) and [`user`](Self::user) borrow it.
#[derive(Debug)]
pub struct PetstoreClient<D> {
    base: BaseClient<D>,
}

impl PetstoreClient<Blocking<UreqTransport>> {
    /// Blocking client with the default environment and the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        ClientBuilder::new().api_key(api_key).build()
    }
}

impl PetstoreClient<Suspending<ReqwestTransport>> {
    /// Async client with the default environment and the given key.
    pub fn new_async(api_key: impl Into<String>) -> Result<Self, ApiError> {
        ClientBuilder::new().api_key(api_key).build_async()
    }
}

impl<D: Dispatch> PetstoreClient<D> {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn from_base(base: BaseClient<D>) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &BaseClient<D> {
        &self.base
    }

    pub fn pet(&self) -> PetClient<'_, D> {
        PetClient::new(&self.base)
    }

    pub fn store(&self) -> StoreClient<'_, D> {
        StoreClient::new(&self.base)
    }

    pub fn user(&self) -> UserClient<'_, D> {
        UserClient::new(&self.base)
    }
}
