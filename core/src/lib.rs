//! Client SDK for the petstore REST API.
//!
//! # Overview
//! Every operation goes through one pipeline: a resource façade fills an
//! [`Operation`](operation::Operation) template, [`BaseClient`](base::BaseClient)
//! merges options, injects credentials and joins the URL, a transport sends
//! the request, and the response is decoded against the operation's declared
//! [`ResponseShape`].
//!
//! # Design
//! - Request building and response decoding never touch the network; only
//!   the transport does. Tests inject a recording transport through
//!   [`ClientBuilder::build_with`].
//! - [`Client`] (blocking, `ureq`) and [`AsyncClient`] (async, `reqwest`) share
//!   all façade code. They differ only in their [`Dispatch`](transport::Dispatch)
//!   strategy.
//! - Optional inputs are [`Param`]s, which tell "not given" apart from an
//!   explicit null.
//! - Request bodies are typed in [`params`], response bodies in [`models`].
//!
//! ```no_run
//! use petstore_core::{Client, params};
//!
//! # fn main() -> Result<(), petstore_core::ApiError> {
//! let client = Client::new("my-key")?;
//! let pet = client
//!     .pet()
//!     .create(&params::Pet::new("doggie", vec!["string".into()]), None)?;
//! println!("{:?}", pet.parsed());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod base;
pub mod client;
pub mod config;
pub mod decode;
pub mod encode;
pub mod environment;
pub mod error;
pub mod http;
pub mod models;
pub mod operation;
pub mod options;
pub mod param;
pub mod params;
pub mod query;
pub mod resources;
pub mod transport;

pub use auth::{AuthKey, AuthLocation};
pub use client::{AsyncClient, Client, PetstoreClient};
pub use config::ClientBuilder;
pub use decode::{BinaryResponse, OrBinary, ResponseShape};
pub use encode::to_encodable;
pub use environment::Environment;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use options::RequestOptions;
pub use param::Param;
pub use query::{encode_query_param, QueryParams, QueryStyle};
pub use transport::{AsyncTransport, Blocking, BlockingTransport, Suspending};
