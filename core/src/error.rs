//! Error types for the petstore client.
//!
//! # Design
//! Each failure is classified by *where* it happened, so callers can tell a
//! misconfigured client from a rejected payload, a network fault, a non-2xx
//! answer from the server, or a 2xx body that matches none of the declared
//! response shapes. Configuration and validation errors are raised before
//! anything touches the network.

use bytes::Bytes;
use thiserror::Error;

/// Number of body bytes kept in a decode error for diagnostics.
pub const BODY_EXCERPT_LEN: usize = 256;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing base URL/environment, unparseable setting, or invalid header.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An operation referenced an auth scheme that was never registered.
    #[error("auth scheme `{0}` is not registered on this client")]
    UnknownAuth(String),

    /// A value failed its declared schema while building the request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Connection or protocol failure reported by the HTTP transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// The in-flight request exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", String::from_utf8_lossy(.body))]
    Status { status: u16, body: Bytes },

    /// A 2xx body matched no declared response alternative.
    #[error("could not decode HTTP {status} response ({reason}): {excerpt}")]
    Decode {
        status: u16,
        excerpt: String,
        reason: String,
    },
}

impl ApiError {
    /// HTTP status attached to this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub(crate) fn decode(status: u16, body: &[u8], reason: String) -> Self {
        let end = body.len().min(BODY_EXCERPT_LEN);
        ApiError::Decode {
            status,
            excerpt: String::from_utf8_lossy(&body[..end]).into_owned(),
            reason,
        }
    }
}
