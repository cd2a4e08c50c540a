//! Response decoding against a declared shape.
//!
//! # Design
//! A [`ResponseShape`] is an ordered list of typed JSON parsers plus two
//! optional escape hatches: raw passthrough (no parsing at all) and binary
//! fallback. Decoding tries the parsers in declaration order; a structural
//! mismatch is reported as [`Attempt::Rejected`] and the next parser runs.
//! The first match wins. When every parser rejects, the binary fallback (if
//! declared) wraps the untouched body, otherwise a decode error is returned.

use std::fmt;
use std::sync::OnceLock;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::encode::short_type_name;
use crate::error::ApiError;
use crate::http::{find_header, HttpResponse};

/// An un-parsed response body.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    status: u16,
    headers: Vec<(String, String)>,
    content: Bytes,
    text: OnceLock<String>,
}

impl BinaryResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        find_header(&self.headers, "content-type")
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Body decoded as UTF-8 (lossy), computed on first access.
    pub fn text(&self) -> &str {
        self.text
            .get_or_init(|| String::from_utf8_lossy(&self.content).into_owned())
    }

    pub fn into_bytes(self) -> Bytes {
        self.content
    }
}

impl From<HttpResponse> for BinaryResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            content: response.body,
            text: OnceLock::new(),
        }
    }
}

impl PartialEq for BinaryResponse {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.headers == other.headers && self.content == other.content
    }
}

/// Either a parsed body or the raw bytes it could not be parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum OrBinary<T> {
    Parsed(T),
    Binary(BinaryResponse),
}

impl<T> OrBinary<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            OrBinary::Parsed(v) => Some(v),
            OrBinary::Binary(_) => None,
        }
    }

    pub fn into_parsed(self) -> Option<T> {
        match self {
            OrBinary::Parsed(v) => Some(v),
            OrBinary::Binary(_) => None,
        }
    }

    pub fn binary(&self) -> Option<&BinaryResponse> {
        match self {
            OrBinary::Parsed(_) => None,
            OrBinary::Binary(b) => Some(b),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, OrBinary::Binary(_))
    }
}

/// Outcome of one parser against a JSON body.
#[derive(Debug)]
pub enum Attempt<T> {
    Matched(T),
    Rejected { expected: String, reason: String },
}

type Parser<T> = Box<dyn Fn(&Value) -> Result<T, serde_json::Error> + Send + Sync>;

struct Alternative<T> {
    expected: String,
    parse: Parser<T>,
}

impl<T> Alternative<T> {
    fn attempt(&self, body: &Value) -> Attempt<T> {
        match (self.parse)(body) {
            Ok(value) => Attempt::Matched(value),
            Err(e) => Attempt::Rejected {
                expected: self.expected.clone(),
                reason: e.to_string(),
            },
        }
    }
}

/// Declared expected type of a response body.
pub struct ResponseShape<T> {
    passthrough: Option<fn(HttpResponse) -> T>,
    alternatives: Vec<Alternative<T>>,
    binary: Option<fn(BinaryResponse) -> T>,
}

impl<T> fmt::Debug for ResponseShape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseShape")
            .field("passthrough", &self.passthrough.is_some())
            .field(
                "alternatives",
                &self.alternatives.iter().map(|a| a.expected.as_str()).collect::<Vec<_>>(),
            )
            .field("binary", &self.binary.is_some())
            .finish()
    }
}

impl ResponseShape<HttpResponse> {
    /// Return the response unchanged, without looking at the body.
    pub fn raw() -> Self {
        Self {
            passthrough: Some(|response| response),
            alternatives: Vec::new(),
            binary: None,
        }
    }
}

impl<U: DeserializeOwned + 'static> ResponseShape<U> {
    /// Exactly one JSON type, no fallback.
    pub fn json() -> Self {
        Self::union().or_json(|value: U| value)
    }
}

impl<U: DeserializeOwned + 'static> ResponseShape<OrBinary<U>> {
    /// One JSON type with the raw body as fallback.
    pub fn json_or_binary() -> Self {
        Self::union().or_json(OrBinary::Parsed).or_binary(OrBinary::Binary)
    }
}

impl<T> ResponseShape<T> {
    /// An empty union; add members with [`or_json`](Self::or_json) and
    /// [`or_binary`](Self::or_binary).
    pub fn union() -> Self {
        Self {
            passthrough: None,
            alternatives: Vec::new(),
            binary: None,
        }
    }

    /// Append a JSON member, tried after every member added before it.
    pub fn or_json<U>(mut self, wrap: fn(U) -> T) -> Self
    where
        U: DeserializeOwned + 'static,
        T: 'static,
    {
        self.alternatives.push(Alternative {
            expected: short_type_name::<U>(),
            parse: Box::new(move |body| U::deserialize(body).map(wrap)),
        });
        self
    }

    /// Declare the binary fallback.
    pub fn or_binary(mut self, wrap: fn(BinaryResponse) -> T) -> Self {
        self.binary = Some(wrap);
        self
    }

    /// Decode a 2xx response.
    pub fn decode(&self, response: HttpResponse) -> Result<T, ApiError> {
        if let Some(passthrough) = self.passthrough {
            return Ok(passthrough(response));
        }

        let mut rejections = Vec::new();
        if self.binary.is_some() && declares_non_json(&response) {
            rejections.push(format!(
                "content-type {} is not JSON",
                response.content_type().unwrap_or_default()
            ));
        } else {
            match serde_json::from_slice::<Value>(&response.body) {
                Ok(body) => {
                    for alternative in &self.alternatives {
                        match alternative.attempt(&body) {
                            Attempt::Matched(value) => return Ok(value),
                            Attempt::Rejected { expected, reason } => {
                                rejections.push(format!("not {expected}: {reason}"))
                            }
                        }
                    }
                }
                Err(e) => rejections.push(format!("body is not JSON: {e}")),
            }
        }

        let reason = rejections.join("; ");
        match self.binary {
            Some(wrap) => {
                debug!(status = response.status, %reason, "falling back to binary response");
                Ok(wrap(BinaryResponse::from(response)))
            }
            None => Err(ApiError::decode(response.status, &response.body, reason)),
        }
    }
}

/// True when the server states a content type that is not JSON.
fn declares_non_json(response: &HttpResponse) -> bool {
    response
        .content_type()
        .is_some_and(|ct| !ct.to_ascii_lowercase().contains("json"))
}
