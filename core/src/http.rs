//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. The base client builds a fully
//! resolved `HttpRequest` (URL with query, headers, body, timeout) and the
//! transports only move bytes; decoding happens afterwards on the
//! `HttpResponse`. This keeps preparation and decoding identical for the
//! blocking and the suspending client, and lets tests inject canned
//! responses without a network.

use std::time::Duration;

use bytes::Bytes;
use strum::{Display, EnumString};
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Bytes { content: Bytes, content_type: String },
}

impl RequestBody {
    pub fn content_type(&self) -> &str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Bytes { content_type, .. } => content_type,
        }
    }

    /// Serialized payload as sent on the wire.
    pub fn to_bytes(&self) -> Result<Bytes, serde_json::Error> {
        match self {
            RequestBody::Json(value) => serde_json::to_vec(value).map(Bytes::from),
            RequestBody::Bytes { content, .. } => Ok(content.clone()),
        }
    }
}

/// A fully resolved HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL including the encoded query string.
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Case-insensitive lookup; the first matching entry wins.
pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Bytes::new(),
        };
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
    }

    #[test]
    fn json_body_serializes_compactly() {
        let body = RequestBody::Json(serde_json::json!({"id": 10}));
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(br#"{"id":10}"#));
    }
}
