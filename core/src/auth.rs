//! Static credentials injected into outgoing requests.

use std::collections::HashMap;

use strum::{Display, EnumString};
use tracing::debug;

use crate::error::ApiError;
use crate::http::find_header;
use crate::query::QueryParams;

/// Where a credential travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AuthLocation {
    Header,
    Query,
    Cookie,
}

/// A single named credential.
///
/// A key without a value is registered but never sent, so operations that
/// reference it still resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthKey {
    pub name: String,
    pub location: AuthLocation,
    pub value: Option<String>,
}

impl AuthKey {
    pub fn header(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            location: AuthLocation::Header,
            value,
        }
    }
}

/// Registered credentials keyed by scheme name. One entry per scheme.
#[derive(Debug, Clone, Default)]
pub struct AuthRegistry {
    keys: HashMap<String, AuthKey>,
}

impl AuthRegistry {
    /// Register `key` under `scheme`, replacing any previous entry.
    pub fn register(&mut self, scheme: impl Into<String>, key: AuthKey) {
        self.keys.insert(scheme.into(), key);
    }

    pub fn get(&self, scheme: &str) -> Option<&AuthKey> {
        self.keys.get(scheme)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inject every scheme in `auth_names` into the request parts.
    ///
    /// A credential the request already carries (same header name, query
    /// name, or cookie name) is left alone. An unknown scheme fails before
    /// anything is sent.
    pub fn apply(
        &self,
        auth_names: &[&str],
        headers: &mut Vec<(String, String)>,
        query: &mut QueryParams,
    ) -> Result<(), ApiError> {
        for scheme in auth_names {
            let key = self
                .get(scheme)
                .ok_or_else(|| ApiError::UnknownAuth(scheme.to_string()))?;
            let Some(value) = key.value.as_deref() else {
                debug!(scheme, "auth scheme has no value, not sending it");
                continue;
            };
            match key.location {
                AuthLocation::Header => {
                    if find_header(headers, &key.name).is_some() {
                        debug!(scheme, "request already carries auth header");
                    } else {
                        headers.push((key.name.clone(), value.to_string()));
                    }
                }
                AuthLocation::Query => {
                    if !query.contains(&key.name) {
                        query.push(key.name.as_str(), value);
                    }
                }
                AuthLocation::Cookie => inject_cookie(headers, &key.name, value),
            }
        }
        Ok(())
    }
}

fn inject_cookie(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    let pair = format!("{name}={value}");
    match headers
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case("cookie"))
    {
        Some((_, existing)) => {
            let present = existing
                .split(';')
                .any(|c| c.trim().split('=').next() == Some(name));
            if !present {
                existing.push_str("; ");
                existing.push_str(&pair);
            }
        }
        None => headers.push(("Cookie".to_string(), pair)),
    }
}
