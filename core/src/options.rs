//! Per-call request overrides.

use std::time::Duration;

/// Options merged over the client defaults for a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub additional_headers: Vec<(String, String)>,
    pub additional_query_params: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_query_params.push((name.into(), value.into()));
        self
    }

    /// Shallow merge with `overrides` taking precedence. Headers with the same
    /// name (ignoring case) are replaced; query params are appended.
    pub fn merged_with(&self, overrides: Option<&RequestOptions>) -> RequestOptions {
        let Some(overrides) = overrides else {
            return self.clone();
        };
        let mut headers: Vec<(String, String)> = self
            .additional_headers
            .iter()
            .filter(|(name, _)| {
                !overrides
                    .additional_headers
                    .iter()
                    .any(|(o, _)| o.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect();
        headers.extend(overrides.additional_headers.iter().cloned());

        let mut query = self.additional_query_params.clone();
        query.extend(overrides.additional_query_params.iter().cloned());

        RequestOptions {
            timeout: overrides.timeout.or(self.timeout),
            additional_headers: headers,
            additional_query_params: query,
        }
    }
}
