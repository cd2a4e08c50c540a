//! Named deployment environments and base URL resolution.

use strum::{Display, EnumString, IntoStaticStr};
use url::Url;

use crate::error::ApiError;

/// Pre-defined base URLs for the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Environment {
    /// The public petstore deployment.
    #[default]
    Production,
    /// A locally running mock of the API.
    MockServer,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => "https://petstore3.swagger.io/api/v3",
            Environment::MockServer => "http://127.0.0.1:8082/v1/mock/local/local-api-16/0.1.0",
        }
    }
}

/// Pick the base URL for a client. An explicit URL always wins over the
/// environment; having neither is a configuration error.
pub fn resolve_base_url(
    base_url: Option<&str>,
    environment: Option<Environment>,
) -> Result<Url, ApiError> {
    let raw = match (base_url, environment) {
        (Some(url), _) => url,
        (None, Some(env)) => env.base_url(),
        (None, None) => {
            return Err(ApiError::Configuration(
                "a base_url or an environment is required".to_string(),
            ))
        }
    };
    Url::parse(raw).map_err(|e| ApiError::Configuration(format!("invalid base URL `{raw}`: {e}")))
}
